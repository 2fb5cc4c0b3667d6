//! Go-to-definition implementation.

use super::references::{ReferenceDefinition, collect_references};
use crate::base::Position;
use crate::hir::Environment;

/// Definitions named by the references under `position` in the file `uri`.
///
/// Both ends of an occurrence count as inside. Targets in the built-in
/// model have no file to jump to and are left out.
pub fn goto_definition(
    env: &Environment,
    uri: &str,
    position: Position,
) -> Vec<ReferenceDefinition> {
    collect_references(env, uri)
        .into_iter()
        .filter(|reference| reference.span.contains(position))
        .filter(|reference| reference.target_uri.is_some())
        .collect()
}
