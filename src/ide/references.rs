//! Resolved references of a file, with their targets.

use smol_str::SmolStr;

use crate::base::Span;
use crate::hir::{DefId, Environment};

/// One resolved occurrence and the definition it names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceDefinition {
    /// Where the name is written
    pub span: Span,
    pub target: DefId,
    /// File of the target; `None` for the built-in model
    pub target_uri: Option<SmolStr>,
    /// Name range of the target
    pub target_name_span: Span,
    /// Qualified name of the target
    pub name: String,
}

/// All resolved references occurring in the file stored under `uri`.
///
/// Unresolved references are left out.
pub fn collect_references(env: &Environment, uri: &str) -> Vec<ReferenceDefinition> {
    let Some(file) = env.file_by_uri(uri) else {
        return Vec::new();
    };
    env.references()
        .filter(|(id, _)| id.file == file)
        .filter_map(|(_, reference)| {
            let target = reference.target()?;
            Some(ReferenceDefinition {
                span: reference.span,
                target,
                target_uri: env.uri_of(target).cloned(),
                target_name_span: env.definition(target).name_span,
                name: env.qualified_name(target),
            })
        })
        .collect()
}
