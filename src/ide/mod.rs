//! IDE features: editor-facing queries over a resolved environment.
//!
//! These are pure functions: they take a resolved [`Environment`] and
//! return plain data, leaving protocol types to the caller.
//!
//! [`Environment`]: crate::hir::Environment

mod goto;
mod references;

#[cfg(test)]
mod tests;

pub use goto::goto_definition;
pub use references::{ReferenceDefinition, collect_references};
