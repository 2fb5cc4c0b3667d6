//! High-level IR (HIR): the AST model and the resolution engine.
//!
//! Parsed files are lowered into per-file arenas of definitions and
//! references, merged into an [`Environment`] and resolved against it.
//!
//! ## Key Types
//!
//! - [`Definition`] - A named element (model, topic, class, ...) with its
//!   children by name
//! - [`Reference`] - One occurrence of a name or path, bound during
//!   resolution
//! - [`Environment`] - All models of one resolution run, built-in included
//! - [`Diagnostic`] - A problem found while resolving or linting
//! - [`LintConfig`] - Which style rules [`lint_file`] runs
//!
//! ## Pipeline
//!
//! ```text
//! Parse (rowan CST)
//!     │
//!     ▼
//! build(parse, uri)           ← AstFile with unbound references
//!     │
//!     ▼
//! Environment::add_file       ← add-if-absent per model name
//!     │
//!     ▼
//! resolve_environment         ← import closure, then binding
//!     │
//!     ▼
//! Resolution { outcome, diagnostics }
//! ```

mod builtin;
mod definitions;
mod diagnostics;
mod environment;
mod ids;
mod imports;
mod lint;
mod lower;
mod reference;
mod resolve;
mod types;

pub use builtin::BUILTIN_SOURCE;
pub use definitions::{
    AssociationData, AttributeData, ClassData, DefData, DefKind, Definition, DomainData, Import,
    ModelData, Modifiers, TopicData, UnitData,
};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use environment::{AstFile, Environment};
pub use ids::{DefId, FileId, LocalDefId, LocalRefId, RefId};
pub use lint::{
    BOOLEAN_TYPE, LintConfig, LintRule, Linter, RULES, lint_environment, lint_file,
};
pub use lower::build;
pub use reference::{Expected, RefState, Reference};
pub use resolve::{
    LookupResult, Resolution, ResolveOptions, ResolveOutcome, Resolver, resolve_environment,
};
pub use types::{BlackboxKind, Cardinality, EnumNode, RoleKind, TextKind, TypeDef};
