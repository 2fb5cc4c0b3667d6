//! # interlis-base
//!
//! Core library for INTERLIS 2 parsing, model resolution and formatting.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (references, goto-def)
//!   ↓
//! hir       → AST model, environment, import and reference resolution
//!   ↓
//! project   → Model repositories (in-memory, directory)
//!   ↓
//! syntax    → SyntaxFile, token-preserving formatter
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST wrappers
//!   ↓
//! base      → Primitives (Span/Position, LineIndex, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → project → hir → ide)
// ============================================================================

/// Foundation types: Span, Position, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, rowan CST
pub mod parser;

/// Syntax: parsed files and the formatter
pub mod syntax;

/// Model repositories used to fetch imports
pub mod project;

/// High-level IR: definitions, references and their resolution
pub mod hir;

/// IDE features: find references, goto-definition
pub mod ide;

/// Errors of file-system facing operations
pub mod error;

/// Nearest `.editorconfig` lookup for formatting and lint settings
pub mod editorconfig;

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};
pub use editorconfig::EditorConfig;
pub use error::{Error, Result};

// Re-export the main entry points
pub use hir::{
    Environment, LintConfig, Resolution, ResolveOptions, ResolveOutcome, lint_environment,
    lint_file, resolve_environment,
};
pub use parser::{Parse, parse, tokenize};
pub use syntax::{FormatOptions, SyntaxFile, format, format_source};
