//! Grammar rules for INTERLIS 2
//!
//! The rules are split by construct:
//! - `model` - file header, models, imports, unit and domain sections
//! - `topic` - topics and their class-like members (classes, structures, associations)
//! - `types` - attribute types, paths, cardinalities and property lists
//! - `opaque` - constructs kept as plain token runs (views, graphics, functions, ...)
//!
//! Each rule is an `impl Parser` block method. Rules never fail: missing
//! tokens are reported and skipped tokens are wrapped in `ERROR` nodes.

mod model;
mod opaque;
mod topic;
mod types;

use crate::parser::syntax_kind::SyntaxKind;

/// Keywords that start a block ending in `END [Name];`
pub(crate) const OPAQUE_BLOCK_KEYWORDS: &[SyntaxKind] =
    &[SyntaxKind::VIEW_KW, SyntaxKind::GRAPHIC_KW];

/// Tokens a member loop can resynchronise on
pub(crate) const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::END_KW,
    SyntaxKind::TOPIC_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::STRUCTURE_KW,
    SyntaxKind::ASSOCIATION_KW,
    SyntaxKind::DOMAIN_KW,
    SyntaxKind::UNIT_KW,
];

/// Tokens that may be the first segment of a path
pub(crate) fn is_path_start(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::IDENT | SyntaxKind::INTERLIS_KW)
}

/// Tokens that may follow a `.` inside a path
///
/// Built-in names such as `INTERLIS.BOOLEAN` or `INTERLIS.URI` collide with
/// reserved words, so any keyword is accepted after the first segment.
pub(crate) fn is_path_segment(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::IDENT || kind.is_keyword()
}
