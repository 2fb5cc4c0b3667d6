//! Token classification and trivia inspection used by the formatter

use crate::base::constants::MAX_KEPT_NEWLINES;
use crate::parser::{SyntaxKind, SyntaxToken, tokenize};

/// Tokens that never take a space before them
pub(super) fn no_space_before(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::R_PAREN
            | SyntaxKind::R_BRACKET
            | SyntaxKind::R_BRACE
            | SyntaxKind::DOT
            | SyntaxKind::SEMICOLON
            | SyntaxKind::COMMA
            | SyntaxKind::COLON
            | SyntaxKind::ARROW
    )
}

/// Tokens that never take a space after them
pub(super) fn no_space_after(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::L_PAREN
            | SyntaxKind::L_BRACKET
            | SyntaxKind::L_BRACE
            | SyntaxKind::DOT
            | SyntaxKind::HASH
            | SyntaxKind::ARROW
    )
}

/// Comments running to the end of their line
pub(super) fn requires_newline_after(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::LINE_COMMENT | SyntaxKind::META_COMMENT | SyntaxKind::DOC_COMMENT
    )
}

/// Tokens whose surrounding line breaks are taken from the source
pub(super) fn keeps_newlines(kind: SyntaxKind) -> bool {
    kind.is_comment()
}

/// True when writing `left` and `right` without a separator would lex
/// differently, e.g. `..` followed by `.` or two identifiers.
pub(super) fn would_fuse(left: &SyntaxToken, right: &SyntaxToken) -> bool {
    let joined = format!("{}{}", left.text(), right.text());
    let tokens = tokenize(&joined);
    !matches!(
        tokens.as_slice(),
        [a, b] if a.kind == left.kind() && b.kind == right.kind()
    )
}

/// Comments between the previous visible token and `token`, in source order
pub(super) fn leading_comments(token: &SyntaxToken) -> Vec<SyntaxToken> {
    let mut comments = Vec::new();
    let mut current = token.prev_token();
    while let Some(prev) = current {
        if !prev.kind().is_trivia() {
            break;
        }
        if prev.kind().is_comment() {
            comments.push(prev.clone());
        }
        current = prev.prev_token();
    }
    comments.reverse();
    comments
}

/// Comments after the last visible token of the tree
pub(super) fn trailing_comments(
    last: Option<&SyntaxToken>,
    root_first: Option<SyntaxToken>,
) -> Vec<SyntaxToken> {
    let mut comments = Vec::new();
    let mut current = match last {
        Some(token) => token.next_token(),
        None => root_first,
    };
    while let Some(token) = current {
        if token.kind().is_comment() {
            comments.push(token.clone());
        }
        current = token.next_token();
    }
    comments
}

/// Number of line breaks in the whitespace between two tokens, clamped
pub(super) fn kept_newlines(left: &SyntaxToken, right: &SyntaxToken) -> usize {
    let mut count = 0;
    let mut current = left.next_token();
    while let Some(token) = current {
        if token == *right || token.kind() != SyntaxKind::WHITESPACE {
            break;
        }
        count += token.text().matches('\n').count();
        current = token.next_token();
    }
    let count = count.min(MAX_KEPT_NEWLINES);
    if requires_newline_after(left.kind()) {
        count.max(1)
    } else {
        count
    }
}
