//! Formatted fragments
//!
//! A `Part` is the rendered text of a run of tokens together with its first
//! and last boundary token. Comments in front of the first token are kept
//! aside until the part is joined, because their layout depends on what
//! precedes them. Parts are combined left to right; the separator between
//! two parts depends on the boundary tokens and the layout rule only.

use super::rules::Insert;
use super::tokens::{keeps_newlines, kept_newlines, no_space_after, no_space_before, would_fuse};
use crate::parser::SyntaxToken;

#[derive(Debug, Clone, Default)]
pub(super) struct Part {
    /// Comments before `first`, not yet rendered
    leading: Vec<SyntaxToken>,
    text: String,
    first: Option<SyntaxToken>,
    last: Option<SyntaxToken>,
}

impl Part {
    /// A part holding a single token
    pub(super) fn token(token: &SyntaxToken) -> Self {
        Self {
            leading: Vec::new(),
            text: token.text().to_string(),
            first: Some(token.clone()),
            last: Some(token.clone()),
        }
    }

    /// A token preceded by the comments attached to it
    pub(super) fn with_comments(comments: Vec<SyntaxToken>, token: &SyntaxToken) -> Self {
        Self {
            leading: comments,
            ..Self::token(token)
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.first.is_none() && self.leading.is_empty()
    }

    pub(super) fn last(&self) -> Option<&SyntaxToken> {
        self.last.as_ref()
    }

    /// The rendered text, with any pending leading comments in front at
    /// the outermost level
    pub(super) fn into_text(self) -> String {
        let indent = "";
        let Some(first) = self.first.as_ref() else {
            return self.text;
        };
        let mut text = String::new();
        let mut previous: Option<&SyntaxToken> = None;
        for comment in &self.leading {
            if let Some(previous) = previous {
                text.push_str(&line_breaks(kept_newlines(previous, comment), indent));
            }
            text.push_str(comment.text());
            previous = Some(comment);
        }
        if let Some(previous) = previous {
            text.push_str(&line_breaks(kept_newlines(previous, first), indent));
        }
        text.push_str(&self.text);
        text
    }

    /// Append `right`, separated according to `insert`.
    ///
    /// Line breaks next to comments come from the source (clamped). A
    /// comment on the line of the previous token stays there, and `insert`
    /// then applies after the comment run instead. `indent` is written
    /// after every line break.
    pub(super) fn join(self, right: Part, insert: Option<Insert>, indent: &str) -> Part {
        if right.is_empty() {
            return self;
        }
        let Some(left_last) = self.last.clone() else {
            return right;
        };
        let Some(right_first) = right.first.clone() else {
            return self;
        };

        let mut text = self.text;
        let mut previous = left_last;
        let trailing = right
            .leading
            .first()
            .is_some_and(|comment| kept_newlines(&previous, comment) == 0);

        for comment in &right.leading {
            text.push_str(&line_breaks(kept_newlines(&previous, comment), indent));
            text.push_str(comment.text());
            previous = comment.clone();
        }

        let separator = if right.leading.is_empty() {
            separator(&previous, &right_first, insert, indent)
        } else {
            let kept = kept_newlines(&previous, &right_first);
            if trailing {
                // The comment ended the previous line; lay out what follows it
                match kept.max(breaks(insert)) {
                    0 => separator(&previous, &right_first, insert, indent),
                    count => line_breaks(count, indent),
                }
            } else {
                line_breaks(kept, indent)
            }
        };

        text.push_str(&separator);
        text.push_str(&right.text);
        Part {
            leading: self.leading,
            text,
            first: self.first,
            last: right.last,
        }
    }
}

/// Separator between two adjacent tokens
fn separator(left: &SyntaxToken, right: &SyntaxToken, insert: Option<Insert>, indent: &str) -> String {
    if keeps_newlines(left.kind()) || keeps_newlines(right.kind()) {
        return line_breaks(kept_newlines(left, right), indent);
    }
    match insert {
        Some(Insert::Space) => " ".to_string(),
        Some(Insert::Nothing) => tight(left, right),
        Some(Insert::Newline) => line_breaks(1, indent),
        Some(Insert::BlankLine) => line_breaks(2, indent),
        None if no_space_after(left.kind()) || no_space_before(right.kind()) => tight(left, right),
        None => " ".to_string(),
    }
}

/// Line breaks asked for by a layout rule
fn breaks(insert: Option<Insert>) -> usize {
    match insert {
        Some(Insert::Newline) => 1,
        Some(Insert::BlankLine) => 2,
        _ => 0,
    }
}

/// No separator, unless the two tokens would merge into a different token
fn tight(left: &SyntaxToken, right: &SyntaxToken) -> String {
    if would_fuse(left, right) {
        " ".to_string()
    } else {
        String::new()
    }
}

/// `count` line breaks followed by indentation; zero breaks is one space.
/// Blank lines carry no indentation.
fn line_breaks(count: usize, indent: &str) -> String {
    if count == 0 {
        " ".to_string()
    } else {
        format!("{}{indent}", "\n".repeat(count))
    }
}
