//! Rowan-based formatter for INTERLIS
//!
//! This module provides lossless formatting that preserves comments and the
//! text of every token. Only the whitespace between tokens is rewritten:
//!
//! - each CST node is rendered into a [`Part`](part::Part) by joining the parts
//!   of its children, using the layout rules of that node kind
//! - comments are attached to the visible token that follows them and keep
//!   their original line breaks (at most one blank line); a comment on the
//!   line of the previous token stays there and the layout continues after it
//! - indentation is a counter scoped to the node being rendered
//!
//! The result is idempotent: formatting formatted text yields the same text.

mod options;
mod part;
mod rules;
mod tokens;


use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::parser::{Parse, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, parse};
pub use options::FormatOptions;
use part::Part;
use rules::{IndentAction, Side, rules_for};
use tokens::{leading_comments, no_space_before, trailing_comments};

/// Format INTERLIS source code with cancellation support.
/// Returns `None` if the cancellation token is signalled.
pub fn format_source(
    source: &str,
    options: &FormatOptions,
    cancel: &CancellationToken,
) -> Option<String> {
    let parse = parse(source);
    render(&parse.syntax(), options, cancel)
}

/// Format an already parsed file
pub fn format(parse: &Parse, options: &FormatOptions) -> String {
    render(&parse.syntax(), options, &CancellationToken::new()).unwrap_or_default()
}

/// Render the CST back to formatted source code with cancellation support
fn render(root: &SyntaxNode, options: &FormatOptions, cancel: &CancellationToken) -> Option<String> {
    let printer = Printer { options, cancel };
    let body = printer.node(root, 0)?;

    // Comments after the last visible token belong to the file itself
    let trailing = trailing_comments(body.last(), root.first_token());
    let output = trailing.iter().fold(body, |acc, comment| {
        acc.join(Part::token(comment), None, "")
    });
    if output.is_empty() {
        return Some(String::new());
    }

    let mut text = output.into_text();
    if options.trim_final_newlines {
        let trimmed = text.trim_end_matches('\n').len();
        text.truncate(trimmed);
    }
    if options.insert_final_newline && !text.ends_with('\n') {
        text.push('\n');
    }
    Some(text)
}

struct Printer<'a> {
    options: &'a FormatOptions,
    cancel: &'a CancellationToken,
}

impl Printer<'_> {
    /// Render one node with `level` as the indentation of its first line
    fn node(&self, node: &SyntaxNode, level: usize) -> Option<Part> {
        if self.cancel.is_cancelled() {
            trace!("formatting cancelled");
            return None;
        }

        let rules = rules_for(node);
        let mut level = level;
        let mut part = Part::default();
        let mut previous: Option<Side> = None;
        let mut ordinals: FxHashMap<SyntaxKind, usize> = FxHashMap::default();

        for element in node.children_with_tokens() {
            let kind = element.kind();
            if kind.is_trivia() {
                continue;
            }
            let Some(first) = first_visible_token(&element) else {
                continue;
            };

            let ordinal = ordinals.entry(kind).or_default();
            let side = Side {
                kind,
                ordinal: *ordinal,
            };
            *ordinal += 1;

            let mut layout = rules.layout(previous, side);
            if kind == SyntaxKind::ERROR && no_space_before(first.kind()) {
                // Recovered punctuation stays attached to what precedes it
                layout.insert = None;
            }
            for action in layout.indent {
                level = match action {
                    IndentAction::Indent => level + 1,
                    IndentAction::Dedent => level.saturating_sub(1),
                };
            }

            let child = match &element {
                SyntaxElement::Node(child) => self.node(child, level)?,
                SyntaxElement::Token(token) => self.terminal(token),
            };
            part = part.join(child, layout.insert, &self.options.indent(level));
            previous = Some(side);
        }

        Some(part)
    }

    /// A visible token preceded by the comments attached to it
    fn terminal(&self, token: &SyntaxToken) -> Part {
        Part::with_comments(leading_comments(token), token)
    }
}

fn first_visible_token(element: &SyntaxElement) -> Option<SyntaxToken> {
    match element {
        SyntaxElement::Token(token) => (!token.kind().is_trivia()).then(|| token.clone()),
        SyntaxElement::Node(node) => node
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia()),
    }
}
