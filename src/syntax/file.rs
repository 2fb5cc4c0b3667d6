//! Syntax file wrapper for parsed INTERLIS files.
//!
//! Bundles the rowan parse result with the line index needed to turn byte
//! offsets into editor positions.

use smol_str::SmolStr;

use crate::base::{LineIndex, Span, TextRange};
use crate::parser::{AstNode, Parse, SourceFile, parse};

/// A parsed syntax file that wraps a rowan Parse result.
#[derive(Debug, Clone)]
pub struct SyntaxFile {
    /// The underlying rowan parse result
    parse: Parse,
    /// Offset to line/column mapping of the source text
    line_index: LineIndex,
}

// Two SyntaxFiles are equal if they produce the same tree
impl PartialEq for SyntaxFile {
    fn eq(&self, other: &Self) -> bool {
        self.parse.green == other.parse.green
    }
}

impl Eq for SyntaxFile {}

impl SyntaxFile {
    /// Parse source code into a syntax file
    pub fn new(source: &str) -> Self {
        Self {
            parse: parse(source),
            line_index: LineIndex::new(source),
        }
    }

    /// Get the underlying parse result
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    /// Get the root source file AST node
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.parse.syntax())
    }

    /// Check if parsing had errors
    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Convert a byte range of this file into a line/column span
    pub fn span(&self, range: TextRange) -> Span {
        self.line_index.span(range)
    }

    /// The `INTERLIS x.y` version declared in the header
    pub fn schema_version(&self) -> Option<SmolStr> {
        self.source_file()?.header()?.version()
    }

    /// Names of all models declared in this file
    pub fn model_names(&self) -> Vec<SmolStr> {
        self.source_file()
            .map(|file| {
                file.models()
                    .filter_map(|m| m.name().and_then(|n| n.text()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
