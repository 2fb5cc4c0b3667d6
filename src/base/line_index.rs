//! Offset to line/column conversion.

use text_size::{TextRange, TextSize};

use super::{Position, Span};

/// Maps byte offsets of one source text to 0-based line/column positions.
///
/// Columns are counted in UTF-16 code units, which is what editors speak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line.
    line_starts: Vec<TextSize>,
    text: String,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            text: text.to_string(),
        }
    }

    /// Convert a byte offset into a line/column position.
    pub fn position(&self, offset: TextSize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let end = usize::from(offset).min(self.text.len());
        let column = self
            .text
            .get(start..end)
            .map(|prefix| prefix.encode_utf16().count())
            .unwrap_or(0);
        Position::new(line, column)
    }

    /// Convert a byte range into a span.
    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }

    /// Number of lines in the text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_on_first_line() {
        let index = LineIndex::new("MODEL M");
        assert_eq!(index.position(TextSize::new(6)), Position::new(0, 6));
    }

    #[test]
    fn test_position_after_newline() {
        let index = LineIndex::new("INTERLIS 2.4;\nMODEL M");
        assert_eq!(index.position(TextSize::new(14)), Position::new(1, 0));
        assert_eq!(index.position(TextSize::new(20)), Position::new(1, 6));
    }

    #[test]
    fn test_columns_count_utf16_units() {
        let index = LineIndex::new("!! Grösse\nA");
        // 'ö' is two bytes but one UTF-16 unit
        assert_eq!(index.position(TextSize::new(10)), Position::new(0, 9));
        assert_eq!(index.line_count(), 2);
    }
}
