//! Position tracking for AST nodes
//!
//! Stores the source location (line/column) of definitions and references for
//! editor features like go-to-definition and diagnostics.

/// A span representing a range in source code (0-indexed for LSP compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span (both ends inclusive)
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_inner_position() {
        let span = Span::from_coords(1, 4, 3, 2);
        assert!(span.contains(Position::new(2, 0)));
        assert!(span.contains(Position::new(1, 4)));
        assert!(span.contains(Position::new(3, 2)));
    }

    #[test]
    fn test_span_excludes_outer_position() {
        let span = Span::from_coords(1, 4, 1, 9);
        assert!(!span.contains(Position::new(1, 3)));
        assert!(!span.contains(Position::new(1, 10)));
        assert!(!span.contains(Position::new(0, 5)));
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
    }
}
