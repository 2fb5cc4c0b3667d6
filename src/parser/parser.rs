//! Recursive descent parser for INTERLIS 2
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse INTERLIS source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
pub(super) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (trivia is looked through)
    // =========================================================================

    fn next_significant(&self) -> Option<&Token<'a>> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|t| !t.kind.is_trivia())
    }

    /// Kind of the next non-trivia token, `ERROR` at end of input
    pub(super) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Text of the next non-trivia token
    pub(super) fn current_text(&self) -> &str {
        self.next_significant().map(|t| t.text).unwrap_or("")
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    pub(super) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    /// True when only trivia is left
    pub(super) fn at_eof(&self) -> bool {
        self.next_significant().is_none()
    }

    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Bump the next significant token, attaching the trivia before it
    pub(super) fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Bump the next token as a different kind (keywords used as names)
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", kind_to_name(kind)));
            false
        }
    }

    pub(super) fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .map(|t| t.kind.is_trivia())
            .unwrap_or(false)
        {
            let token = &self.tokens[self.pos];
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(super) fn error(&mut self, message: impl Into<String>) {
        let range = match self.next_significant() {
            Some(t) => TextRange::at(t.offset, TextSize::of(t.text)),
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            }
        };
        self.errors.push(SyntaxError::new(message, range));
    }

    pub(super) fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.skip_trivia();
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start the root node, which owns the leading trivia
    pub(super) fn start_root(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
    }

    /// Start a node; pending trivia stays in the parent
    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    /// Attach any trailing trivia to the current node (used at the root)
    pub(super) fn finish_trivia(&mut self) {
        self.skip_trivia();
    }
}

/// Human readable token name for error messages
pub(crate) fn kind_to_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::DOT => "'.'",
        SyntaxKind::DOT_DOT => "'..'",
        SyntaxKind::EQ => "'='",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::STRING => "string",
        SyntaxKind::DECIMAL => "version number",
        SyntaxKind::INTEGER => "integer",
        SyntaxKind::INTERLIS_KW => "'INTERLIS'",
        SyntaxKind::MODEL_KW => "'MODEL'",
        SyntaxKind::END_KW => "'END'",
        SyntaxKind::OF_KW => "'OF'",
        SyntaxKind::TO_KW => "'TO'",
        SyntaxKind::ON_KW => "'ON'",
        SyntaxKind::AS_KW => "'AS'",
        SyntaxKind::OID_KW => "'OID'",
        _ => "token",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_lossless() {
        let input = "INTERLIS 2.4; !! c\nMODEL M =\n  /* x */ END M.\n";
        let parse = parse(input);
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_missing_header_is_reported() {
        let parse = parse("MODEL M = END M.");
        assert!(!parse.ok());
        assert_eq!(parse.syntax().text().to_string(), "MODEL M = END M.");
    }

    #[test]
    fn test_garbage_still_yields_tree() {
        let input = "INTERLIS 2.4; ;;; }{ MODEL";
        let parse = parse(input);
        assert!(!parse.ok());
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_error_at_eof_has_empty_range() {
        let parse = parse("INTERLIS 2.4");
        let error = parse.errors.last().unwrap();
        assert_eq!(error.range, TextRange::empty(TextSize::new(12)));
    }
}
