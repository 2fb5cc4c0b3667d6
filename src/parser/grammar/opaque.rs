//! Constructs kept as plain token runs
//!
//! Views, graphics, functions, line forms, contexts and the like are not
//! modelled. They are captured as `OPAQUE_STATEMENT` (up to the next `;`) or
//! `OPAQUE_BLOCK` (up to `END [Name];`) so formatting and error recovery keep
//! working around them.

use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// Bump tokens until one of `stop` is reached outside any brackets.
    pub(crate) fn bump_balanced_until(&mut self, stop: &[SyntaxKind]) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            if depth == 0 && stop.contains(&kind) {
                break;
            }
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// OpaqueStatement = Keyword Token* ';'
    pub(crate) fn parse_opaque_statement(&mut self) {
        self.start_node(SyntaxKind::OPAQUE_STATEMENT);
        self.bump();
        self.bump_balanced_until(&[SyntaxKind::SEMICOLON, SyntaxKind::END_KW]);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// OpaqueBlock = Keyword Token* 'END' [Name] ';'
    pub(crate) fn parse_opaque_block(&mut self) {
        self.start_node(SyntaxKind::OPAQUE_BLOCK);
        self.bump();
        self.bump_balanced_until(&[SyntaxKind::END_KW]);
        if self.expect(SyntaxKind::END_KW) {
            self.eat(SyntaxKind::IDENT);
            self.expect(SyntaxKind::SEMICOLON);
        }
        self.finish_node();
    }
}
