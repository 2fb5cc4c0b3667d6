//! Attribute types, paths, cardinalities and property lists

use super::{is_path_segment, is_path_start};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Enumeration modifiers that follow the closing parenthesis
const ENUM_MODIFIERS: &[&str] = &["ORDERED", "CIRCULAR"];

impl Parser<'_> {
    /// Name = Ident
    ///
    /// A reserved word directly followed by `=` is accepted as a name too;
    /// the built-in model defines `BOOLEAN`, `NAME` and `URI` that way.
    pub(crate) fn parse_name(&mut self) {
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else if self.at_keyword_name() {
            self.parse_keyword_name();
        } else {
            self.error("expected name");
        }
    }

    /// A keyword used as a definition name
    pub(crate) fn parse_keyword_name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.bump_remap(SyntaxKind::IDENT);
        self.finish_node();
    }

    /// True at an identifier or a keyword that names a definition
    pub(crate) fn at_definition_name(&self) -> bool {
        self.at(SyntaxKind::IDENT) || self.at_keyword_name()
    }

    fn at_keyword_name(&self) -> bool {
        self.current_kind().is_keyword() && self.nth(1) == SyntaxKind::EQ
    }

    /// Path = Segment {'.' Segment}
    pub(crate) fn parse_path(&mut self) {
        if !is_path_start(self.current_kind()) || self.at_eof() {
            self.error("expected name or qualified path");
            return;
        }
        self.start_node(SyntaxKind::PATH);
        self.bump();
        while self.at(SyntaxKind::DOT) && is_path_segment(self.nth(1)) {
            self.bump();
            self.bump();
        }
        self.finish_node();
    }

    /// Properties = '(' Property {',' Property} ')'
    pub(crate) fn parse_properties(&mut self) {
        self.start_node(SyntaxKind::PROPERTIES);
        self.expect(SyntaxKind::L_PAREN);
        while self.current_kind().is_keyword() || self.at(SyntaxKind::IDENT) {
            self.bump();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Extends = 'EXTENDS' Path
    pub(crate) fn parse_extends_clause(&mut self) {
        self.start_node(SyntaxKind::EXTENDS_CLAUSE);
        self.expect(SyntaxKind::EXTENDS_KW);
        self.parse_path();
        self.finish_node();
    }

    /// Cardinality = '{' Bound ['..' Bound] '}'
    pub(crate) fn parse_cardinality(&mut self) {
        self.start_node(SyntaxKind::CARDINALITY);
        self.expect(SyntaxKind::L_BRACE);
        self.parse_cardinality_bound();
        if self.eat(SyntaxKind::DOT_DOT) {
            self.parse_cardinality_bound();
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_cardinality_bound(&mut self) {
        if self.at_any(&[SyntaxKind::INTEGER, SyntaxKind::STAR]) {
            self.bump();
        } else {
            self.error("expected cardinality bound");
        }
    }

    /// Parse an attribute or domain type up to one of `terminators`.
    ///
    /// Anything the typed rules do not fully cover is wrapped into an
    /// `OPAQUE_TYPE` node so the remaining tokens stay attached to the type.
    pub(crate) fn parse_type(&mut self, terminators: &[SyntaxKind]) {
        let checkpoint = self.checkpoint();

        match self.current_kind() {
            SyntaxKind::TEXT_KW | SyntaxKind::MTEXT_KW => {
                self.start_node(SyntaxKind::TEXT_TYPE);
                self.bump();
                if self.eat(SyntaxKind::STAR) {
                    self.expect(SyntaxKind::INTEGER);
                }
                self.finish_node();
            }
            SyntaxKind::NAME_KW | SyntaxKind::URI_KW => {
                self.start_node(SyntaxKind::TEXT_TYPE);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::BOOLEAN_KW => {
                self.start_node(SyntaxKind::BOOLEAN_TYPE);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::INTEGER | SyntaxKind::DECIMAL | SyntaxKind::MINUS => {
                self.parse_numeric_type()
            }
            SyntaxKind::L_PAREN => self.parse_enum_type(),
            SyntaxKind::REFERENCE_KW => self.parse_reference_type(),
            SyntaxKind::BAG_KW | SyntaxKind::LIST_KW => self.parse_list_type(),
            SyntaxKind::BLACKBOX_KW => {
                self.start_node(SyntaxKind::BLACKBOX_TYPE);
                self.bump();
                if self.at_any(&[SyntaxKind::BINARY_KW, SyntaxKind::XML_KW]) {
                    self.bump();
                } else {
                    self.error("expected BINARY or XML");
                }
                self.finish_node();
            }
            kind if is_path_start(kind) => {
                self.start_node(SyntaxKind::TYPE_REF);
                self.parse_path();
                self.finish_node();
            }
            _ => {}
        }

        if !self.at_eof() && !self.at_any(terminators) {
            self.start_node_at(checkpoint, SyntaxKind::OPAQUE_TYPE);
            self.bump_balanced_until(terminators);
            self.finish_node();
        }
    }

    /// Numeric = ['-'] Number '..' ['-'] Number ['[' UnitRef ']']
    fn parse_numeric_type(&mut self) {
        self.start_node(SyntaxKind::NUMERIC_TYPE);
        self.parse_number();
        self.expect(SyntaxKind::DOT_DOT);
        self.parse_number();
        if self.eat(SyntaxKind::L_BRACKET) {
            self.parse_path();
            self.expect(SyntaxKind::R_BRACKET);
        }
        self.finish_node();
    }

    fn parse_number(&mut self) {
        self.eat(SyntaxKind::MINUS);
        if self.at_any(&[SyntaxKind::INTEGER, SyntaxKind::DECIMAL]) {
            self.bump();
        } else {
            self.error("expected number");
        }
    }

    /// Enumeration = '(' ('FINAL' | Element {',' Element} [':' 'FINAL']) ')' [ORDERED|CIRCULAR]
    fn parse_enum_type(&mut self) {
        self.start_node(SyntaxKind::ENUM_TYPE);
        self.expect(SyntaxKind::L_PAREN);

        // `(FINAL)` closes an extensible enumeration without new elements
        if !self.eat(SyntaxKind::FINAL_KW) {
            loop {
                self.parse_enum_element();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            if self.eat(SyntaxKind::COLON) {
                self.expect(SyntaxKind::FINAL_KW);
            }
        }
        self.expect(SyntaxKind::R_PAREN);

        if self.at(SyntaxKind::IDENT) && ENUM_MODIFIERS.contains(&self.current_text()) {
            self.bump();
        }
        self.finish_node();
    }

    /// Element = Name [Enumeration | 'FINAL']
    fn parse_enum_element(&mut self) {
        if !self.at(SyntaxKind::IDENT) {
            self.error_recover(
                "expected enumeration element",
                &[SyntaxKind::COMMA, SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON],
            );
            return;
        }
        self.start_node(SyntaxKind::ENUM_ELEMENT);
        self.parse_name();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_enum_type();
        } else {
            self.eat(SyntaxKind::FINAL_KW);
        }
        self.finish_node();
    }

    /// Reference = 'REFERENCE' 'TO' ['(' 'EXTERNAL' ')'] Path {'OR' Path}
    fn parse_reference_type(&mut self) {
        self.start_node(SyntaxKind::REFERENCE_TYPE);
        self.expect(SyntaxKind::REFERENCE_KW);
        self.expect(SyntaxKind::TO_KW);
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        self.parse_path();
        while self.eat(SyntaxKind::OR_KW) {
            self.parse_path();
        }
        self.finish_node();
    }

    /// List = ('BAG' | 'LIST') [Cardinality] 'OF' Path
    fn parse_list_type(&mut self) {
        self.start_node(SyntaxKind::LIST_TYPE);
        self.bump();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_cardinality();
        }
        self.expect(SyntaxKind::OF_KW);
        self.parse_path();
        self.finish_node();
    }
}
