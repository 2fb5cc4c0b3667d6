//! Topics and class-like definitions (classes, structures, associations)

use super::OPAQUE_BLOCK_KEYWORDS;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Role operators separating a role name from its targets
const ROLE_OPERATORS: &[SyntaxKind] = &[
    SyntaxKind::ASSOC_ROLE,
    SyntaxKind::AGGREGATION_ROLE,
    SyntaxKind::COMPOSITION_ROLE,
];

/// Keywords that start a constraint inside a class body
const CONSTRAINT_STARTS: &[SyntaxKind] = &[
    SyntaxKind::MANDATORY_KW,
    SyntaxKind::CONSTRAINT_KW,
    SyntaxKind::UNIQUE_KW,
    SyntaxKind::EXISTENCE_KW,
    SyntaxKind::SET_KW,
];

/// Tokens ending an attribute type
const ATTRIBUTE_TYPE_END: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::COLON_EQ,
    SyntaxKind::END_KW,
];

impl Parser<'_> {
    /// Topic = 'TOPIC' Name [Properties] [Extends] '=' TopicBody 'END' Name ';'
    pub(crate) fn parse_topic(&mut self) {
        self.start_node(SyntaxKind::TOPIC);
        self.expect(SyntaxKind::TOPIC_KW);
        self.parse_name();

        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.parse_extends_clause();
        }
        self.expect(SyntaxKind::EQ);

        while !self.at_eof() && !self.at(SyntaxKind::END_KW) {
            match self.current_kind() {
                SyntaxKind::OID_KW | SyntaxKind::NO_KW => self.parse_oid_decl(),
                SyntaxKind::BASKET_KW if self.nth(1) == SyntaxKind::OID_KW => {
                    self.parse_oid_decl()
                }
                SyntaxKind::DEPENDS_KW => self.parse_depends_on(),
                SyntaxKind::CLASS_KW | SyntaxKind::STRUCTURE_KW => self.parse_class(),
                SyntaxKind::ASSOCIATION_KW => self.parse_association(),
                SyntaxKind::DOMAIN_KW => self.parse_domain_section(),
                kind if OPAQUE_BLOCK_KEYWORDS.contains(&kind) => self.parse_opaque_block(),
                SyntaxKind::CONSTRAINTS_KW if self.nth(1) == SyntaxKind::OF_KW => {
                    self.parse_opaque_block()
                }
                kind if kind.is_keyword() => self.parse_opaque_statement(),
                SyntaxKind::IDENT if self.current_text() == "SIGN" => {
                    self.parse_opaque_statement()
                }
                _ => self.recover_member("unexpected token in topic"),
            }
        }

        self.parse_end(true);
        self.finish_node();
    }

    /// OidDecl = ['BASKET'] 'OID' 'AS' Path ';' | 'NO' 'OID' ';'
    fn parse_oid_decl(&mut self) {
        self.start_node(SyntaxKind::OID_DECL);
        if self.eat(SyntaxKind::NO_KW) {
            self.expect(SyntaxKind::OID_KW);
        } else {
            self.eat(SyntaxKind::BASKET_KW);
            self.expect(SyntaxKind::OID_KW);
            self.expect(SyntaxKind::AS_KW);
            self.parse_path();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// DependsOn = 'DEPENDS' 'ON' Path {',' Path} ';'
    fn parse_depends_on(&mut self) {
        self.start_node(SyntaxKind::DEPENDS_ON);
        self.expect(SyntaxKind::DEPENDS_KW);
        self.expect(SyntaxKind::ON_KW);
        loop {
            self.parse_path();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Class = ('CLASS' | 'STRUCTURE') Name [Properties] [Extends] '=' ClassBody 'END' [Name] ';'
    pub(crate) fn parse_class(&mut self) {
        self.start_node(SyntaxKind::CLASS);
        self.bump();
        self.parse_name();
        self.parse_class_like_rest();
        self.finish_node();
    }

    /// Association = 'ASSOCIATION' [Name] [Properties] [Extends] '=' ClassBody 'END' [Name] ';'
    pub(crate) fn parse_association(&mut self) {
        self.start_node(SyntaxKind::ASSOCIATION);
        self.expect(SyntaxKind::ASSOCIATION_KW);
        if self.at(SyntaxKind::IDENT) {
            self.parse_name();
        }
        self.parse_class_like_rest();
        self.finish_node();
    }

    fn parse_class_like_rest(&mut self) {
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.parse_extends_clause();
        }
        self.expect(SyntaxKind::EQ);
        self.parse_class_body();
        self.parse_end(false);
    }

    /// 'END' Name ';' (the name is optional for class-like definitions)
    fn parse_end(&mut self, name_required: bool) {
        if !self.expect(SyntaxKind::END_KW) {
            return;
        }
        if !self.eat(SyntaxKind::IDENT) && name_required {
            self.error("expected name after END");
        }
        self.expect(SyntaxKind::SEMICOLON);
    }

    fn parse_class_body(&mut self) {
        while !self.at_eof() && !self.at(SyntaxKind::END_KW) {
            match self.current_kind() {
                SyntaxKind::ATTRIBUTE_KW | SyntaxKind::PARAMETER_KW => self.bump(),
                SyntaxKind::OID_KW | SyntaxKind::NO_KW => self.parse_oid_decl(),
                SyntaxKind::CARDINALITY_KW => self.parse_cardinality_decl(),
                kind if CONSTRAINT_STARTS.contains(&kind) => self.parse_constraint(),
                SyntaxKind::IDENT if self.at_role() => self.parse_role(),
                SyntaxKind::IDENT => self.parse_attribute(),
                SyntaxKind::CLASS_KW
                | SyntaxKind::STRUCTURE_KW
                | SyntaxKind::ASSOCIATION_KW
                | SyntaxKind::TOPIC_KW => {
                    // Missing END: leave the definition to the enclosing body
                    self.error("expected END");
                    return;
                }
                _ => self.recover_member("unexpected token in class body"),
            }
        }
    }

    /// Role lookahead: Name [Properties] RoleOperator
    fn at_role(&self) -> bool {
        let mut n = 1;
        if self.nth(n) == SyntaxKind::L_PAREN {
            while !matches!(self.nth(n), SyntaxKind::R_PAREN | SyntaxKind::ERROR) {
                n += 1;
            }
            n += 1;
        }
        ROLE_OPERATORS.contains(&self.nth(n))
    }

    /// Attribute = Name [Properties] ':' ['MANDATORY'] Type [':=' Value] ';'
    fn parse_attribute(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE);
        self.parse_name();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        if self.expect(SyntaxKind::COLON) {
            self.eat(SyntaxKind::MANDATORY_KW);
            self.parse_type(ATTRIBUTE_TYPE_END);
        }
        if self.eat(SyntaxKind::COLON_EQ) {
            self.bump_balanced_until(&[SyntaxKind::SEMICOLON, SyntaxKind::END_KW]);
        }
        self.expect_member_end();
        self.finish_node();
    }

    /// Role = Name [Properties] RoleOperator [Cardinality] ['(' 'EXTERNAL' ')'] Path {'OR' Path} ';'
    fn parse_role(&mut self) {
        self.start_node(SyntaxKind::ROLE);
        self.parse_name();
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        self.bump();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_cardinality();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        self.parse_path();
        while self.eat(SyntaxKind::OR_KW) {
            self.parse_path();
        }
        if self.eat(SyntaxKind::COLON_EQ) {
            self.bump_balanced_until(&[SyntaxKind::SEMICOLON, SyntaxKind::END_KW]);
        }
        self.expect_member_end();
        self.finish_node();
    }

    /// CardinalityDecl = 'CARDINALITY' '=' Cardinality ';'
    fn parse_cardinality_decl(&mut self) {
        self.start_node(SyntaxKind::CARDINALITY_DECL);
        self.expect(SyntaxKind::CARDINALITY_KW);
        self.expect(SyntaxKind::EQ);
        self.parse_cardinality();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Constraint = ('MANDATORY' | 'CONSTRAINT' | 'UNIQUE' | ...) Expression ';'
    fn parse_constraint(&mut self) {
        self.start_node(SyntaxKind::CONSTRAINT);
        self.bump();
        self.bump_balanced_until(&[SyntaxKind::SEMICOLON, SyntaxKind::END_KW]);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Expect the `;` closing a member, skipping garbage left before it
    fn expect_member_end(&mut self) {
        if self.eat(SyntaxKind::SEMICOLON) {
            return;
        }
        if self.at_eof() || self.at_any(&[SyntaxKind::END_KW, SyntaxKind::IDENT]) {
            self.error("expected ';'");
            return;
        }
        self.error_recover(
            "expected ';'",
            &[SyntaxKind::SEMICOLON, SyntaxKind::END_KW, SyntaxKind::IDENT],
        );
        self.eat(SyntaxKind::SEMICOLON);
    }
}
