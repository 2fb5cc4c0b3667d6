//! File header, models, imports, unit and domain sections

use super::{MEMBER_RECOVERY, OPAQUE_BLOCK_KEYWORDS};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Tokens that can start a model definition
const MODEL_STARTS: &[SyntaxKind] = &[
    SyntaxKind::MODEL_KW,
    SyntaxKind::CONTRACTED_KW,
    SyntaxKind::TYPE_KW,
    SyntaxKind::REFSYSTEM_KW,
    SyntaxKind::SYMBOLOGY_KW,
];

/// Tokens ending a domain type
const DOMAIN_TYPE_END: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::CONSTRAINTS_KW,
    SyntaxKind::END_KW,
];

impl Parser<'_> {
    /// SourceFile = Header ModelDef*
    pub(crate) fn parse_source_file(&mut self) {
        self.start_root();

        if self.at(SyntaxKind::INTERLIS_KW) {
            self.parse_header();
        } else {
            self.error("expected 'INTERLIS 2.x;' header");
        }

        while !self.at_eof() {
            if self.at_any(MODEL_STARTS) {
                self.parse_model();
            } else {
                self.error_recover(
                    format!("expected model definition, found {:?}", self.current_kind()),
                    MODEL_STARTS,
                );
            }
        }

        self.finish_trivia();
        self.finish_node();
    }

    /// Header = 'INTERLIS' Version ';'
    fn parse_header(&mut self) {
        self.start_node(SyntaxKind::HEADER);
        self.expect(SyntaxKind::INTERLIS_KW);
        self.expect(SyntaxKind::DECIMAL);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// ModelDef = [CONTRACTED] [TYPE|REFSYSTEM|SYMBOLOGY] 'MODEL' Name ['(' Language ')']
    ///            ['AT' String] ['VERSION' String] [TranslationOf] '=' ModelBody 'END' Name '.'
    fn parse_model(&mut self) {
        self.start_node(SyntaxKind::MODEL);

        self.eat(SyntaxKind::CONTRACTED_KW);
        if self.at_any(&[
            SyntaxKind::TYPE_KW,
            SyntaxKind::REFSYSTEM_KW,
            SyntaxKind::SYMBOLOGY_KW,
        ]) {
            self.bump();
        }
        self.expect(SyntaxKind::MODEL_KW);
        if self.at(SyntaxKind::INTERLIS_KW) {
            self.parse_keyword_name();
        } else {
            self.parse_name();
        }

        if self.eat(SyntaxKind::L_PAREN) {
            self.expect(SyntaxKind::IDENT);
            self.expect(SyntaxKind::R_PAREN);
        }
        if self.eat(SyntaxKind::AT_KW) {
            self.expect(SyntaxKind::STRING);
        }
        if self.eat(SyntaxKind::VERSION_KW) {
            self.expect(SyntaxKind::STRING);
        }
        if self.at(SyntaxKind::TRANSLATION_KW) {
            self.parse_translation_of();
        }

        self.expect(SyntaxKind::EQ);
        self.parse_model_body();

        if self.expect(SyntaxKind::END_KW) {
            if self.at(SyntaxKind::INTERLIS_KW) {
                self.bump_remap(SyntaxKind::IDENT);
            } else {
                self.expect(SyntaxKind::IDENT);
            }
            self.expect(SyntaxKind::DOT);
        }
        self.finish_node();
    }

    /// TranslationOf = 'TRANSLATION' 'OF' Path ['[' String ']']
    fn parse_translation_of(&mut self) {
        self.start_node(SyntaxKind::TRANSLATION_OF);
        self.expect(SyntaxKind::TRANSLATION_KW);
        self.expect(SyntaxKind::OF_KW);
        self.parse_path();
        if self.eat(SyntaxKind::L_BRACKET) {
            self.expect(SyntaxKind::STRING);
            self.expect(SyntaxKind::R_BRACKET);
        }
        self.finish_node();
    }

    fn parse_model_body(&mut self) {
        while !self.at_eof() && !self.at(SyntaxKind::END_KW) {
            match self.current_kind() {
                SyntaxKind::IMPORTS_KW => self.parse_imports(),
                SyntaxKind::UNIT_KW => self.parse_unit_section(),
                SyntaxKind::DOMAIN_KW => self.parse_domain_section(),
                SyntaxKind::TOPIC_KW => self.parse_topic(),
                SyntaxKind::CLASS_KW | SyntaxKind::STRUCTURE_KW => self.parse_class(),
                SyntaxKind::ASSOCIATION_KW => self.parse_association(),
                kind if OPAQUE_BLOCK_KEYWORDS.contains(&kind) => self.parse_opaque_block(),
                SyntaxKind::CONSTRAINTS_KW if self.nth(1) == SyntaxKind::OF_KW => {
                    self.parse_opaque_block()
                }
                kind if kind.is_keyword() => self.parse_opaque_statement(),
                _ => self.recover_member("unexpected token in model"),
            }
        }
    }

    /// Imports = 'IMPORTS' ImportItem {',' ImportItem} ';'
    fn parse_imports(&mut self) {
        self.start_node(SyntaxKind::IMPORTS);
        self.expect(SyntaxKind::IMPORTS_KW);

        loop {
            self.start_node(SyntaxKind::IMPORT_ITEM);
            self.eat(SyntaxKind::UNQUALIFIED_KW);
            self.parse_path();
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }

        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// UnitSection = 'UNIT' UnitDef*
    fn parse_unit_section(&mut self) {
        self.start_node(SyntaxKind::UNIT_SECTION);
        self.expect(SyntaxKind::UNIT_KW);
        while self.at(SyntaxKind::IDENT) {
            self.parse_unit_def();
        }
        self.finish_node();
    }

    /// UnitDef = Name [Properties] ['[' ShortName ']'] [Extends] ['=' Expression] ';'
    fn parse_unit_def(&mut self) {
        self.start_node(SyntaxKind::UNIT_DEF);
        self.parse_name();

        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        if self.eat(SyntaxKind::L_BRACKET) {
            self.parse_name();
            self.expect(SyntaxKind::R_BRACKET);
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.parse_extends_clause();
        }
        if self.eat(SyntaxKind::EQ) {
            self.bump_balanced_until(&[SyntaxKind::SEMICOLON, SyntaxKind::END_KW]);
        }

        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// DomainSection = 'DOMAIN' DomainDef*
    pub(crate) fn parse_domain_section(&mut self) {
        self.start_node(SyntaxKind::DOMAIN_SECTION);
        self.expect(SyntaxKind::DOMAIN_KW);
        while self.at_definition_name() {
            self.parse_domain_def();
        }
        self.finish_node();
    }

    /// DomainDef = Name [Properties] [Extends] '=' ['MANDATORY'] Type [DomainConstraints] ';'
    fn parse_domain_def(&mut self) {
        self.start_node(SyntaxKind::DOMAIN_DEF);
        self.parse_name();

        if self.at(SyntaxKind::L_PAREN) {
            self.parse_properties();
        }
        if self.at(SyntaxKind::EXTENDS_KW) {
            self.parse_extends_clause();
        }

        self.expect(SyntaxKind::EQ);
        self.eat(SyntaxKind::MANDATORY_KW);
        self.parse_type(DOMAIN_TYPE_END);

        if self.at(SyntaxKind::CONSTRAINTS_KW) {
            self.parse_domain_constraints();
        }

        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// DomainConstraints = 'CONSTRAINTS' DomainConstraint {',' DomainConstraint}
    fn parse_domain_constraints(&mut self) {
        self.start_node(SyntaxKind::DOMAIN_CONSTRAINTS);
        self.expect(SyntaxKind::CONSTRAINTS_KW);

        loop {
            self.start_node(SyntaxKind::DOMAIN_CONSTRAINT);
            self.parse_name();
            self.expect(SyntaxKind::COLON);
            self.bump_balanced_until(&[
                SyntaxKind::COMMA,
                SyntaxKind::SEMICOLON,
                SyntaxKind::END_KW,
            ]);
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }

        self.finish_node();
    }

    /// Skip one malformed member: everything up to and including the next `;`
    pub(crate) fn recover_member(&mut self, message: &str) {
        self.error(format!("{message}: {:?}", self.current_kind()));
        self.start_node(SyntaxKind::ERROR);
        let mut consumed = false;
        while !self.at_eof() {
            if self.at(SyntaxKind::SEMICOLON) {
                self.bump();
                break;
            }
            if consumed && self.at_any(MEMBER_RECOVERY) {
                break;
            }
            self.bump();
            consumed = true;
        }
        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, parse};

    fn child_kinds(input: &str, kind: SyntaxKind) -> Vec<SyntaxKind> {
        let root = parse(input).syntax();
        root.descendants()
            .find(|n| n.kind() == kind)
            .map(|n| n.children().map(|c| c.kind()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_model_with_imports_and_sections() {
        let input = "INTERLIS 2.4;\nMODEL M (en) AT \"http://x\" VERSION \"1\" =\n\
                     IMPORTS UNQUALIFIED Units, Other;\n\
                     UNIT Meter [m];\n\
                     DOMAIN D = TEXT*10;\n\
                     END M.\n";
        let parse = parse(input);
        assert!(parse.ok(), "{:?}", parse.errors);
        assert_eq!(
            child_kinds(input, SyntaxKind::MODEL),
            vec![
                SyntaxKind::NAME,
                SyntaxKind::IMPORTS,
                SyntaxKind::UNIT_SECTION,
                SyntaxKind::DOMAIN_SECTION,
            ]
        );
        assert_eq!(
            child_kinds(input, SyntaxKind::IMPORTS),
            vec![SyntaxKind::IMPORT_ITEM, SyntaxKind::IMPORT_ITEM]
        );
    }

    #[test]
    fn test_unit_with_short_name_and_expression() {
        let input = "INTERLIS 2.4; MODEL M = UNIT Kilometer [km] = 1000 [m]; Angle (ABSTRACT); END M.";
        let parse = parse(input);
        assert!(parse.ok(), "{:?}", parse.errors);
        assert_eq!(
            child_kinds(input, SyntaxKind::UNIT_SECTION),
            vec![SyntaxKind::UNIT_DEF, SyntaxKind::UNIT_DEF]
        );
    }

    #[test]
    fn test_domain_constraints() {
        let input = "INTERLIS 2.4; MODEL M = DOMAIN D = 0 .. 10 CONSTRAINTS a: THIS > 1, b: THIS < 9; END M.";
        let parse = parse(input);
        assert!(parse.ok(), "{:?}", parse.errors);
        assert_eq!(
            child_kinds(input, SyntaxKind::DOMAIN_CONSTRAINTS),
            vec![SyntaxKind::DOMAIN_CONSTRAINT, SyntaxKind::DOMAIN_CONSTRAINT]
        );
    }

    #[test]
    fn test_keywords_as_builtin_names() {
        let input = "INTERLIS 2.4; TYPE MODEL INTERLIS = DOMAIN BOOLEAN = BOOLEAN; NAME = TEXT*255; END INTERLIS.";
        let parse = parse(input);
        assert!(parse.ok(), "{:?}", parse.errors);
        assert_eq!(
            child_kinds(input, SyntaxKind::DOMAIN_SECTION),
            vec![SyntaxKind::DOMAIN_DEF, SyntaxKind::DOMAIN_DEF]
        );
    }

    #[test]
    fn test_translation_of() {
        let input = "INTERLIS 2.4; MODEL M_de (de) AT \"x\" VERSION \"1\" TRANSLATION OF M [\"1\"] = END M_de.";
        let parse = parse(input);
        assert!(parse.ok(), "{:?}", parse.errors);
        assert!(child_kinds(input, SyntaxKind::MODEL).contains(&SyntaxKind::TRANSLATION_OF));
    }

    #[test]
    fn test_unknown_model_member_is_error_node() {
        let input = "INTERLIS 2.4; MODEL M = 42 x; END M.";
        let parse = parse(input);
        assert!(!parse.ok());
        assert!(child_kinds(input, SyntaxKind::MODEL).contains(&SyntaxKind::ERROR));
    }
}
