//! Logos-based lexer for INTERLIS 2
//!
//! Fast tokenization using the logos crate. Whitespace and comments are kept
//! as trivia tokens so the CST stays lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"!![^\n]*", priority = 2)]
    LineComment,

    #[regex(r"!!@[^\n]*", priority = 4)]
    MetaComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 2)]
    BlockComment,

    #[regex(r"/\*\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 4)]
    DocComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Decimal,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("-<#>")]
    CompositionRole,

    #[token("-<>")]
    AggregationRole,

    #[token("--")]
    AssocRole,

    #[token("..")]
    DotDot,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<>")]
    LtGt,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token(":=")]
    ColonEq,

    #[token("->")]
    Arrow,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("#")]
    Hash,
    #[token("~")]
    Tilde,
    #[token("@")]
    At,
    #[token("\\")]
    Backslash,

    // =========================================================================
    // KEYWORDS (reserved words are upper case and case sensitive)
    // =========================================================================
    #[token("INTERLIS")]
    InterlisKw,
    #[token("MODEL")]
    ModelKw,
    #[token("TYPE")]
    TypeKw,
    #[token("REFSYSTEM")]
    RefsystemKw,
    #[token("SYMBOLOGY")]
    SymbologyKw,
    #[token("CONTRACTED")]
    ContractedKw,
    #[token("TRANSLATION")]
    TranslationKw,
    #[token("END")]
    EndKw,
    #[token("AT")]
    AtKw,
    #[token("VERSION")]
    VersionKw,
    #[token("IMPORTS")]
    ImportsKw,
    #[token("UNQUALIFIED")]
    UnqualifiedKw,
    #[token("TOPIC")]
    TopicKw,
    #[token("CLASS")]
    ClassKw,
    #[token("STRUCTURE")]
    StructureKw,
    #[token("ASSOCIATION")]
    AssociationKw,
    #[token("ATTRIBUTE")]
    AttributeKw,
    #[token("PARAMETER")]
    ParameterKw,
    #[token("DOMAIN")]
    DomainKw,
    #[token("UNIT")]
    UnitKw,
    #[token("EXTENDS")]
    ExtendsKw,
    #[token("EXTENDED")]
    ExtendedKw,
    #[token("ABSTRACT")]
    AbstractKw,
    #[token("FINAL")]
    FinalKw,
    #[token("EXTERNAL")]
    ExternalKw,
    #[token("GENERIC")]
    GenericKw,
    #[token("CONCRETE")]
    ConcreteKw,
    #[token("OID")]
    OidKw,
    #[token("BASKET")]
    BasketKw,
    #[token("NO")]
    NoKw,
    #[token("AS")]
    AsKw,
    #[token("DEPENDS")]
    DependsKw,
    #[token("ON")]
    OnKw,
    #[token("TEXT")]
    TextKw,
    #[token("MTEXT")]
    MtextKw,
    #[token("NAME")]
    NameKw,
    #[token("URI")]
    UriKw,
    #[token("BOOLEAN")]
    BooleanKw,
    #[token("REFERENCE")]
    ReferenceKw,
    #[token("TO")]
    ToKw,
    #[token("BAG")]
    BagKw,
    #[token("LIST")]
    ListKw,
    #[token("OF")]
    OfKw,
    #[token("BLACKBOX")]
    BlackboxKw,
    #[token("BINARY")]
    BinaryKw,
    #[token("XML")]
    XmlKw,
    #[token("MANDATORY")]
    MandatoryKw,
    #[token("CONSTRAINT")]
    ConstraintKw,
    #[token("CONSTRAINTS")]
    ConstraintsKw,
    #[token("UNIQUE")]
    UniqueKw,
    #[token("EXISTENCE")]
    ExistenceKw,
    #[token("SET")]
    SetKw,
    #[token("CARDINALITY")]
    CardinalityKw,
    #[token("OR")]
    OrKw,
    #[token("VIEW")]
    ViewKw,
    #[token("GRAPHIC")]
    GraphicKw,
    #[token("FUNCTION")]
    FunctionKw,
    #[token("LINE")]
    LineKw,
    #[token("FORM")]
    FormKw,
    #[token("CONTEXT")]
    ContextKw,
    #[token("PARENT")]
    ParentKw,
    #[token("THIS")]
    ThisKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::MetaComment => SyntaxKind::META_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::DocComment => SyntaxKind::DOC_COMMENT,

            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::Decimal => SyntaxKind::DECIMAL,
            LogosToken::String => SyntaxKind::STRING,

            LogosToken::CompositionRole => SyntaxKind::COMPOSITION_ROLE,
            LogosToken::AggregationRole => SyntaxKind::AGGREGATION_ROLE,
            LogosToken::AssocRole => SyntaxKind::ASSOC_ROLE,
            LogosToken::DotDot => SyntaxKind::DOT_DOT,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtGt => SyntaxKind::LT_GT,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::ColonEq => SyntaxKind::COLON_EQ,
            LogosToken::Arrow => SyntaxKind::ARROW,

            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Hash => SyntaxKind::HASH,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::At => SyntaxKind::AT,
            LogosToken::Backslash => SyntaxKind::BACKSLASH,

            LogosToken::InterlisKw => SyntaxKind::INTERLIS_KW,
            LogosToken::ModelKw => SyntaxKind::MODEL_KW,
            LogosToken::TypeKw => SyntaxKind::TYPE_KW,
            LogosToken::RefsystemKw => SyntaxKind::REFSYSTEM_KW,
            LogosToken::SymbologyKw => SyntaxKind::SYMBOLOGY_KW,
            LogosToken::ContractedKw => SyntaxKind::CONTRACTED_KW,
            LogosToken::TranslationKw => SyntaxKind::TRANSLATION_KW,
            LogosToken::EndKw => SyntaxKind::END_KW,
            LogosToken::AtKw => SyntaxKind::AT_KW,
            LogosToken::VersionKw => SyntaxKind::VERSION_KW,
            LogosToken::ImportsKw => SyntaxKind::IMPORTS_KW,
            LogosToken::UnqualifiedKw => SyntaxKind::UNQUALIFIED_KW,
            LogosToken::TopicKw => SyntaxKind::TOPIC_KW,
            LogosToken::ClassKw => SyntaxKind::CLASS_KW,
            LogosToken::StructureKw => SyntaxKind::STRUCTURE_KW,
            LogosToken::AssociationKw => SyntaxKind::ASSOCIATION_KW,
            LogosToken::AttributeKw => SyntaxKind::ATTRIBUTE_KW,
            LogosToken::ParameterKw => SyntaxKind::PARAMETER_KW,
            LogosToken::DomainKw => SyntaxKind::DOMAIN_KW,
            LogosToken::UnitKw => SyntaxKind::UNIT_KW,
            LogosToken::ExtendsKw => SyntaxKind::EXTENDS_KW,
            LogosToken::ExtendedKw => SyntaxKind::EXTENDED_KW,
            LogosToken::AbstractKw => SyntaxKind::ABSTRACT_KW,
            LogosToken::FinalKw => SyntaxKind::FINAL_KW,
            LogosToken::ExternalKw => SyntaxKind::EXTERNAL_KW,
            LogosToken::GenericKw => SyntaxKind::GENERIC_KW,
            LogosToken::ConcreteKw => SyntaxKind::CONCRETE_KW,
            LogosToken::OidKw => SyntaxKind::OID_KW,
            LogosToken::BasketKw => SyntaxKind::BASKET_KW,
            LogosToken::NoKw => SyntaxKind::NO_KW,
            LogosToken::AsKw => SyntaxKind::AS_KW,
            LogosToken::DependsKw => SyntaxKind::DEPENDS_KW,
            LogosToken::OnKw => SyntaxKind::ON_KW,
            LogosToken::TextKw => SyntaxKind::TEXT_KW,
            LogosToken::MtextKw => SyntaxKind::MTEXT_KW,
            LogosToken::NameKw => SyntaxKind::NAME_KW,
            LogosToken::UriKw => SyntaxKind::URI_KW,
            LogosToken::BooleanKw => SyntaxKind::BOOLEAN_KW,
            LogosToken::ReferenceKw => SyntaxKind::REFERENCE_KW,
            LogosToken::ToKw => SyntaxKind::TO_KW,
            LogosToken::BagKw => SyntaxKind::BAG_KW,
            LogosToken::ListKw => SyntaxKind::LIST_KW,
            LogosToken::OfKw => SyntaxKind::OF_KW,
            LogosToken::BlackboxKw => SyntaxKind::BLACKBOX_KW,
            LogosToken::BinaryKw => SyntaxKind::BINARY_KW,
            LogosToken::XmlKw => SyntaxKind::XML_KW,
            LogosToken::MandatoryKw => SyntaxKind::MANDATORY_KW,
            LogosToken::ConstraintKw => SyntaxKind::CONSTRAINT_KW,
            LogosToken::ConstraintsKw => SyntaxKind::CONSTRAINTS_KW,
            LogosToken::UniqueKw => SyntaxKind::UNIQUE_KW,
            LogosToken::ExistenceKw => SyntaxKind::EXISTENCE_KW,
            LogosToken::SetKw => SyntaxKind::SET_KW,
            LogosToken::CardinalityKw => SyntaxKind::CARDINALITY_KW,
            LogosToken::OrKw => SyntaxKind::OR_KW,
            LogosToken::ViewKw => SyntaxKind::VIEW_KW,
            LogosToken::GraphicKw => SyntaxKind::GRAPHIC_KW,
            LogosToken::FunctionKw => SyntaxKind::FUNCTION_KW,
            LogosToken::LineKw => SyntaxKind::LINE_KW,
            LogosToken::FormKw => SyntaxKind::FORM_KW,
            LogosToken::ContextKw => SyntaxKind::CONTEXT_KW,
            LogosToken::ParentKw => SyntaxKind::PARENT_KW,
            LogosToken::ThisKw => SyntaxKind::THIS_KW,
        }
    }
}
