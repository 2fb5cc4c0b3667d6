//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the INTERLIS 2 reference manual grammar structure.

/// All syntax kinds (tokens and nodes) in INTERLIS 2
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (models, topics, classes, attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,       // !! comment
    META_COMMENT,       // !!@ name = value
    BLOCK_COMMENT,      // /* comment */
    DOC_COMMENT,        // /** documentation */

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    INTEGER,
    DECIMAL,
    STRING,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_BRACE,            // {
    R_BRACE,            // }
    SEMICOLON,          // ;
    COLON,              // :
    COMMA,              // ,
    DOT,                // .
    DOT_DOT,            // ..
    EQ,                 // =
    EQ_EQ,              // ==
    BANG_EQ,            // !=
    LT_GT,              // <>
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    COLON_EQ,           // :=
    ARROW,              // ->
    ASSOC_ROLE,         // --
    AGGREGATION_ROLE,   // -<>
    COMPOSITION_ROLE,   // -<#>
    STAR,               // *
    PLUS,               // +
    MINUS,              // -
    SLASH,              // /
    PERCENT,            // %
    HASH,               // #
    TILDE,              // ~
    AT,                 // @
    BACKSLASH,          // \
    // =========================================================================
    // KEYWORDS
    // =========================================================================
    INTERLIS_KW,
    MODEL_KW,
    TYPE_KW,
    REFSYSTEM_KW,
    SYMBOLOGY_KW,
    CONTRACTED_KW,
    TRANSLATION_KW,
    END_KW,
    AT_KW,
    VERSION_KW,
    IMPORTS_KW,
    UNQUALIFIED_KW,
    TOPIC_KW,
    CLASS_KW,
    STRUCTURE_KW,
    ASSOCIATION_KW,
    ATTRIBUTE_KW,
    PARAMETER_KW,
    DOMAIN_KW,
    UNIT_KW,
    EXTENDS_KW,
    EXTENDED_KW,
    ABSTRACT_KW,
    FINAL_KW,
    EXTERNAL_KW,
    GENERIC_KW,
    CONCRETE_KW,
    OID_KW,
    BASKET_KW,
    NO_KW,
    AS_KW,
    DEPENDS_KW,
    ON_KW,
    TEXT_KW,
    MTEXT_KW,
    NAME_KW,
    URI_KW,
    BOOLEAN_KW,
    REFERENCE_KW,
    TO_KW,
    BAG_KW,
    LIST_KW,
    OF_KW,
    BLACKBOX_KW,
    BINARY_KW,
    XML_KW,
    MANDATORY_KW,
    CONSTRAINT_KW,
    CONSTRAINTS_KW,
    UNIQUE_KW,
    EXISTENCE_KW,
    SET_KW,
    CARDINALITY_KW,
    OR_KW,
    VIEW_KW,
    GRAPHIC_KW,
    FUNCTION_KW,
    LINE_KW,
    FORM_KW,
    CONTEXT_KW,
    PARENT_KW,
    THIS_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    SOURCE_FILE,
    HEADER,
    MODEL,
    TRANSLATION_OF,
    IMPORTS,
    IMPORT_ITEM,
    PATH,
    NAME,
    PROPERTIES,
    EXTENDS_CLAUSE,
    UNIT_SECTION,
    UNIT_DEF,
    DOMAIN_SECTION,
    DOMAIN_DEF,
    DOMAIN_CONSTRAINTS,
    DOMAIN_CONSTRAINT,
    TOPIC,
    OID_DECL,
    DEPENDS_ON,
    CLASS,
    ASSOCIATION,
    ATTRIBUTE,
    ROLE,
    CARDINALITY,
    CARDINALITY_DECL,
    CONSTRAINT,
    // Attribute types
    TEXT_TYPE,
    NUMERIC_TYPE,
    BOOLEAN_TYPE,
    ENUM_TYPE,
    ENUM_ELEMENT,
    REFERENCE_TYPE,
    LIST_TYPE,
    BLACKBOX_TYPE,
    TYPE_REF,
    OPAQUE_TYPE,
    // Constructs kept as plain token runs
    OPAQUE_STATEMENT,
    OPAQUE_BLOCK,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE) || self.is_comment()
    }

    /// Check if this is a comment of any kind
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            Self::LINE_COMMENT | Self::META_COMMENT | Self::BLOCK_COMMENT | Self::DOC_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::INTERLIS_KW as u16) && (self as u16) <= (Self::THIS_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::BACKSLASH as u16)
    }

    /// Check if this kind is a composite node rather than a token
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::SOURCE_FILE as u16) && (self as u16) <= (Self::ERROR as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InterlisLanguage {}

impl rowan::Language for InterlisLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<InterlisLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<InterlisLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<InterlisLanguage>;
