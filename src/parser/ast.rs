//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for INTERLIS syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros and functions
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn children<'a, N: AstNode + 'a>(node: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    node.children().filter_map(N::cast)
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    token(node, kind).is_some()
}

/// Direct non-trivia tokens of a node
fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

/// Strip the quotes of a string literal
fn unquote(text: &str) -> SmolStr {
    SmolStr::new(
        text.strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text),
    )
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn header(&self) -> Option<Header> {
        child(&self.0)
    }

    pub fn models(&self) -> impl Iterator<Item = Model> + '_ {
        children(&self.0)
    }
}

ast_node!(Header, HEADER);

impl Header {
    /// The schema language version, e.g. `2.4`
    pub fn version(&self) -> Option<SmolStr> {
        token(&self.0, SyntaxKind::DECIMAL).map(|t| SmolStr::new(t.text()))
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::IDENT)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.ident().map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(Path, PATH);

impl Path {
    /// Segment tokens in source order (dots excluded)
    pub fn segment_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        significant_tokens(&self.0).filter(|t| t.kind() != SyntaxKind::DOT)
    }

    pub fn segments(&self) -> Vec<SmolStr> {
        self.segment_tokens()
            .map(|t| SmolStr::new(t.text()))
            .collect()
    }
}

ast_node!(Properties, PROPERTIES);

impl Properties {
    pub fn keywords(&self) -> Vec<SmolStr> {
        significant_tokens(&self.0)
            .filter(|t| t.kind().is_keyword() || t.kind() == SyntaxKind::IDENT)
            .map(|t| SmolStr::new(t.text()))
            .collect()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords().iter().any(|k| k == keyword)
    }
}

ast_node!(ExtendsClause, EXTENDS_CLAUSE);

impl ExtendsClause {
    pub fn path(&self) -> Option<Path> {
        child(&self.0)
    }
}

ast_node!(Cardinality, CARDINALITY);

impl Cardinality {
    /// Lower and upper bound; `None` stands for `*`.
    ///
    /// `{n}` is shorthand for `{n..n}`.
    pub fn bounds(&self) -> (Option<u64>, Option<u64>) {
        let bounds: Vec<Option<u64>> = significant_tokens(&self.0)
            .filter(|t| matches!(t.kind(), SyntaxKind::INTEGER | SyntaxKind::STAR))
            .map(|t| t.text().parse::<u64>().ok())
            .collect();
        match bounds.as_slice() {
            [single] => (*single, *single),
            [min, max, ..] => (*min, *max),
            [] => (None, None),
        }
    }
}

// ============================================================================
// Model
// ============================================================================

ast_node!(Model, MODEL);

/// Any member of a model or topic body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Imports(Imports),
    UnitSection(UnitSection),
    DomainSection(DomainSection),
    Topic(Topic),
    Class(Class),
    Association(Association),
    OidDecl(OidDecl),
    DependsOn(DependsOn),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::IMPORTS
                | SyntaxKind::UNIT_SECTION
                | SyntaxKind::DOMAIN_SECTION
                | SyntaxKind::TOPIC
                | SyntaxKind::CLASS
                | SyntaxKind::ASSOCIATION
                | SyntaxKind::OID_DECL
                | SyntaxKind::DEPENDS_ON
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IMPORTS => Some(Self::Imports(Imports(node))),
            SyntaxKind::UNIT_SECTION => Some(Self::UnitSection(UnitSection(node))),
            SyntaxKind::DOMAIN_SECTION => Some(Self::DomainSection(DomainSection(node))),
            SyntaxKind::TOPIC => Some(Self::Topic(Topic(node))),
            SyntaxKind::CLASS => Some(Self::Class(Class(node))),
            SyntaxKind::ASSOCIATION => Some(Self::Association(Association(node))),
            SyntaxKind::OID_DECL => Some(Self::OidDecl(OidDecl(node))),
            SyntaxKind::DEPENDS_ON => Some(Self::DependsOn(DependsOn(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Imports(n) => n.syntax(),
            Self::UnitSection(n) => n.syntax(),
            Self::DomainSection(n) => n.syntax(),
            Self::Topic(n) => n.syntax(),
            Self::Class(n) => n.syntax(),
            Self::Association(n) => n.syntax(),
            Self::OidDecl(n) => n.syntax(),
            Self::DependsOn(n) => n.syntax(),
        }
    }
}

impl Model {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    /// Language tag from `MODEL M (de)`
    pub fn language(&self) -> Option<SmolStr> {
        let mut tokens = significant_tokens(&self.0);
        tokens.find(|t| t.kind() == SyntaxKind::L_PAREN)?;
        tokens
            .next()
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| SmolStr::new(t.text()))
    }

    /// Issuer from `AT "..."`
    pub fn issuer(&self) -> Option<SmolStr> {
        self.string_after(SyntaxKind::AT_KW)
    }

    /// Version from `VERSION "..."`
    pub fn version(&self) -> Option<SmolStr> {
        self.string_after(SyntaxKind::VERSION_KW)
    }

    fn string_after(&self, keyword: SyntaxKind) -> Option<SmolStr> {
        let mut tokens = significant_tokens(&self.0);
        tokens.find(|t| t.kind() == keyword)?;
        tokens
            .next()
            .filter(|t| t.kind() == SyntaxKind::STRING)
            .map(|t| unquote(t.text()))
    }

    pub fn translation_of(&self) -> Option<Path> {
        child::<TranslationOf>(&self.0).and_then(|t| child(&t.0))
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        children(&self.0)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportItem> + '_ {
        children::<Imports>(&self.0).flat_map(|i| i.items().collect::<Vec<_>>())
    }
}

ast_node!(TranslationOf, TRANSLATION_OF);

ast_node!(Imports, IMPORTS);

impl Imports {
    pub fn items(&self) -> impl Iterator<Item = ImportItem> + '_ {
        children(&self.0)
    }
}

ast_node!(ImportItem, IMPORT_ITEM);

impl ImportItem {
    pub fn is_unqualified(&self) -> bool {
        has_token(&self.0, SyntaxKind::UNQUALIFIED_KW)
    }

    pub fn path(&self) -> Option<Path> {
        child(&self.0)
    }
}

// ============================================================================
// Units and domains
// ============================================================================

ast_node!(UnitSection, UNIT_SECTION);

impl UnitSection {
    pub fn units(&self) -> impl Iterator<Item = UnitDef> + '_ {
        children(&self.0)
    }
}

ast_node!(UnitDef, UNIT_DEF);

impl UnitDef {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    /// The short name written in brackets, e.g. `m` in `Meter [m]`
    pub fn short_name(&self) -> Option<Name> {
        children::<Name>(&self.0).nth(1)
    }

    pub fn is_abstract(&self) -> bool {
        child::<Properties>(&self.0).is_some_and(|p| p.contains("ABSTRACT"))
    }

    pub fn extends(&self) -> Option<Path> {
        child::<ExtendsClause>(&self.0).and_then(|e| e.path())
    }
}

ast_node!(DomainSection, DOMAIN_SECTION);

impl DomainSection {
    pub fn domains(&self) -> impl Iterator<Item = DomainDef> + '_ {
        children(&self.0)
    }
}

ast_node!(DomainDef, DOMAIN_DEF);

impl DomainDef {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn properties(&self) -> Option<Properties> {
        child(&self.0)
    }

    pub fn extends(&self) -> Option<Path> {
        child::<ExtendsClause>(&self.0).and_then(|e| e.path())
    }

    pub fn is_mandatory(&self) -> bool {
        has_token(&self.0, SyntaxKind::MANDATORY_KW)
    }

    pub fn ty(&self) -> Option<Type> {
        child(&self.0)
    }
}

// ============================================================================
// Topic and class-like definitions
// ============================================================================

ast_node!(Topic, TOPIC);

impl Topic {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn properties(&self) -> Option<Properties> {
        child(&self.0)
    }

    pub fn extends(&self) -> Option<Path> {
        child::<ExtendsClause>(&self.0).and_then(|e| e.path())
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        children(&self.0)
    }
}

ast_node!(OidDecl, OID_DECL);

impl OidDecl {
    pub fn is_basket(&self) -> bool {
        has_token(&self.0, SyntaxKind::BASKET_KW)
    }

    pub fn path(&self) -> Option<Path> {
        child(&self.0)
    }
}

ast_node!(DependsOn, DEPENDS_ON);

impl DependsOn {
    pub fn paths(&self) -> impl Iterator<Item = Path> + '_ {
        children(&self.0)
    }
}

ast_node!(Class, CLASS);

impl Class {
    pub fn is_structure(&self) -> bool {
        has_token(&self.0, SyntaxKind::STRUCTURE_KW)
    }

    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn properties(&self) -> Option<Properties> {
        child(&self.0)
    }

    pub fn extends(&self) -> Option<Path> {
        child::<ExtendsClause>(&self.0).and_then(|e| e.path())
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        children(&self.0)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        children(&self.0)
    }

    pub fn oid(&self) -> Option<OidDecl> {
        child(&self.0)
    }
}

ast_node!(Association, ASSOCIATION);

impl Association {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn properties(&self) -> Option<Properties> {
        child(&self.0)
    }

    pub fn extends(&self) -> Option<Path> {
        child::<ExtendsClause>(&self.0).and_then(|e| e.path())
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        children(&self.0)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        children(&self.0)
    }

    pub fn cardinality(&self) -> Option<Cardinality> {
        child::<CardinalityDecl>(&self.0).and_then(|c| child(&c.0))
    }
}

ast_node!(CardinalityDecl, CARDINALITY_DECL);

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn properties(&self) -> Option<Properties> {
        child(&self.0)
    }

    pub fn is_mandatory(&self) -> bool {
        has_token(&self.0, SyntaxKind::MANDATORY_KW)
    }

    pub fn ty(&self) -> Option<Type> {
        child(&self.0)
    }
}

/// The operator of a role declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleOperator {
    /// `--`
    Association,
    /// `-<>`
    Aggregation,
    /// `-<#>`
    Composition,
}

ast_node!(Role, ROLE);

impl Role {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn operator(&self) -> Option<RoleOperator> {
        significant_tokens(&self.0).find_map(|t| match t.kind() {
            SyntaxKind::ASSOC_ROLE => Some(RoleOperator::Association),
            SyntaxKind::AGGREGATION_ROLE => Some(RoleOperator::Aggregation),
            SyntaxKind::COMPOSITION_ROLE => Some(RoleOperator::Composition),
            _ => None,
        })
    }

    pub fn cardinality(&self) -> Option<Cardinality> {
        child(&self.0)
    }

    pub fn is_external(&self) -> bool {
        children::<Properties>(&self.0).any(|p| p.contains("EXTERNAL"))
    }

    pub fn targets(&self) -> impl Iterator<Item = Path> + '_ {
        children(&self.0)
    }
}

// ============================================================================
// Types
// ============================================================================

/// Any attribute or domain type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Text(TextType),
    Numeric(NumericType),
    Boolean(BooleanType),
    Enum(EnumType),
    Reference(ReferenceType),
    List(ListType),
    Blackbox(BlackboxType),
    TypeRef(TypeRef),
    Opaque(OpaqueType),
}

impl AstNode for Type {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::TEXT_TYPE
                | SyntaxKind::NUMERIC_TYPE
                | SyntaxKind::BOOLEAN_TYPE
                | SyntaxKind::ENUM_TYPE
                | SyntaxKind::REFERENCE_TYPE
                | SyntaxKind::LIST_TYPE
                | SyntaxKind::BLACKBOX_TYPE
                | SyntaxKind::TYPE_REF
                | SyntaxKind::OPAQUE_TYPE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::TEXT_TYPE => Some(Self::Text(TextType(node))),
            SyntaxKind::NUMERIC_TYPE => Some(Self::Numeric(NumericType(node))),
            SyntaxKind::BOOLEAN_TYPE => Some(Self::Boolean(BooleanType(node))),
            SyntaxKind::ENUM_TYPE => Some(Self::Enum(EnumType(node))),
            SyntaxKind::REFERENCE_TYPE => Some(Self::Reference(ReferenceType(node))),
            SyntaxKind::LIST_TYPE => Some(Self::List(ListType(node))),
            SyntaxKind::BLACKBOX_TYPE => Some(Self::Blackbox(BlackboxType(node))),
            SyntaxKind::TYPE_REF => Some(Self::TypeRef(TypeRef(node))),
            SyntaxKind::OPAQUE_TYPE => Some(Self::Opaque(OpaqueType(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Text(n) => n.syntax(),
            Self::Numeric(n) => n.syntax(),
            Self::Boolean(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
            Self::Reference(n) => n.syntax(),
            Self::List(n) => n.syntax(),
            Self::Blackbox(n) => n.syntax(),
            Self::TypeRef(n) => n.syntax(),
            Self::Opaque(n) => n.syntax(),
        }
    }
}

ast_node!(TextType, TEXT_TYPE);

impl TextType {
    /// `TEXT`, `MTEXT`, `NAME` or `URI`
    pub fn keyword(&self) -> Option<SyntaxKind> {
        significant_tokens(&self.0)
            .map(|t| t.kind())
            .find(|k| k.is_keyword())
    }

    pub fn length(&self) -> Option<u64> {
        token(&self.0, SyntaxKind::INTEGER).and_then(|t| t.text().parse().ok())
    }
}

ast_node!(NumericType, NUMERIC_TYPE);

impl NumericType {
    /// Lower and upper bound as written, sign included
    pub fn bounds(&self) -> (Option<SmolStr>, Option<SmolStr>) {
        let mut bounds = Vec::new();
        let mut negative = false;
        for token in significant_tokens(&self.0) {
            match token.kind() {
                SyntaxKind::MINUS => negative = true,
                SyntaxKind::INTEGER | SyntaxKind::DECIMAL => {
                    let sign = if negative { "-" } else { "" };
                    bounds.push(SmolStr::new(format!("{sign}{}", token.text())));
                    negative = false;
                }
                _ => {}
            }
        }
        let mut bounds = bounds.into_iter();
        (bounds.next(), bounds.next())
    }

    pub fn unit(&self) -> Option<Path> {
        child(&self.0)
    }
}

ast_node!(BooleanType, BOOLEAN_TYPE);

ast_node!(EnumType, ENUM_TYPE);

impl EnumType {
    pub fn elements(&self) -> impl Iterator<Item = EnumElement> + '_ {
        children(&self.0)
    }

    /// `(a, b : FINAL)`
    pub fn is_final(&self) -> bool {
        has_token(&self.0, SyntaxKind::FINAL_KW)
    }

    /// Number of elements, used by the formatter to decide on line breaks
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }
}

ast_node!(EnumElement, ENUM_ELEMENT);

impl EnumElement {
    pub fn name(&self) -> Option<Name> {
        child(&self.0)
    }

    pub fn sub_enum(&self) -> Option<EnumType> {
        child(&self.0)
    }

    /// `a FINAL`
    pub fn is_final(&self) -> bool {
        has_token(&self.0, SyntaxKind::FINAL_KW)
    }
}

ast_node!(ReferenceType, REFERENCE_TYPE);

impl ReferenceType {
    pub fn is_external(&self) -> bool {
        child::<Properties>(&self.0).is_some_and(|p| p.contains("EXTERNAL"))
    }

    pub fn targets(&self) -> impl Iterator<Item = Path> + '_ {
        children(&self.0)
    }
}

ast_node!(ListType, LIST_TYPE);

impl ListType {
    /// `LIST` is ordered, `BAG` is not
    pub fn is_ordered(&self) -> bool {
        has_token(&self.0, SyntaxKind::LIST_KW)
    }

    pub fn cardinality(&self) -> Option<Cardinality> {
        child(&self.0)
    }

    pub fn target(&self) -> Option<Path> {
        child(&self.0)
    }
}

ast_node!(BlackboxType, BLACKBOX_TYPE);

impl BlackboxType {
    pub fn is_xml(&self) -> bool {
        has_token(&self.0, SyntaxKind::XML_KW)
    }
}

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    pub fn path(&self) -> Option<Path> {
        child(&self.0)
    }
}

ast_node!(OpaqueType, OPAQUE_TYPE);
