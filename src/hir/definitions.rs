//! Definitions of the AST model
//!
//! A [`Definition`] carries the fields every named element has (name,
//! parent, source range, meta attributes, named children) and a closed
//! [`DefData`] variant with what is specific to its kind.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ids::{LocalDefId, LocalRefId};
use super::types::{Cardinality, TypeDef};
use crate::base::Span;

/// The kind of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefKind {
    Model,
    Topic,
    /// Classes and structures
    Class,
    Association,
    /// Attributes and association roles
    Attribute,
    Domain,
    EnumerationValue,
    Unit,
}

impl DefKind {
    /// Human-readable name for diagnostics
    pub fn display(&self) -> &'static str {
        match self {
            DefKind::Model => "model",
            DefKind::Topic => "topic",
            DefKind::Class => "class",
            DefKind::Association => "association",
            DefKind::Attribute => "attribute",
            DefKind::Domain => "domain",
            DefKind::EnumerationValue => "enumeration value",
            DefKind::Unit => "unit",
        }
    }

    /// Kinds that live in the namespace of types, topics and models.
    /// Attributes and enumeration values are only reachable through a path.
    pub fn is_element(&self) -> bool {
        !matches!(self, DefKind::Attribute | DefKind::EnumerationValue)
    }
}

/// Modifiers written in a property list, e.g. `CLASS A (ABSTRACT)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub is_abstract: bool,
    pub is_extended: bool,
    pub is_final: bool,
    pub is_external: bool,
}

/// An `IMPORTS` entry of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Import {
    pub model: LocalRefId,
    pub unqualified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelData {
    /// `INTERLIS x.y` of the declaring file
    pub schema_version: Option<SmolStr>,
    /// The `(de)` language tag
    pub language: Option<SmolStr>,
    /// `AT "..."`
    pub issuer: Option<SmolStr>,
    /// `VERSION "..."`
    pub version: Option<SmolStr>,
    pub translation_of: Option<LocalRefId>,
    pub imports: Vec<Import>,
    pub source_uri: Option<SmolStr>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicData {
    pub modifiers: Modifiers,
    pub extends: Option<LocalRefId>,
    pub depends_on: Vec<LocalRefId>,
    pub oid: Option<LocalRefId>,
    pub basket_oid: Option<LocalRefId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassData {
    pub is_structure: bool,
    pub modifiers: Modifiers,
    pub extends: Option<LocalRefId>,
    pub oid: Option<LocalRefId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationData {
    pub modifiers: Modifiers,
    pub extends: Option<LocalRefId>,
    pub cardinality: Option<Cardinality>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeData {
    pub ty: TypeDef,
    pub is_mandatory: bool,
    pub cardinality: Option<Cardinality>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainData {
    pub ty: TypeDef,
    pub is_mandatory: bool,
    pub modifiers: Modifiers,
    pub extends: Option<LocalRefId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitData {
    /// `[m]`
    pub short_name: Option<SmolStr>,
    pub modifiers: Modifiers,
    pub extends: Option<LocalRefId>,
}

/// Kind-specific data of a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefData {
    Model(ModelData),
    Topic(TopicData),
    Class(ClassData),
    Association(AssociationData),
    Attribute(AttributeData),
    Domain(DomainData),
    EnumerationValue { is_final: bool },
    Unit(UnitData),
}

impl DefData {
    pub fn kind(&self) -> DefKind {
        match self {
            DefData::Model(_) => DefKind::Model,
            DefData::Topic(_) => DefKind::Topic,
            DefData::Class(_) => DefKind::Class,
            DefData::Association(_) => DefKind::Association,
            DefData::Attribute(_) => DefKind::Attribute,
            DefData::Domain(_) => DefKind::Domain,
            DefData::EnumerationValue { .. } => DefKind::EnumerationValue,
            DefData::Unit(_) => DefKind::Unit,
        }
    }

    /// Every reference held by this definition, in source order
    pub fn references(&self) -> Vec<LocalRefId> {
        match self {
            DefData::Model(model) => model
                .translation_of
                .iter()
                .copied()
                .chain(model.imports.iter().map(|import| import.model))
                .collect(),
            DefData::Topic(topic) => topic
                .extends
                .iter()
                .chain(&topic.basket_oid)
                .chain(&topic.oid)
                .chain(&topic.depends_on)
                .copied()
                .collect(),
            DefData::Class(class) => class.extends.iter().chain(&class.oid).copied().collect(),
            DefData::Association(association) => association.extends.iter().copied().collect(),
            DefData::Attribute(attribute) => attribute.ty.references(),
            DefData::Domain(domain) => domain
                .extends
                .iter()
                .copied()
                .chain(domain.ty.references())
                .collect(),
            DefData::EnumerationValue { .. } => Vec::new(),
            DefData::Unit(unit) => unit.extends.iter().copied().collect(),
        }
    }
}

/// A named element of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: SmolStr,
    pub parent: Option<LocalDefId>,
    /// Range of the whole definition
    pub span: Span,
    /// Range of the name, the target of go-to-definition
    pub name_span: Span,
    /// `!!@ key = value` comments directly preceding the definition
    pub meta_attributes: IndexMap<SmolStr, SmolStr>,
    /// Direct children by name, in declaration order
    pub content: IndexMap<SmolStr, LocalDefId>,
    pub data: DefData,
}

impl Definition {
    pub fn kind(&self) -> DefKind {
        self.data.kind()
    }

    /// Classes declared with `STRUCTURE`
    pub fn is_structure(&self) -> bool {
        matches!(&self.data, DefData::Class(class) if class.is_structure)
    }

    /// The type of attributes and domains
    pub fn type_def(&self) -> Option<&TypeDef> {
        match &self.data {
            DefData::Attribute(attribute) => Some(&attribute.ty),
            DefData::Domain(domain) => Some(&domain.ty),
            _ => None,
        }
    }

    /// The `EXTENDS` reference, if any
    pub fn extends(&self) -> Option<LocalRefId> {
        match &self.data {
            DefData::Topic(topic) => topic.extends,
            DefData::Class(class) => class.extends,
            DefData::Association(association) => association.extends,
            DefData::Domain(domain) => domain.extends,
            DefData::Unit(unit) => unit.extends,
            _ => None,
        }
    }
}
