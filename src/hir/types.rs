//! Attribute and domain types

use smol_str::SmolStr;

use super::ids::LocalRefId;

/// Occurrence bounds; `None` as maximum means unbounded (`*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl Cardinality {
    pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound = |b: Option<u64>| b.map_or_else(|| "*".to_string(), |n| n.to_string());
        if self.min == self.max {
            write!(f, "{{{}}}", bound(self.min))
        } else {
            write!(f, "{{{}..{}}}", bound(self.min), bound(self.max))
        }
    }
}

/// The kind of an association role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    /// `--`
    Association,
    /// `-<>`
    Aggregation,
    /// `-<#>`
    Composition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Text,
    MText,
    Name,
    Uri,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlackboxKind {
    Binary,
    Xml,
}

/// One value of an enumeration, with its sub-values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumNode {
    pub name: SmolStr,
    pub children: Vec<EnumNode>,
    pub is_final: bool,
}

impl EnumNode {
    /// Leaf values in declaration order, written as dotted paths
    /// (`green.light`)
    pub fn leaves(&self) -> Vec<String> {
        if self.children.is_empty() {
            return vec![self.name.to_string()];
        }
        self.children
            .iter()
            .flat_map(EnumNode::leaves)
            .map(|leaf| format!("{}.{leaf}", self.name))
            .collect()
    }
}

/// The type of an attribute or domain.
///
/// Symbolic parts are held as references into the arena of the defining
/// file and are bound during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDef {
    Text {
        kind: TextKind,
        length: Option<u64>,
    },
    /// Bounds as written, sign included
    Numeric {
        min: Option<SmolStr>,
        max: Option<SmolStr>,
        unit: Option<LocalRefId>,
    },
    Boolean,
    Enumeration {
        values: Vec<EnumNode>,
        is_final: bool,
    },
    /// `REFERENCE TO` one or more classes
    Reference {
        targets: Vec<LocalRefId>,
        external: bool,
    },
    /// An association role
    Role {
        kind: RoleKind,
        targets: Vec<LocalRefId>,
        external: bool,
    },
    Blackbox(BlackboxKind),
    /// A type named by a path, e.g. a domain
    TypeAlias { extends: LocalRefId },
    /// `BAG OF` (unordered) or `LIST OF` (ordered) structures
    Structure { ordered: bool, target: LocalRefId },
    /// A type the model does not describe, kept as source text
    Opaque(String),
}

impl TypeDef {
    /// All references held by this type, in source order
    pub fn references(&self) -> Vec<LocalRefId> {
        match self {
            TypeDef::Numeric { unit, .. } => unit.iter().copied().collect(),
            TypeDef::Reference { targets, .. } | TypeDef::Role { targets, .. } => targets.clone(),
            TypeDef::TypeAlias { extends } => vec![*extends],
            TypeDef::Structure { target, .. } => vec![*target],
            TypeDef::Text { .. }
            | TypeDef::Boolean
            | TypeDef::Enumeration { .. }
            | TypeDef::Blackbox(_)
            | TypeDef::Opaque(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::new(Some(0), None).to_string(), "{0..*}");
        assert_eq!(Cardinality::new(Some(1), Some(1)).to_string(), "{1}");
        assert!(Cardinality::new(Some(1), None).is_unbounded());
    }

    #[test]
    fn test_enum_leaves_are_dotted() {
        let color = EnumNode {
            name: "green".into(),
            children: vec![
                EnumNode {
                    name: "light".into(),
                    children: Vec::new(),
                    is_final: false,
                },
                EnumNode {
                    name: "dark".into(),
                    children: Vec::new(),
                    is_final: false,
                },
            ],
            is_final: false,
        };
        assert_eq!(color.leaves(), vec!["green.light", "green.dark"]);
    }
}
