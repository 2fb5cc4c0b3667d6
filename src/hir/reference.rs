//! Symbolic references and their binding state

use smol_str::SmolStr;

use super::definitions::DefKind;
use super::ids::{DefId, LocalDefId};
use crate::base::Span;

/// The kinds of definition a reference may bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    Model,
    Topic,
    Class,
    Association,
    Domain,
    Unit,
    /// A named attribute type: a domain or a structure
    Type,
}

impl Expected {
    pub fn accepts(&self, kind: DefKind) -> bool {
        match self {
            Expected::Model => kind == DefKind::Model,
            Expected::Topic => kind == DefKind::Topic,
            Expected::Class => kind == DefKind::Class,
            Expected::Association => kind == DefKind::Association,
            Expected::Domain => kind == DefKind::Domain,
            Expected::Unit => kind == DefKind::Unit,
            Expected::Type => matches!(kind, DefKind::Domain | DefKind::Class),
        }
    }

    /// Human-readable name for diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Expected::Model => "a model",
            Expected::Topic => "a topic",
            Expected::Class => "a class",
            Expected::Association => "an association",
            Expected::Domain => "a domain",
            Expected::Unit => "a unit",
            Expected::Type => "a domain or structure",
        }
    }
}

/// Binding state; `Unbound` only exists before resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RefState {
    #[default]
    Unbound,
    Resolved(DefId),
    Unresolved,
}

/// One occurrence of a name or qualified path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Segments as written
    pub path: Vec<SmolStr>,
    pub span: Span,
    /// The definition the reference occurs in
    pub source: LocalDefId,
    pub expected: Expected,
    pub state: RefState,
}

impl Reference {
    pub fn new(path: Vec<SmolStr>, span: Span, source: LocalDefId, expected: Expected) -> Self {
        Self {
            path,
            span,
            source,
            expected,
            state: RefState::Unbound,
        }
    }

    /// The path joined with dots
    pub fn text(&self) -> String {
        self.path.join(".")
    }

    pub fn target(&self) -> Option<DefId> {
        match self.state {
            RefState::Resolved(target) => Some(target),
            RefState::Unbound | RefState::Unresolved => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_accepts_domains_and_structures() {
        assert!(Expected::Type.accepts(DefKind::Domain));
        assert!(Expected::Type.accepts(DefKind::Class));
        assert!(!Expected::Type.accepts(DefKind::Unit));
        assert!(!Expected::Class.accepts(DefKind::Association));
    }

    #[test]
    fn test_new_reference_is_unbound() {
        let reference = Reference::new(
            vec!["M".into(), "T".into()],
            Span::default(),
            LocalDefId::new(0),
            Expected::Topic,
        );
        assert_eq!(reference.state, RefState::Unbound);
        assert_eq!(reference.text(), "M.T");
        assert_eq!(reference.target(), None);
    }
}
