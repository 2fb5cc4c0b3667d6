//! Construct-specific layout rules
//!
//! A rule says what goes between two adjacent children of a node: it is
//! attached either before or after a matching child and may insert a
//! separator and adjust the indentation. Rules are built per node instance
//! because some layouts depend on the content (enumerations break only when
//! they are large or nested).

use crate::parser::{AstNode, EnumType, SyntaxKind, SyntaxNode};

/// Which side of the matched child the rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Position {
    Before,
    After,
}

/// Which children a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Matcher {
    Kind(SyntaxKind),
    Kinds(&'static [SyntaxKind]),
    /// The n-th (0-based) direct child of this kind
    Nth(SyntaxKind, usize),
}

impl Matcher {
    fn matches(self, kind: SyntaxKind, ordinal: usize) -> bool {
        match self {
            Matcher::Kind(k) => k == kind,
            Matcher::Kinds(kinds) => kinds.contains(&kind),
            Matcher::Nth(k, n) => k == kind && n == ordinal,
        }
    }
}

/// Separator a rule asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Insert {
    Space,
    Nothing,
    Newline,
    BlankLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum IndentAction {
    Indent,
    Dedent,
}

/// Condition on the previous visible sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Guard {
    Always,
    AfterKind(SyntaxKind),
    NotAfterKind(SyntaxKind),
}

impl Guard {
    fn allows(self, previous: Option<SyntaxKind>) -> bool {
        match self {
            Guard::Always => true,
            Guard::AfterKind(kind) => previous == Some(kind),
            Guard::NotAfterKind(kind) => previous != Some(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Rule {
    position: Position,
    matcher: Matcher,
    insert: Option<Insert>,
    indent: Option<IndentAction>,
    guard: Guard,
}

impl Rule {
    fn new(position: Position, matcher: Matcher) -> Self {
        Self {
            position,
            matcher,
            insert: None,
            indent: None,
            guard: Guard::Always,
        }
    }

    fn before(kind: SyntaxKind) -> Self {
        Self::new(Position::Before, Matcher::Kind(kind))
    }

    fn before_any(kinds: &'static [SyntaxKind]) -> Self {
        Self::new(Position::Before, Matcher::Kinds(kinds))
    }

    fn after(kind: SyntaxKind) -> Self {
        Self::new(Position::After, Matcher::Kind(kind))
    }

    fn after_any(kinds: &'static [SyntaxKind]) -> Self {
        Self::new(Position::After, Matcher::Kinds(kinds))
    }

    fn insert(mut self, insert: Insert) -> Self {
        self.insert = Some(insert);
        self
    }

    fn indent(mut self, action: IndentAction) -> Self {
        self.indent = Some(action);
        self
    }

    fn when(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }
}

/// One side of a join: the child kind and how many children of that kind
/// came before it in the same node
#[derive(Debug, Clone, Copy)]
pub(super) struct Side {
    pub kind: SyntaxKind,
    pub ordinal: usize,
}

/// The combined effect of all rules on one join
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Layout {
    pub insert: Option<Insert>,
    /// Indentation actions in application order
    pub indent: Vec<IndentAction>,
}

/// Rules of one node instance
#[derive(Debug, Clone, Default)]
pub(super) struct Rules(Vec<Rule>);

impl Rules {
    /// Resolve the layout between `previous` and `next`.
    ///
    /// The insert of a matching `Before` rule wins over one of an `After`
    /// rule; among rules of the same position the later one wins. Indent
    /// actions of `After` rules are applied before those of `Before` rules.
    pub(super) fn layout(&self, previous: Option<Side>, next: Side) -> Layout {
        let after_insert = self
            .active(Position::After, previous, next)
            .filter_map(|r| r.insert)
            .last();
        let before_insert = self
            .active(Position::Before, previous, next)
            .filter_map(|r| r.insert)
            .last();
        let indent = self
            .active(Position::After, previous, next)
            .chain(self.active(Position::Before, previous, next))
            .filter_map(|r| r.indent)
            .collect();

        Layout {
            insert: before_insert.or(after_insert),
            indent,
        }
    }

    fn active(
        &self,
        position: Position,
        previous: Option<Side>,
        next: Side,
    ) -> impl Iterator<Item = &Rule> + '_ {
        let previous_kind = previous.map(|p| p.kind);
        self.0.iter().filter(move |rule| {
            rule.position == position
                && rule.guard.allows(previous_kind)
                && match position {
                    Position::Before => rule.matcher.matches(next.kind, next.ordinal),
                    Position::After => {
                        previous.is_some_and(|p| rule.matcher.matches(p.kind, p.ordinal))
                    }
                }
        })
    }
}

/// Definitions separated by blank lines inside models and topics
const DEFINITIONS: &[SyntaxKind] = &[
    SyntaxKind::UNIT_SECTION,
    SyntaxKind::DOMAIN_SECTION,
    SyntaxKind::TOPIC,
    SyntaxKind::CLASS,
    SyntaxKind::ASSOCIATION,
    SyntaxKind::OPAQUE_STATEMENT,
    SyntaxKind::OPAQUE_BLOCK,
    SyntaxKind::ERROR,
];

/// Members of a class body, one per line
const CLASS_ITEMS: &[SyntaxKind] = &[
    SyntaxKind::ATTRIBUTE,
    SyntaxKind::ROLE,
    SyntaxKind::CONSTRAINT,
    SyntaxKind::OID_DECL,
    SyntaxKind::CARDINALITY_DECL,
    SyntaxKind::ERROR,
];

/// Keywords opening a section inside a class body
const SECTION_KEYWORDS: &[SyntaxKind] = &[SyntaxKind::ATTRIBUTE_KW, SyntaxKind::PARAMETER_KW];

/// Header items of a topic placed on their own line
const TOPIC_HEADER_ITEMS: &[SyntaxKind] = &[SyntaxKind::OID_DECL, SyntaxKind::DEPENDS_ON];

/// Enumerations with more elements than this are broken one per line
const MAX_INLINE_ENUM_ELEMENTS: usize = 3;

/// Build the rules for one node
pub(super) fn rules_for(node: &SyntaxNode) -> Rules {
    use IndentAction::{Dedent, Indent};
    use Insert::{BlankLine, Newline, Nothing, Space};

    let rules = match node.kind() {
        SyntaxKind::SOURCE_FILE => vec![Rule::before(SyntaxKind::MODEL).insert(BlankLine)],
        SyntaxKind::MODEL => vec![
            Rule::before(SyntaxKind::AT_KW).insert(Newline),
            Rule::before(SyntaxKind::TRANSLATION_OF).insert(Newline),
            Rule::after(SyntaxKind::EQ).indent(Indent).insert(Newline),
            Rule::before(SyntaxKind::IMPORTS).insert(Newline),
            Rule::before_any(DEFINITIONS).insert(BlankLine),
            Rule::before(SyntaxKind::END_KW).indent(Dedent).insert(Newline),
            Rule::before(SyntaxKind::END_KW)
                .insert(BlankLine)
                .when(Guard::NotAfterKind(SyntaxKind::EQ)),
        ],
        SyntaxKind::TOPIC => vec![
            Rule::before(SyntaxKind::EXTENDS_CLAUSE).insert(Newline),
            Rule::after(SyntaxKind::EQ).indent(Indent).insert(Newline),
            Rule::before_any(TOPIC_HEADER_ITEMS).insert(Newline),
            Rule::before_any(DEFINITIONS).insert(BlankLine),
            Rule::before(SyntaxKind::END_KW).indent(Dedent).insert(Newline),
            Rule::before(SyntaxKind::END_KW)
                .insert(BlankLine)
                .when(Guard::NotAfterKind(SyntaxKind::EQ)),
        ],
        SyntaxKind::CLASS | SyntaxKind::ASSOCIATION => vec![
            Rule::before(SyntaxKind::EXTENDS_CLAUSE).insert(Newline),
            Rule::after(SyntaxKind::EQ).indent(Indent).insert(Newline),
            Rule::before_any(CLASS_ITEMS).insert(Newline),
            Rule::before_any(SECTION_KEYWORDS).indent(Dedent).insert(Newline),
            Rule::after_any(SECTION_KEYWORDS).indent(Indent).insert(Newline),
            Rule::before(SyntaxKind::END_KW).indent(Dedent).insert(Newline),
            Rule::before(SyntaxKind::END_KW)
                .insert(Space)
                .when(Guard::AfterKind(SyntaxKind::EQ)),
        ],
        SyntaxKind::DOMAIN_SECTION => vec![
            Rule::after(SyntaxKind::DOMAIN_KW).indent(Indent).insert(Newline),
            Rule::before(SyntaxKind::DOMAIN_DEF)
                .insert(BlankLine)
                .when(Guard::NotAfterKind(SyntaxKind::DOMAIN_KW)),
        ],
        SyntaxKind::UNIT_SECTION => vec![
            Rule::after(SyntaxKind::UNIT_KW).indent(Indent).insert(Newline),
            Rule::before(SyntaxKind::UNIT_DEF).insert(Newline),
        ],
        SyntaxKind::DOMAIN_DEF => vec![
            Rule::before(SyntaxKind::DOMAIN_CONSTRAINTS)
                .indent(Indent)
                .insert(Newline),
        ],
        SyntaxKind::DOMAIN_CONSTRAINTS => vec![
            Rule::after(SyntaxKind::CONSTRAINTS_KW)
                .indent(Indent)
                .insert(Newline),
            Rule::after(SyntaxKind::COMMA).insert(Newline),
        ],
        SyntaxKind::TEXT_TYPE => vec![
            Rule::before(SyntaxKind::STAR).insert(Nothing),
            Rule::after(SyntaxKind::STAR).insert(Nothing),
        ],
        SyntaxKind::CARDINALITY => vec![
            Rule::before(SyntaxKind::DOT_DOT).insert(Nothing),
            Rule::after(SyntaxKind::DOT_DOT).insert(Nothing),
        ],
        SyntaxKind::NUMERIC_TYPE => vec![Rule::after(SyntaxKind::MINUS).insert(Nothing)],
        SyntaxKind::ENUM_TYPE if enum_breaks(node) => vec![
            Rule::after(SyntaxKind::L_PAREN).indent(Indent).insert(Newline),
            Rule::after(SyntaxKind::COMMA).insert(Newline),
        ],
        SyntaxKind::OPAQUE_BLOCK => opaque_block_rules(node),
        _ => Vec::new(),
    };

    Rules(rules)
}

/// Large or nested enumerations are laid out one element per line
fn enum_breaks(node: &SyntaxNode) -> bool {
    EnumType::cast(node.clone()).is_some_and(|e| {
        e.element_count() > MAX_INLINE_ENUM_ELEMENTS
            || e.elements().any(|element| element.sub_enum().is_some())
    })
}

fn opaque_block_rules(node: &SyntaxNode) -> Vec<Rule> {
    let mut rules = vec![Rule::after(SyntaxKind::SEMICOLON).insert(Insert::Newline)];
    let has_body = node
        .children_with_tokens()
        .any(|e| e.kind() == SyntaxKind::EQ);
    if has_body {
        rules.push(
            Rule::new(Position::After, Matcher::Nth(SyntaxKind::EQ, 0))
                .indent(IndentAction::Indent)
                .insert(Insert::Newline),
        );
        rules.push(
            Rule::before(SyntaxKind::END_KW)
                .indent(IndentAction::Dedent)
                .insert(Insert::Newline),
        );
    } else {
        rules.push(Rule::before(SyntaxKind::END_KW).insert(Insert::Newline));
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn node(input: &str, kind: SyntaxKind) -> SyntaxNode {
        parse(input)
            .syntax()
            .descendants()
            .find(|n| n.kind() == kind)
            .unwrap()
    }

    fn side(kind: SyntaxKind) -> Side {
        Side { kind, ordinal: 0 }
    }

    #[test]
    fn test_before_rule_wins_over_after_rule() {
        let class = node("INTERLIS 2.4; MODEL M = CLASS A = END A; END M.", SyntaxKind::CLASS);
        let layout = rules_for(&class).layout(Some(side(SyntaxKind::EQ)), side(SyntaxKind::END_KW));
        assert_eq!(layout.insert, Some(Insert::Space));
        assert_eq!(layout.indent, vec![IndentAction::Indent, IndentAction::Dedent]);
    }

    #[test]
    fn test_guard_selects_blank_line() {
        let model = node("INTERLIS 2.4; MODEL M = END M.", SyntaxKind::MODEL);
        let rules = rules_for(&model);
        let empty = rules.layout(Some(side(SyntaxKind::EQ)), side(SyntaxKind::END_KW));
        assert_eq!(empty.insert, Some(Insert::Newline));
        let after_topic = rules.layout(Some(side(SyntaxKind::TOPIC)), side(SyntaxKind::END_KW));
        assert_eq!(after_topic.insert, Some(Insert::BlankLine));
        let imports = rules.layout(Some(side(SyntaxKind::EQ)), side(SyntaxKind::IMPORTS));
        assert_eq!(imports.insert, Some(Insert::Newline));
    }

    #[test]
    fn test_enum_breaks_only_when_large_or_nested() {
        let small = node("INTERLIS 2.4; MODEL M = DOMAIN D = (a, b, c); END M.", SyntaxKind::ENUM_TYPE);
        assert!(!enum_breaks(&small));
        let large = node("INTERLIS 2.4; MODEL M = DOMAIN D = (a, b, c, d); END M.", SyntaxKind::ENUM_TYPE);
        assert!(enum_breaks(&large));
        let nested = node("INTERLIS 2.4; MODEL M = DOMAIN D = (a (x, y)); END M.", SyntaxKind::ENUM_TYPE);
        assert!(enum_breaks(&nested));
    }
}
