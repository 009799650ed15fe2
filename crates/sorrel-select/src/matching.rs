//! Evaluating compiled selectors against document nodes.

use sorrel_dom::{Document, Node, NodeId, NodeKind};

use crate::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, MatchContext, Position,
    Selector, SimpleSelector,
};

impl Selector {
    /// True if any alternative matches `id`.
    #[must_use]
    pub fn matches(&self, document: &Document, id: NodeId, context: MatchContext) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches(document, id, context))
    }
}

impl ComplexSelector {
    /// The subject matches `id` and the combinator chain is satisfied by its
    /// ancestors.
    #[must_use]
    pub fn matches(&self, document: &Document, id: NodeId, context: MatchContext) -> bool {
        self.subject.matches(document, id, context)
            && matches_chain(&self.combinators, document, id, context)
    }
}

/// `chain` holds the compounds still to satisfy, nearest first. A
/// descendant step tries every ancestor, so `div p` in `div > section > p`
/// is found even when `section` would also have matched.
fn matches_chain(
    chain: &[(Combinator, CompoundSelector)],
    document: &Document,
    id: NodeId,
    context: MatchContext,
) -> bool {
    let Some(((combinator, compound), rest)) = chain.split_first() else {
        return true;
    };
    match combinator {
        Combinator::Child => document.parent(id).is_some_and(|parent| {
            compound.matches(document, parent, context)
                && matches_chain(rest, document, parent, context)
        }),
        Combinator::Descendant => document.ancestors(id).any(|ancestor| {
            compound.matches(document, ancestor, context)
                && matches_chain(rest, document, ancestor, context)
        }),
    }
}

impl CompoundSelector {
    /// Every simple selector holds for `id`.
    ///
    /// Positional conditions index into the parent's children that satisfy
    /// the other conditions of this compound.
    #[must_use]
    pub fn matches(&self, document: &Document, id: NodeId, context: MatchContext) -> bool {
        let Some(node) = document.get(id) else {
            return false;
        };
        if !self.matches_conditions(node) {
            return false;
        }

        let mut positions = self
            .simple_selectors
            .iter()
            .filter_map(|simple| match simple {
                SimpleSelector::Position(position) => Some(*position),
                _ => None,
            })
            .peekable();
        if positions.peek().is_none() {
            return true;
        }

        let candidates: Vec<NodeId> = match node.parent() {
            Some(parent) => document
                .children(parent)
                .iter()
                .copied()
                .filter(|&sibling| {
                    document
                        .get(sibling)
                        .is_some_and(|n| self.matches_conditions(n))
                })
                .collect(),
            None => vec![id],
        };
        let Some(index) = candidates.iter().position(|&c| c == id) else {
            return false;
        };
        let last = candidates.len() - 1;

        positions.all(|position| match position {
            Position::First => index == 0,
            // later siblings may still arrive while streaming
            Position::Last => context == MatchContext::Settled && index == last,
            Position::Eq(n) => index == n,
            Position::Gt(n) => index > n,
            Position::Lt(n) => index < n,
        })
    }

    /// The non-positional conditions. Only `*` reaches text, comment and
    /// doctype nodes; the root never matches.
    fn matches_conditions(&self, node: &Node) -> bool {
        if node.kind == NodeKind::None {
            return false;
        }
        if !node.is_open_tag() && !self.simple_selectors.contains(&SimpleSelector::Universal) {
            return false;
        }
        self.simple_selectors.iter().all(|simple| simple.matches(node))
    }
}

impl SimpleSelector {
    /// Check this condition alone. Positional conditions always pass here.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Universal | Self::Position(_) => true,
            Self::Type(name) => node.is_open_tag() && node.name.eq_ignore_ascii_case(name),
            Self::Id(id) => node.is_open_tag() && node.attributes.id() == Some(id.as_str()),
            Self::Class(class) => {
                node.is_open_tag() && node.attributes.classes().any(|c| c == class)
            }
            Self::Attribute(attribute) => node.is_open_tag() && attribute.matches(node),
        }
    }
}

impl AttributeSelector {
    /// Check the attribute condition against `node`.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Exists(name) => node.has_attr(name),
            Self::Equals(name, val) => node.get_attr(name) == Some(val.as_str()),
            Self::NotEquals(name, val) => node.get_attr(name) != Some(val.as_str()),
            Self::Includes(name, val) => node
                .get_attr(name)
                .is_some_and(|v| contains_word(v, val)),
            Self::DashMatch(name, val) => node.get_attr(name).is_some_and(|v| {
                v.strip_prefix(val.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
            }),
            Self::PrefixMatch(name, val) => node
                .get_attr(name)
                .is_some_and(|v| v.starts_with(val.as_str())),
            Self::SuffixMatch(name, val) => node
                .get_attr(name)
                .is_some_and(|v| v.ends_with(val.as_str())),
            Self::SubstringMatch(name, val) => node
                .get_attr(name)
                .is_some_and(|v| v.contains(val.as_str())),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// `word` occurs in `haystack` with no word character directly before or
/// after it: `path` is in `/a/path/b` and `x path`, not in `/pathway`.
fn contains_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}
