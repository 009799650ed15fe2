//! Selector language for sorrel documents.
//!
//! # Syntax
//!
//! | Form | Matches |
//! |-|-|
//! | `*` | any node |
//! | `div` | tag name |
//! | `#id1` | `id="id1"` |
//! | `.c1.c2` | class list containing both |
//! | `[attr]` | attribute present |
//! | `[attr='v']` / `[attr!='v']` | equal / not equal (or absent) |
//! | `[attr^='v']` / `[attr$='v']` / `[attr*='v']` | prefix / suffix / substring |
//! | `[attr~='v']` | `v` appears as a whole word |
//! | `[attr\|='v']` | equal to `v` or starting with `v-` |
//! | `:first` `:last` `:eq(n)` `:gt(n)` `:lt(n)` | position among matching siblings |
//! | `a b` / `a>b` | descendant / child |
//! | `p,div` | either |
//!
//! Positions are 0-indexed and counted among the siblings that satisfy the
//! rest of the same compound, so `li.x:eq(1)` is the second `li.x` of its
//! parent, not the second `li` in the document.
//!
//! # Example
//!
//! ```
//! use sorrel_dom::{Document, Node, NodeId};
//! use sorrel_select::{Select, Selector};
//!
//! let mut doc = Document::new();
//! let ul = doc.append_node(NodeId::ROOT, Node::tag("ul")).unwrap();
//! for class in ["a", "b", "a"] {
//!     let _ = doc.append_node(ul, Node::tag_with_attrs("li", [("class", class)])).unwrap();
//! }
//!
//! let selector = Selector::parse("ul > li.a:eq(1)");
//! let hits = doc.select(&selector, true);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id(), doc.child(ul, 2).unwrap());
//! ```

mod error;
mod matching;
mod parse;
mod query;

use std::fmt;
use std::str::FromStr;

use sorrel_common::warning::warn_once;
use strum_macros::Display;

pub use error::SelectorError;
pub use query::Select;

/// Attribute predicates. Names compare ASCII case-insensitively, values
/// case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`
    Exists(String),
    /// `[attr=value]`
    Equals(String, String),
    /// `[attr!=value]`; also true when the attribute is absent.
    NotEquals(String, String),
    /// `[attr~=value]`
    Includes(String, String),
    /// `[attr|=value]`
    DashMatch(String, String),
    /// `[attr^=value]`
    PrefixMatch(String, String),
    /// `[attr$=value]`
    SuffixMatch(String, String),
    /// `[attr*=value]`
    SubstringMatch(String, String),
}

/// Positional pseudo-selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// `:first`
    First,
    /// `:last`; never matches while a document is still being parsed.
    Last,
    /// `:eq(n)`
    Eq(usize),
    /// `:gt(n)`
    Gt(usize),
    /// `:lt(n)`
    Lt(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str(":first"),
            Self::Last => f.write_str(":last"),
            Self::Eq(n) => write!(f, ":eq({n})"),
            Self::Gt(n) => write!(f, ":gt({n})"),
            Self::Lt(n) => write!(f, ":lt({n})"),
        }
    }
}

/// A single condition on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `*`
    Universal,
    /// Tag name, stored lowercase.
    Type(String),
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[...]`
    Attribute(AttributeSelector),
    /// `:first`, `:eq(n)`, ...
    Position(Position),
}

/// Conditions that must all hold for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors in source order.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// Relationship between two compounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the parent.
    Child,
}

/// A chain of compounds joined by combinators.
///
/// Stored right-to-left: `subject` is the rightmost compound, and each
/// `(combinator, compound)` pair steps one compound further left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The compound the matched node itself must satisfy.
    pub subject: CompoundSelector,
    /// Remaining compounds, nearest first.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

/// When a match is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchContext {
    /// The document is complete.
    #[default]
    Settled,
    /// The document is being parsed and later siblings may still appear.
    Streaming,
}

/// A compiled selector: one or more comma-separated alternatives.
///
/// An empty or malformed source compiles to a selector with no alternatives
/// that matches nothing; check [`Selector::is_valid`] before relying on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

impl Selector {
    /// Compile `source`, falling back to the never-matching selector (and a
    /// logged warning) when it does not parse.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self::try_parse(source).unwrap_or_else(|err| {
            warn_once("Selector", &format!("{source:?}: {err}"));
            Self {
                source: source.to_string(),
                alternatives: Vec::new(),
            }
        })
    }

    /// Compile `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] describing the first problem found.
    pub fn try_parse(source: &str) -> Result<Self, SelectorError> {
        let alternatives = parse::parse_selector_list(source)?;
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// False for the never-matching selector produced by a failed compile.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.alternatives.is_empty()
    }

    /// The text this selector was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Compiled alternatives.
    #[must_use]
    pub fn alternatives(&self) -> &[ComplexSelector] {
        &self.alternatives
    }
}

impl From<&str> for Selector {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::try_parse(source)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
