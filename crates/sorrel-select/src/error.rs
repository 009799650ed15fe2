use thiserror::Error;

/// Reasons a selector fails to compile. Positions are byte offsets into the
/// selector source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The source, or one comma-separated alternative, is blank.
    #[error("empty selector")]
    Empty,
    /// A `>` with no compound on one side.
    #[error("combinator at {pos} has nothing to combine")]
    DanglingCombinator {
        /// Offset of the `>`.
        pos: usize,
    },
    /// A character that cannot start or continue a selector here.
    #[error("unexpected {ch:?} at {pos}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Its offset.
        pos: usize,
    },
    /// `#` or `.` not followed by a name.
    #[error("expected a name after {marker:?} at {pos}")]
    MissingName {
        /// `#` or `.`.
        marker: char,
        /// Offset of the marker.
        pos: usize,
    },
    /// `[` without a matching `]`, or a malformed attribute condition.
    #[error("malformed attribute condition starting at {pos}")]
    BadAttribute {
        /// Offset of the `[`.
        pos: usize,
    },
    /// A quoted value that never closes.
    #[error("unterminated string starting at {pos}")]
    UnterminatedString {
        /// Offset of the opening quote.
        pos: usize,
    },
    /// A pseudo-selector other than the positional ones.
    #[error("unknown pseudo-selector :{0}")]
    UnknownPseudo(String),
    /// `:eq`, `:gt` or `:lt` without a non-negative integer argument.
    #[error("invalid index for :{name}: {argument:?}")]
    InvalidIndex {
        /// Pseudo-selector name.
        name: String,
        /// The text found between the parentheses.
        argument: String,
    },
}
