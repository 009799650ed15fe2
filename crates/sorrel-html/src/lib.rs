//! Tolerant HTML parsing for sorrel.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: an explicit state machine over tags, attributes,
//!   comments, doctypes and rawtext elements, handing tokens to a
//!   [`TokenSink`](tokenizer::TokenSink) as they complete
//! - **Tree builder**: attaches nodes to a [`Document`] and recovers from
//!   mismatched or missing end tags
//! - **Callbacks**: per-node handlers, optionally guarded by a selector,
//!   and error handlers for implicitly closed elements
//!
//! # Not Implemented
//!
//! - Character reference decoding; text is kept as written
//! - Implied elements (`html`, `head`, `body`) and table fix-ups
//!
//! # Example
//!
//! ```
//! use sorrel_html::parse;
//! use sorrel_select::Select;
//!
//! let document = parse("<ul><li>one</li><li>two</li></ul>");
//! let items = document.select_str("ul > li");
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[1].to_text(false), "two");
//! ```

/// Error type for reading input.
pub mod error;
/// Tree construction and callback dispatch.
pub mod parser;
/// HTML tokenizer.
pub mod tokenizer;

pub use error::ParseError;
pub use parser::{ErrorHandler, ErrorKind, NodeHandler, Parser};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenSink, TokenizerState};

use sorrel_dom::Document;

/// Parse `input` without callbacks.
#[must_use]
pub fn parse(input: &str) -> Document {
    Parser::new().parse(input)
}
