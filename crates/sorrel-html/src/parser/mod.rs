//! Tree construction with streaming callbacks.
//!
//! [`Parser`] runs the tokenizer with a tree builder as its sink. Nodes are
//! attached and announced to listeners as soon as their token is complete,
//! so a callback sees a node before any of its children exist.
//!
//! # Recovery
//!
//! - An end tag closes the nearest open element with its name. Elements left
//!   open in between are reported as [`ErrorKind::TagNotClosed`].
//! - An end tag with no open element of that name is ignored.
//! - End of input closes everything without an error.

mod builder;
mod callbacks;

use std::io::Read;

use sorrel_dom::{Document, NodeRef};
use sorrel_select::Selector;

pub use callbacks::{ErrorHandler, ErrorKind, NodeHandler};

use crate::error::ParseError;
use crate::tokenizer::HTMLTokenizer;
use builder::TreeBuilder;
use callbacks::Callbacks;

/// HTML parser holding a set of callbacks.
///
/// Handlers may borrow caller state for `'cb`. A parser can be reused; the
/// registered callbacks apply to every later parse.
///
/// # Example
///
/// ```
/// use sorrel_html::Parser;
///
/// let mut links = Vec::new();
/// {
///     let mut parser = Parser::new();
///     parser.set_selector_callback("a[href]", |node| {
///         links.push(node.get_attr("href").unwrap_or_default().to_string());
///     });
///     let _ = parser.parse(r#"<p><a href="/one">1</a><a>2</a><a href="/two">3</a></p>"#);
/// }
/// assert_eq!(links, ["/one", "/two"]);
/// ```
#[derive(Default)]
pub struct Parser<'cb> {
    callbacks: Callbacks<'cb>,
}

impl<'cb> Parser<'cb> {
    /// Parser with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every node as it is created, and for every end
    /// tag as a detached node with [`TagKind::Close`](sorrel_dom::TagKind).
    pub fn set_callback<F>(&mut self, handler: F)
    where
        F: FnMut(NodeRef<'_>) + 'cb,
    {
        self.callbacks.add_node_listener(None, Box::new(handler));
    }

    /// Call `handler` for every created node matching `selector`.
    ///
    /// Matching happens when the node is attached, against the tree parsed
    /// so far: positions count only earlier siblings and `:last` never
    /// matches. An invalid selector never fires.
    pub fn set_selector_callback<F>(&mut self, selector: impl Into<Selector>, handler: F)
    where
        F: FnMut(NodeRef<'_>) + 'cb,
    {
        let selector = selector.into();
        if !selector.is_valid() {
            log::debug!(target: "sorrel.parser", "callback selector {selector} will never match");
        }
        self.callbacks
            .add_node_listener(Some(selector), Box::new(handler));
    }

    /// Call `handler` for every structural error.
    pub fn set_error_callback<F>(&mut self, handler: F)
    where
        F: FnMut(ErrorKind, NodeRef<'_>) + 'cb,
    {
        self.callbacks.add_error_listener(Box::new(handler));
    }

    /// Remove every node and error callback.
    pub fn clear_callbacks(&mut self) {
        self.callbacks.clear();
    }

    /// Parse `input` into a new document. Never fails.
    pub fn parse(&mut self, input: &str) -> Document {
        let mut tokenizer = HTMLTokenizer::new(input, TreeBuilder::new(&mut self.callbacks));
        tokenizer.run();
        let document = tokenizer.into_sink().finish();
        log::debug!(
            target: "sorrel.parser",
            "parsed {} bytes into {} nodes",
            input.len(),
            document.node_count()
        );
        document
    }

    /// Read all of `reader` and parse it. Invalid UTF-8 is replaced with
    /// U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Io`] if reading fails.
    pub fn parse_reader<R: Read>(&mut self, mut reader: R) -> Result<Document, ParseError> {
        let mut bytes = Vec::new();
        let _ = reader.read_to_end(&mut bytes)?;
        Ok(self.parse(&String::from_utf8_lossy(&bytes)))
    }
}
