use sorrel_dom::{Document, Node, NodeId, TagKind};
use sorrel_select::MatchContext;

use super::callbacks::{Callbacks, ErrorKind};
use crate::tokenizer::{Token, TokenSink};

/// Builds a [`Document`] from tokens as the tokenizer produces them,
/// firing callbacks for every node the moment it is attached.
pub(crate) struct TreeBuilder<'p, 'cb> {
    document: Document,
    /// Node that receives new children. Always the root or an open tag
    /// that can have children.
    current: NodeId,
    /// Characters of the text run being read.
    pending_text: String,
    callbacks: &'p mut Callbacks<'cb>,
}

impl<'p, 'cb> TreeBuilder<'p, 'cb> {
    pub(crate) fn new(callbacks: &'p mut Callbacks<'cb>) -> Self {
        Self {
            document: Document::new(),
            current: NodeId::ROOT,
            pending_text: String::new(),
            callbacks,
        }
    }

    /// The finished tree.
    pub(crate) fn finish(mut self) -> Document {
        self.flush_text();
        self.document
    }

    /// Attach `node` under the current node and announce it.
    fn insert(&mut self, node: Node) -> NodeId {
        let id = self.document.alloc(node);
        self.document.append_child(self.current, id);
        self.dispatch_node(id);
        id
    }

    /// Turn the pending text run, if any, into one text node.
    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        let _ = self.insert(Node::text(&text));
    }

    fn insert_element(&mut self, node: Node) {
        let id = self.insert(node);
        if self.document.get(id).is_some_and(Node::can_have_children) {
            self.current = id;
        }
    }

    /// Close the nearest open element named `name`.
    ///
    /// Every element left open between the current node and the match is
    /// reported as [`ErrorKind::TagNotClosed`], innermost first. An end tag
    /// with no open element of that name is ignored and leaves the pending
    /// text run open, so the text on both sides of it becomes one node.
    fn close_element(&mut self, name: &str) {
        // STEP 1: Find the nearest open element with this name. The root is
        // never a candidate.
        let target = std::iter::once(self.current)
            .chain(self.document.ancestors(self.current))
            .take_while(|&id| id != NodeId::ROOT)
            .find(|&id| {
                self.document
                    .get(id)
                    .is_some_and(|node| node.is_open_tag() && node.name == name)
            });

        let Some(target) = target else {
            log::debug!(target: "sorrel.parser", "ignoring stray end tag </{name}>");
            return;
        };
        self.flush_text();

        // STEP 2: Report every element skipped over, while still attached.
        let mut open = self.current;
        while open != target {
            log::debug!(
                target: "sorrel.parser",
                "</{name}> implicitly closes <{}>",
                self.document.get(open).map_or("", |n| n.name.as_str())
            );
            self.dispatch_error(ErrorKind::TagNotClosed, open);
            open = self.document.parent(open).unwrap_or(NodeId::ROOT);
        }

        // STEP 3: The match's parent receives what follows.
        self.current = self.document.parent(target).unwrap_or(NodeId::ROOT);
    }

    /// Show an end tag to the unconditional listeners as a detached
    /// `TagKind::Close` node. It never enters the tree.
    fn observe_close_tag(&mut self, name: &str) {
        if !self.callbacks.observes_close_tags() {
            return;
        }
        let mut scratch = Document::new();
        let mut tag = Node::tag(name);
        tag.tag_kind = TagKind::Close;
        let close = scratch.alloc(tag);
        let Some(node) = scratch.node(close) else {
            return;
        };
        for listener in &mut self.callbacks.node_listeners {
            if listener.selector.is_none() {
                (listener.handler)(node);
            }
        }
    }

    /// Run node listeners for a freshly attached node. Selectors see the
    /// tree as parsed so far.
    fn dispatch_node(&mut self, id: NodeId) {
        let Some(node) = self.document.node(id) else {
            return;
        };
        for listener in &mut self.callbacks.node_listeners {
            let wanted = listener
                .selector
                .as_ref()
                .is_none_or(|selector| selector.matches(&self.document, id, MatchContext::Streaming));
            if wanted {
                (listener.handler)(node);
            }
        }
    }

    fn dispatch_error(&mut self, kind: ErrorKind, id: NodeId) {
        let Some(node) = self.document.node(id) else {
            return;
        };
        for handler in &mut self.callbacks.error_listeners {
            handler(kind, node);
        }
    }
}

impl TokenSink for TreeBuilder<'_, '_> {
    fn process_token(&mut self, token: Token) {
        if let Token::Character { data } = token {
            self.pending_text.push(data);
            return;
        }
        if !matches!(token, Token::EndTag { .. }) {
            self.flush_text();
        }

        match token {
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                let mut node =
                    Node::tag_with_attrs(&name, attributes.into_iter().map(|a| (a.name, a.value)));
                node.self_closing = self_closing;
                self.insert_element(node);
            }
            Token::EndTag { name, .. } => {
                self.close_element(&name);
                self.observe_close_tag(&name);
            }
            Token::Comment { data, bogus } => {
                let mut node = Node::comment(&data);
                node.bogus = bogus;
                let _ = self.insert(node);
            }
            Token::Doctype { name } => {
                let _ = self.insert(Node::doctype(&name));
            }
            Token::EndOfFile => {
                self.current = NodeId::ROOT;
            }
            Token::Character { .. } => {}
        }
    }
}
