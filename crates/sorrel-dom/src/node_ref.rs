use std::fmt;
use std::ops::Deref;

use crate::serialize;
use crate::{Document, Node, NodeId, NodeKind};

/// Borrowed handle to one node of a [`Document`].
///
/// Dereferences to the [`Node`] payload and adds tree navigation and
/// serialization. Two handles are equal when they point at the same node of
/// the same document.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Caller guarantees `id` is allocated in `document`.
    pub(crate) const fn new(document: &'a Document, id: NodeId) -> Self {
        Self { document, id }
    }

    /// Node id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Owning document.
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.document
    }

    /// Node payload with the document's lifetime.
    #[must_use]
    pub fn node(&self) -> &'a Node {
        &self.document.nodes[self.id.0]
    }

    /// Parent handle.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.document, id))
    }

    /// `index`-th child, `None` when out of range.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<Self> {
        self.document
            .child(self.id, index)
            .map(|id| Self::new(self.document, id))
    }

    /// Number of children.
    #[must_use]
    pub fn size(&self) -> usize {
        self.node().children.len()
    }

    /// True when the node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node().children.is_empty()
    }

    /// Children in document order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let document = self.document;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef::new(document, id))
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let document = self.document;
        document
            .ancestors(self.id)
            .map(move |id| NodeRef::new(document, id))
    }

    /// Descendants in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let document = self.document;
        document
            .descendants(self.id)
            .map(move |id| NodeRef::new(document, id))
    }

    /// See [`Document::walk`].
    pub fn walk<F>(&self, visitor: F)
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        self.document.walk(self.id, visitor);
    }

    /// Tag names from the outermost ancestor down to this node, joined by
    /// spaces (`"div p a"`). Non-tag levels are skipped.
    #[must_use]
    pub fn path(&self) -> String {
        let mut names: Vec<&str> = self
            .ancestors()
            .filter(|n| n.kind == NodeKind::Tag)
            .map(|n| n.node().name.as_str())
            .collect();
        names.reverse();
        if self.kind == NodeKind::Tag {
            names.push(self.node().name.as_str());
        }
        names.join(" ")
    }

    /// Indented markup, one node per line.
    #[must_use]
    pub fn to_html(&self, indent: char, recurse_children: bool, include_text: bool) -> String {
        serialize::to_html(self.document, self.id, indent, recurse_children, include_text)
    }

    /// Markup without added whitespace.
    #[must_use]
    pub fn to_raw_html(&self, recurse_children: bool, include_text: bool) -> String {
        serialize::to_raw_html(self.document, self.id, recurse_children, include_text)
    }

    /// Flattened text content.
    #[must_use]
    pub fn to_text(&self, collapse_linebreaks: bool) -> String {
        serialize::to_text(self.document, self.id, collapse_linebreaks)
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.node().name)
            .finish()
    }
}
