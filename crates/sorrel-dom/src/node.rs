//! Node payloads.

use strum_macros::Display;

use crate::{Attributes, NodeId};

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    /// The synthetic document root.
    None,
    /// Character data.
    Text,
    /// An element.
    Tag,
    /// `<!-- ... -->`, or a bogus comment.
    Comment,
    /// `<!DOCTYPE name>`.
    Doctype,
}

/// Whether a tag node was produced by a start or an end tag.
///
/// Tree nodes are always `Open`; `Close` only appears on the transient nodes
/// unconditional parse callbacks receive for end tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TagKind {
    /// Not a tag.
    None,
    /// From a start tag.
    Open,
    /// From an end tag.
    Close,
}

/// Elements that never have content.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// True for names in [`VOID_ELEMENTS`] (ASCII case-insensitive).
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// One node of a [`Document`](crate::Document).
///
/// Tree links are owned by the document and read through [`Node::parent`]
/// and [`Node::children`]; everything else is plain data the caller may edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node variant.
    pub kind: NodeKind,
    /// Start/end tag marker, `TagKind::None` unless `kind` is `Tag`.
    pub tag_kind: TagKind,
    /// Written as `<name ... />`.
    pub self_closing: bool,
    /// Lowercase tag name; empty for non-tags.
    pub name: String,
    /// Text data, comment body or doctype name.
    pub content: String,
    /// Tag attributes in source order.
    pub attributes: Attributes,
    /// Comment recovered from a malformed `<!...>` or `<?...>`.
    pub bogus: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn blank(kind: NodeKind) -> Self {
        Self {
            kind,
            tag_kind: TagKind::None,
            self_closing: false,
            name: String::new(),
            content: String::new(),
            attributes: Attributes::new(),
            bogus: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Build a node of `kind` from a single string.
    ///
    /// `value` is the tag name for tags, the content for text and comments,
    /// and the declared name for doctypes. It is ignored for `NodeKind::None`.
    #[must_use]
    pub fn new(kind: NodeKind, value: &str) -> Self {
        match kind {
            NodeKind::None => Self::blank(NodeKind::None),
            NodeKind::Tag => Self::tag(value),
            NodeKind::Text => Self::text(value),
            NodeKind::Comment => Self::comment(value),
            NodeKind::Doctype => Self::doctype(value),
        }
    }

    /// An open tag node. The name is lowercased.
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            tag_kind: TagKind::Open,
            name: name.to_ascii_lowercase(),
            ..Self::blank(NodeKind::Tag)
        }
    }

    /// An open tag node with attributes.
    #[must_use]
    pub fn tag_with_attrs<K, V>(name: &str, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().collect(),
            ..Self::tag(name)
        }
    }

    /// A text node.
    #[must_use]
    pub fn text(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Self::blank(NodeKind::Text)
        }
    }

    /// A comment node.
    #[must_use]
    pub fn comment(content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Self::blank(NodeKind::Comment)
        }
    }

    /// A doctype node.
    #[must_use]
    pub fn doctype(name: &str) -> Self {
        Self {
            content: name.to_string(),
            ..Self::blank(NodeKind::Doctype)
        }
    }

    /// Set the self-closing flag (builder style).
    #[must_use]
    pub const fn self_closed(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// Parent node, `None` for the root and detached nodes.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// A tag node produced by a start tag.
    #[must_use]
    pub fn is_open_tag(&self) -> bool {
        self.kind == NodeKind::Tag && self.tag_kind == TagKind::Open
    }

    /// A tag whose name is a void element.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.kind == NodeKind::Tag && is_void_element(&self.name)
    }

    /// Whether children may be appended: the root, or an open tag that is
    /// neither self-closing nor void.
    #[must_use]
    pub fn can_have_children(&self) -> bool {
        match self.kind {
            NodeKind::None => true,
            NodeKind::Tag => self.is_open_tag() && !self.self_closing && !self.is_void(),
            NodeKind::Text | NodeKind::Comment | NodeKind::Doctype => false,
        }
    }

    /// True when the attribute is present.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Attribute value.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    /// Set or overwrite an attribute.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let _ = self.attributes.insert(name, value);
    }

    /// Set several attributes at once.
    pub fn set_attrs<K, V>(&mut self, attributes: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.extend(attributes);
    }

    /// Delete an attribute; absent names are ignored.
    pub fn del_attr(&mut self, name: &str) {
        let _ = self.attributes.remove(name);
    }
}
