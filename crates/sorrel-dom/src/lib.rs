//! Document tree for the sorrel HTML parser.
//!
//! # Design
//!
//! The tree is an arena: every node lives in one `Vec` owned by the
//! [`Document`] and refers to its parent and children through [`NodeId`]
//! indices. The root (index 0) is a synthetic node of kind
//! [`NodeKind::None`]. Nodes detached from the tree stay allocated until the
//! document is dropped.
//!
//! [`NodeRef`] pairs a document with an id and is the read-only handle handed
//! to callbacks and returned by queries.

mod attributes;
mod error;
mod node;
mod node_ref;
pub mod serialize;

use std::collections::HashMap;
use std::fmt;

pub use attributes::Attributes;
pub use error::DomError;
pub use node::{Node, NodeKind, TagKind, VOID_ELEMENTS, is_void_element};
pub use node_ref::NodeRef;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An owned node tree.
///
/// Cloning a document deep-copies every node.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes, indexed by `NodeId`. Index 0 is the root.
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::None, "")],
        }
    }

    /// Id of the root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    ///
    /// Tree links are not reachable through the returned reference.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Handle to a node, `None` if the id is not allocated here.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.contains(id).then(|| NodeRef::new(self, id))
    }

    /// Handle to the root.
    #[must_use]
    pub fn root_ref(&self) -> NodeRef<'_> {
        NodeRef::new(self, NodeId::ROOT)
    }

    /// True if `id` is allocated in this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Number of allocated nodes, detached ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Store `node` and return its id. The node starts detached.
    pub fn alloc(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent` without validation.
    ///
    /// Meant for builders that only ever attach freshly allocated nodes to a
    /// node known to accept children. Unknown ids are ignored. Use
    /// [`Document::append`] for checked mutation.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Append `child` under `parent`, moving it if it is attached elsewhere.
    ///
    /// # Errors
    ///
    /// - [`DomError::UnknownNode`] if either id is not allocated here.
    /// - [`DomError::LeafParent`] if `parent` cannot have children.
    /// - [`DomError::Cycle`] if `child` is the root, `parent`, or one of its
    ///   ancestors.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::UnknownNode(parent))?;
        if !self.contains(child) {
            return Err(DomError::UnknownNode(child));
        }
        if !parent_node.can_have_children() {
            return Err(DomError::LeafParent(parent));
        }
        if child == NodeId::ROOT
            || parent == child
            || self.ancestors(parent).any(|id| id == child)
        {
            return Err(DomError::Cycle { parent, child });
        }

        self.detach(child);
        self.append_child(parent, child);
        Ok(())
    }

    /// Allocate `node` and append it under `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`Document::append`]; the node stays allocated but detached
    /// on failure.
    pub fn append_node(&mut self, parent: NodeId, node: Node) -> Result<NodeId, DomError> {
        let id = self.alloc(node);
        self.append(parent, id)?;
        Ok(id)
    }

    /// Unlink `id` from its parent. Detached nodes keep their own subtree.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The `index`-th child, `None` when out of range.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            document: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the descendants of `id` in document order, excluding `id`.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            document: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Depth-first pre-order walk over the descendants of `id`.
    ///
    /// The visitor returns `false` to skip that node's children; the walk
    /// then continues with the node's next sibling.
    pub fn walk<'a, F>(&'a self, id: NodeId, mut visitor: F)
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if visitor(NodeRef::new(self, current)) {
                stack.extend(self.children(current).iter().rev().copied());
            }
        }
    }

    /// Copy the subtree at `id` into fresh, detached nodes of this document.
    pub fn deep_copy(&mut self, id: NodeId) -> Option<NodeId> {
        let snapshot = self.subtree_snapshot(id)?;
        Some(self.adopt_snapshot(snapshot))
    }

    /// Copy the subtree at `id` of `other` into this document, detached.
    pub fn import(&mut self, other: &Self, id: NodeId) -> Option<NodeId> {
        let snapshot = other.subtree_snapshot(id)?;
        Some(self.adopt_snapshot(snapshot))
    }

    /// Pre-order clones of a subtree, still carrying their source links.
    fn subtree_snapshot(&self, id: NodeId) -> Option<Vec<(NodeId, Node)>> {
        let top = self.get(id)?.clone();
        let mut snapshot = vec![(id, top)];
        snapshot.extend(
            self.descendants(id)
                .map(|d| (d, self.nodes[d.0].clone())),
        );
        Some(snapshot)
    }

    /// Allocate a snapshot, rewiring source links to the new ids.
    fn adopt_snapshot(&mut self, snapshot: Vec<(NodeId, Node)>) -> NodeId {
        let mut remap: HashMap<NodeId, NodeId> = HashMap::with_capacity(snapshot.len());
        let mut top = None;
        for (source_id, node) in snapshot {
            let source_parent = node.parent;
            let copy = self.alloc(node);
            let _ = remap.insert(source_id, copy);
            match source_parent.and_then(|p| remap.get(&p).copied()) {
                Some(parent) if top.is_some() => self.append_child(parent, copy),
                _ => top = top.or(Some(copy)),
            }
        }
        top.unwrap_or(NodeId::ROOT)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.document.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}
