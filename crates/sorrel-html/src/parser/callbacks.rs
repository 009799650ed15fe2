use strum_macros::Display;

use sorrel_dom::NodeRef;
use sorrel_select::Selector;

/// Structural problems reported to error callbacks while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    /// An element was implicitly closed because an end tag for one of its
    /// ancestors arrived first.
    #[strum(serialize = "tag not closed")]
    TagNotClosed,
}

/// Handler receiving each node as it is created.
pub type NodeHandler<'cb> = Box<dyn FnMut(NodeRef<'_>) + 'cb>;

/// Handler receiving structural errors together with the affected node.
pub type ErrorHandler<'cb> = Box<dyn FnMut(ErrorKind, NodeRef<'_>) + 'cb>;

/// A node handler, optionally guarded by a selector.
pub(crate) struct NodeListener<'cb> {
    pub(crate) selector: Option<Selector>,
    pub(crate) handler: NodeHandler<'cb>,
}

/// Registered listeners, in registration order.
#[derive(Default)]
pub(crate) struct Callbacks<'cb> {
    pub(crate) node_listeners: Vec<NodeListener<'cb>>,
    pub(crate) error_listeners: Vec<ErrorHandler<'cb>>,
}

impl<'cb> Callbacks<'cb> {
    pub(crate) fn add_node_listener(&mut self, selector: Option<Selector>, handler: NodeHandler<'cb>) {
        self.node_listeners.push(NodeListener { selector, handler });
    }

    pub(crate) fn add_error_listener(&mut self, handler: ErrorHandler<'cb>) {
        self.error_listeners.push(handler);
    }

    pub(crate) fn clear(&mut self) {
        self.node_listeners.clear();
        self.error_listeners.clear();
    }

    /// Whether any listener wants to see close tags.
    pub(crate) fn observes_close_tags(&self) -> bool {
        self.node_listeners.iter().any(|l| l.selector.is_none())
    }
}
