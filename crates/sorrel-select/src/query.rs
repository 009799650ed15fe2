use sorrel_dom::{Document, NodeRef};

use crate::{MatchContext, Selector};

/// Selector queries over a document or a subtree.
///
/// Implemented for `&Document` (searching everything under the root) and
/// for [`NodeRef`] (searching the node's descendants, not the node itself).
pub trait Select<'a>: Sized {
    /// Matching nodes in document order, each at most once.
    ///
    /// With `nested` false the search does not descend into a node that
    /// matched, so `div` on nested divs returns only the outermost ones.
    /// The cut applies across alternatives: `p, a` on `<p><a></a></p>`
    /// returns only the `p`, since its subtree is never visited.
    /// Combinators may still reach above the search scope.
    fn select(self, selector: &Selector, nested: bool) -> Vec<NodeRef<'a>>;

    /// Compile `selector` and run a nested search. An invalid selector
    /// matches nothing.
    fn select_str(self, selector: &str) -> Vec<NodeRef<'a>> {
        self.select(&Selector::parse(selector), true)
    }

    /// First match in document order.
    fn select_first(self, selector: &Selector) -> Option<NodeRef<'a>> {
        self.select(selector, false).into_iter().next()
    }
}

impl<'a> Select<'a> for NodeRef<'a> {
    fn select(self, selector: &Selector, nested: bool) -> Vec<NodeRef<'a>> {
        let mut found = Vec::new();
        if !selector.is_valid() {
            return found;
        }
        let document = self.document();
        self.walk(|node| {
            if selector.matches(document, node.id(), MatchContext::Settled) {
                found.push(node);
                return nested;
            }
            true
        });
        log::trace!(
            target: "sorrel.select",
            "{selector} matched {} node(s) under {}",
            found.len(),
            self.id()
        );
        found
    }
}

impl<'a> Select<'a> for &'a Document {
    fn select(self, selector: &Selector, nested: bool) -> Vec<NodeRef<'a>> {
        self.root_ref().select(selector, nested)
    }
}
