//! Node - one slot of the index arena.

use crate::common::NodeId;

/// A tree node holding one record.
///
/// Links are arena handles. `left` and `right` name the subtrees this node
/// heads; `parent` is for walking upward only and says nothing about who
/// owns what. The arena owns every node.
#[derive(Debug)]
pub(crate) struct Node<R> {
    pub(crate) record: R,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<R> Node<R> {
    /// Create a detached node under `parent`.
    pub(crate) fn new(record: R, parent: Option<NodeId>) -> Self {
        Self {
            record,
            parent,
            left: None,
            right: None,
        }
    }
}
