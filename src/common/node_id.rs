//! Node identifier type.

use std::fmt;

/// Identifies a node slot in an index arena.
///
/// Using `usize` because:
/// 1. Nodes are stored in `Vec<Option<Node<R>>>`
/// 2. Direct indexing without casting: `slots[node_id.0]`
///
/// A `NodeId` is a handle, not an owner. Holding one keeps nothing alive,
/// and a handle to a freed slot may later name a different node.
///
/// # Example
/// ```
/// use bidtree::NodeId;
///
/// let node_id = NodeId::new(5);
/// assert_eq!(node_id.index(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Slot index in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
