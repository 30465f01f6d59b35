//! OrderedIndex - an unbalanced binary search tree over keyed records.
//!
//! The [`OrderedIndex`] provides:
//! - Insertion by key comparison (equal keys descend right)
//! - Point lookup and removal by key
//! - Lazy in-order enumeration
//!
//! There is no rebalancing. Sorted input degrades the tree to a chain, so
//! every walk in this module is a loop rather than a recursion.

use std::fmt;

use log::{debug, trace};

use crate::common::{Error, NodeId, Result};
use crate::index::node::Node;
use crate::index::{IndexStats, Iter};
use crate::record::Keyed;

/// An in-memory ordered index mapping keys to records.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────────────┐
/// │                     OrderedIndex<R>                       │
/// │  ┌────────┐   ┌─────────────────────────────────────────┐ │
/// │  │  root  │──▶│   slots: Vec<Option<Node<R>>>           │ │
/// │  │ NodeId │   │   [Node0] [None] [Node2] [Node3] ...    │ │
/// │  └────────┘   └─────────────────────────────────────────┘ │
/// │  ┌──────────────┐  ┌──────────────┐                       │
/// │  │  free_list   │  │    stats     │                       │
/// │  │ Vec<NodeId>  │  │  IndexStats  │                       │
/// │  └──────────────┘  └──────────────┘                       │
/// └───────────────────────────────────────────────────────────┘
/// ```
///
/// # Ordering
/// For every node, keys in its left subtree are strictly less than its key
/// and keys in its right subtree are greater or equal. Duplicate keys are
/// allowed; [`find`](Self::find) and [`remove`](Self::remove) act on the
/// shallowest match, which is the earliest inserted.
///
/// # Ownership
/// The arena owns every node. Child and parent links are [`NodeId`]
/// handles, so dropping the index frees all nodes without recursion and
/// the parent link can never keep a node alive.
///
/// # Example
/// ```
/// use bidtree::{Bid, BidId, OrderedIndex};
///
/// let mut index = OrderedIndex::new();
/// index.insert(Bid::new("10", "Desk", "General", 100.0));
/// index.insert(Bid::new("5", "Lamp", "General", 12.0));
///
/// assert_eq!(index.find(&BidId::from("5")).map(|b| b.title.as_str()), Some("Lamp"));
///
/// let ids: Vec<&str> = index.iter().map(|b| b.bid_id.as_str()).collect();
/// assert_eq!(ids, vec!["5", "10"]);
/// ```
pub struct OrderedIndex<R> {
    /// Node storage. `None` marks a freed slot.
    slots: Vec<Option<Node<R>>>,

    /// Freed slots, reused LIFO.
    free_list: Vec<NodeId>,

    root: Option<NodeId>,

    /// Number of live records.
    len: usize,

    stats: IndexStats,
}

impl<R> OrderedIndex<R> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            root: None,
            len: 0,
            stats: IndexStats::new(),
        }
    }

    /// Number of records in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Operation counters for this index.
    #[inline]
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Remove every record. Counters are kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.root = None;
        self.len = 0;
    }

    /// Records in ascending key order.
    ///
    /// The sequence is lazy and starts from the smallest key on every call.
    #[inline]
    pub fn in_order(&self) -> Iter<'_, R> {
        Iter::new(self)
    }

    /// Same as [`in_order`](Self::in_order).
    #[inline]
    pub fn iter(&self) -> Iter<'_, R> {
        self.in_order()
    }

    /// The record at the root, if any.
    pub fn root(&self) -> Option<&R> {
        self.root.map(|id| &self.node(id).record)
    }

    /// The record with the smallest key.
    pub fn min(&self) -> Option<&R> {
        self.root.map(|id| &self.node(self.find_min(id)).record)
    }

    /// The record with the largest key.
    pub fn max(&self) -> Option<&R> {
        self.root.map(|id| &self.node(self.find_max(id)).record)
    }

    /// Number of nodes on the longest root-to-leaf path. Zero when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(id);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }

        height
    }

    // ========================================================================
    // Internal: arena access
    // ========================================================================

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<R> {
        self.slots[id.0].as_ref().expect("dangling node handle")
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<R> {
        self.slots[id.0].as_mut().expect("dangling node handle")
    }

    /// Store a node, reusing a freed slot when one is available.
    fn alloc(&mut self, node: Node<R>) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Take a node out of the arena and put its slot on the free list.
    fn release(&mut self, id: NodeId) -> Node<R> {
        let node = self.slots[id.0].take().expect("double release of node");
        self.free_list.push(id);
        node
    }

    // ========================================================================
    // Internal: navigation
    // ========================================================================

    /// Leftmost node of the subtree headed by `id`.
    pub(crate) fn find_min(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// Rightmost node of the subtree headed by `id`.
    fn find_max(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// In-order successor of `id`, following parent links when needed.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.find_min(right));
        }

        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent;
        }
        None
    }

    /// Put `new` where `old` hangs under `parent` (or at the root).
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let parent_node = self.node_mut(p);
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }

        if let Some(child) = new {
            self.node_mut(child).parent = parent;
        }
    }

    /// Detach `id` from the tree and return its record.
    ///
    /// A node with two children keeps its position: the successor's record
    /// moves into it and the successor node is detached instead.
    fn unlink(&mut self, id: NodeId) -> R {
        let (parent, left, right) = {
            let node = self.node(id);
            (node.parent, node.left, node.right)
        };

        match (left, right) {
            (None, None) => {
                debug!("removing leaf {}", id);
                self.replace_child(parent, id, None);
                self.release(id).record
            }
            (Some(child), None) | (None, Some(child)) => {
                debug!("removing {} and lifting its only child {}", id, child);
                self.replace_child(parent, id, Some(child));
                self.release(id).record
            }
            (Some(_), Some(right)) => {
                // The successor has no left child, so this recursion stops
                // after one level in one of the arms above.
                let successor = self.find_min(right);
                debug!("removing {} by promoting successor {}", id, successor);
                let promoted = self.unlink(successor);
                std::mem::replace(&mut self.node_mut(id).record, promoted)
            }
        }
    }
}

impl<R: Keyed> OrderedIndex<R> {
    // ========================================================================
    // Public API
    // ========================================================================

    /// Insert a record under its key.
    ///
    /// Never fails and never touches existing records. A record whose key is
    /// already present is stored as a separate node to the right.
    pub fn insert(&mut self, record: R) {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                let id = self.alloc(Node::new(record, None));
                debug!("created root {}", id);
                self.root = Some(id);
                self.len += 1;
                self.stats.record_insert();
                return;
            }
        };

        loop {
            let node = self.node(current);
            let go_right = record.key() >= node.record.key();
            let next = if go_right { node.right } else { node.left };

            match next {
                Some(child) => current = child,
                None => {
                    let id = self.alloc(Node::new(record, Some(current)));
                    let parent = self.node_mut(current);
                    if go_right {
                        parent.right = Some(id);
                    } else {
                        parent.left = Some(id);
                    }
                    debug!(
                        "attached {} as {} child of {}",
                        id,
                        if go_right { "right" } else { "left" },
                        current
                    );
                    break;
                }
            }
        }

        self.len += 1;
        self.stats.record_insert();
    }

    /// Look up the record stored under `key`.
    ///
    /// Runs in O(height) comparisons and has no effect on the tree.
    pub fn find(&self, key: &R::Key) -> Option<&R> {
        let found = self.find_node(key).map(|id| &self.node(id).record);
        self.stats.record_lookup(found.is_some());
        trace!("lookup {}", if found.is_some() { "hit" } else { "miss" });
        found
    }

    /// True if some record is stored under `key`.
    pub fn contains(&self, key: &R::Key) -> bool {
        self.find_node(key).is_some()
    }

    /// Remove the record stored under `key` and return it.
    ///
    /// Removing an absent key leaves the tree untouched and returns `None`.
    pub fn remove(&mut self, key: &R::Key) -> Option<R> {
        let Some(id) = self.find_node(key) else {
            debug!("remove: key not present");
            self.stats.record_removal(false);
            return None;
        };

        let record = self.unlink(id);
        self.len -= 1;
        self.stats.record_removal(true);
        Some(record)
    }

    /// Verify the tree's structural rules.
    ///
    /// Checks key ordering (left strictly less, right greater or equal, for
    /// whole subtrees), parent links, and the record count. Returns the first
    /// violation found.
    pub fn check_invariants(&self) -> Result<()> {
        if let Some(root) = self.root {
            if let Some(parent) = self.node(root).parent {
                return Err(violation(root, format!("root has parent {}", parent)));
            }
        }

        let mut reachable = 0;
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = self.node(id);

            for (child, side) in [(node.left, "left"), (node.right, "right")] {
                let Some(child) = child else { continue };
                if self.node(child).parent != Some(id) {
                    return Err(violation(
                        child,
                        format!("{} child of {} has wrong parent link", side, id),
                    ));
                }
                stack.push(child);
            }

            // Largest key on the left must be strictly smaller, smallest key
            // on the right must not be smaller.
            if let Some(left) = node.left {
                if self.node(self.find_max(left)).record.key() >= node.record.key() {
                    return Err(violation(id, "left subtree holds a key >= node key".into()));
                }
            }
            if let Some(right) = node.right {
                if self.node(self.find_min(right)).record.key() < node.record.key() {
                    return Err(violation(id, "right subtree holds a key < node key".into()));
                }
            }
        }

        let occupied = self.slots.len() - self.free_list.len();
        if reachable != self.len || occupied != self.len {
            return Err(violation(
                self.root.unwrap_or(NodeId::new(0)),
                format!(
                    "len is {} but {} nodes are reachable and {} slots occupied",
                    self.len, reachable, occupied
                ),
            ));
        }

        Ok(())
    }

    /// Shallowest node whose key equals `key`.
    fn find_node(&self, key: &R::Key) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match key.cmp(node.record.key()) {
                std::cmp::Ordering::Equal => return Some(id),
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
            };
        }
        None
    }
}

fn violation(node: NodeId, reason: String) -> Error {
    Error::InvariantViolation { node, reason }
}

impl<R> Default for OrderedIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: fmt::Debug> fmt::Debug for OrderedIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, R> IntoIterator for &'a OrderedIndex<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Iter<'a, R> {
        self.iter()
    }
}

impl<R: Keyed> Extend<R> for OrderedIndex<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }
}

impl<R: Keyed> FromIterator<R> for OrderedIndex<R> {
    fn from_iter<I: IntoIterator<Item = R>>(records: I) -> Self {
        let mut index = Self::new();
        index.extend(records);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal record: key plus a tag to tell duplicates apart.
    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        key: u32,
        tag: &'static str,
    }

    impl Keyed for Item {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.key
        }
    }

    fn item(key: u32) -> Item {
        Item { key, tag: "" }
    }

    fn build(keys: &[u32]) -> OrderedIndex<Item> {
        keys.iter().copied().map(item).collect()
    }

    fn keys(index: &OrderedIndex<Item>) -> Vec<u32> {
        index.iter().map(|i| i.key).collect()
    }

    #[test]
    fn test_new_is_empty() {
        let index: OrderedIndex<Item> = OrderedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.height(), 0);
        assert!(index.root().is_none());
        assert!(index.find(&1).is_none());
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_insert_first_becomes_root() {
        let mut index = OrderedIndex::new();
        index.insert(item(7));
        assert_eq!(index.root().map(|i| i.key), Some(7));
        assert_eq!(index.len(), 1);
        assert_eq!(index.height(), 1);
    }

    #[test]
    fn test_insert_links_parent() {
        let index = build(&[10, 5, 15]);
        let root = index.root_id().unwrap();
        let left = index.node(root).left.unwrap();
        let right = index.node(root).right.unwrap();
        assert_eq!(index.node(left).parent, Some(root));
        assert_eq!(index.node(right).parent, Some(root));
        assert_eq!(index.node(left).record.key, 5);
        assert_eq!(index.node(right).record.key, 15);
    }

    #[test]
    fn test_equal_keys_descend_right() {
        let mut index = OrderedIndex::new();
        index.insert(Item { key: 4, tag: "first" });
        index.insert(Item { key: 4, tag: "second" });

        let root = index.root_id().unwrap();
        assert!(index.node(root).left.is_none());
        let right = index.node(root).right.unwrap();
        assert_eq!(index.node(right).record.tag, "second");

        // Lookups hit the shallowest duplicate.
        assert_eq!(index.find(&4).unwrap().tag, "first");
        assert_eq!(index.remove(&4).unwrap().tag, "first");
        assert_eq!(index.find(&4).unwrap().tag, "second");
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_find_min_and_max() {
        let index = build(&[50, 30, 70, 20, 40, 60, 80]);
        let root = index.root_id().unwrap();
        assert_eq!(index.node(index.find_min(root)).record.key, 20);
        assert_eq!(index.min().unwrap().key, 20);
        assert_eq!(index.max().unwrap().key, 80);
    }

    #[test]
    fn test_remove_leaf() {
        let mut index = build(&[10, 5, 15]);
        assert_eq!(index.remove(&5).map(|i| i.key), Some(5));
        let root = index.root_id().unwrap();
        assert!(index.node(root).left.is_none());
        assert_eq!(keys(&index), vec![10, 15]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_one_child_relinks_parent() {
        // 10 -> 5 -> 3 (left chain under 5)
        let mut index = build(&[10, 5, 3]);
        index.remove(&5);

        let root = index.root_id().unwrap();
        let left = index.node(root).left.unwrap();
        assert_eq!(index.node(left).record.key, 3);
        assert_eq!(index.node(left).parent, Some(root));
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_root_with_one_child() {
        let mut index = build(&[1, 2, 3]);
        index.remove(&1);
        let root = index.root_id().unwrap();
        assert_eq!(index.node(root).record.key, 2);
        assert_eq!(index.node(root).parent, None);
        assert_eq!(keys(&index), vec![2, 3]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_two_children_promotes_successor() {
        let mut index = build(&[10, 5, 15, 12, 20]);
        let root_before = index.root_id().unwrap();

        assert_eq!(index.remove(&10).map(|i| i.key), Some(10));

        // Root keeps its slot, only its record changes.
        assert_eq!(index.root_id(), Some(root_before));
        assert_eq!(index.root().unwrap().key, 12);
        assert_eq!(keys(&index), vec![5, 12, 15, 20]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_two_children_successor_is_right_child() {
        let mut index = build(&[10, 5, 15, 20]);
        index.remove(&10);
        assert_eq!(index.root().unwrap().key, 15);
        assert_eq!(keys(&index), vec![5, 15, 20]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_successor_with_right_child() {
        // Successor 12 has a right child 13 that must move up.
        let mut index = build(&[10, 5, 15, 12, 13, 20]);
        index.remove(&10);
        assert_eq!(index.root().unwrap().key, 12);
        assert_eq!(keys(&index), vec![5, 13, 15, 20]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut index = build(&[10, 5, 15]);
        assert!(index.remove(&99).is_none());
        assert_eq!(keys(&index), vec![5, 10, 15]);
        assert_eq!(index.len(), 3);

        let mut empty: OrderedIndex<Item> = OrderedIndex::new();
        assert!(empty.remove(&1).is_none());
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut index = build(&[10, 5, 15]);
        index.remove(&5);
        index.remove(&15);
        assert_eq!(index.free_list.len(), 2);

        index.insert(item(1));
        index.insert(item(2));
        assert!(index.free_list.is_empty());
        assert_eq!(index.slots.len(), 3);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_skewed_tree_height() {
        let index = build(&(0..1000).collect::<Vec<_>>());
        assert_eq!(index.height(), 1000);
        assert_eq!(index.iter().count(), 1000);
    }

    #[test]
    fn test_deep_skewed_tree_drops_without_recursion() {
        let index = build(&(0..10_000).collect::<Vec<_>>());
        assert_eq!(index.height(), 10_000);
        drop(index);
    }

    #[test]
    fn test_clear() {
        let mut index = build(&[3, 1, 2]);
        index.clear();
        assert!(index.is_empty());
        assert!(index.iter().next().is_none());
        index.insert(item(4));
        assert_eq!(keys(&index), vec![4]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn test_stats_track_operations() {
        let mut index = build(&[2, 1, 3]);
        index.find(&1);
        index.find(&9);
        index.remove(&2);
        index.remove(&2);

        let snapshot = index.stats().snapshot();
        assert_eq!(snapshot.inserts, 3);
        assert_eq!(snapshot.lookup_hits, 1);
        assert_eq!(snapshot.lookup_misses, 1);
        assert_eq!(snapshot.removals, 1);
        assert_eq!(snapshot.removal_misses, 1);
    }

    #[test]
    fn test_check_invariants_detects_bad_parent() {
        let mut index = build(&[10, 5]);
        let root = index.root_id().unwrap();
        let left = index.node(root).left.unwrap();
        index.node_mut(left).parent = None;

        match index.check_invariants() {
            Err(Error::InvariantViolation { node, .. }) => assert_eq!(node, left),
            other => panic!("Expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_invariants_detects_misordered_key() {
        let mut index = build(&[10, 5]);
        let root = index.root_id().unwrap();
        let left = index.node(root).left.unwrap();
        index.node_mut(left).record.key = 10;

        assert!(matches!(
            index.check_invariants(),
            Err(Error::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_debug_lists_in_order() {
        let index = build(&[2, 1]);
        let debug = format!("{:?}", index);
        assert!(debug.find("key: 1").unwrap() < debug.find("key: 2").unwrap());
    }
}
