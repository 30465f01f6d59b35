//! Lazy in-order traversal.

use std::iter::FusedIterator;

use crate::common::NodeId;
use crate::index::OrderedIndex;

/// Iterator over an index's records in ascending key order.
///
/// Created by [`OrderedIndex::in_order`]. It starts at the leftmost node
/// and steps to each in-order successor, climbing parent links when a node
/// has no right subtree, so it needs no stack of its own.
///
/// The iterator borrows the index, so the tree cannot change underneath it.
pub struct Iter<'a, R> {
    index: &'a OrderedIndex<R>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, R> Iter<'a, R> {
    pub(crate) fn new(index: &'a OrderedIndex<R>) -> Self {
        Self {
            index,
            next: index.root_id().map(|root| index.find_min(root)),
            remaining: index.len(),
        }
    }
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<&'a R> {
        let index = self.index;
        let id = self.next?;
        self.next = index.successor(id);
        self.remaining -= 1;
        Some(&index.node(id).record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Iter<'_, R> {}

impl<R> FusedIterator for Iter<'_, R> {}

impl<R> Clone for Iter<'_, R> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            next: self.next,
            remaining: self.remaining,
        }
    }
}
