//! The ordered index.
//!
//! An unbalanced binary search tree keyed by a record's [`Keyed::key`].
//!
//! # Components
//! - [`OrderedIndex`] - The tree: insert, find, remove, in-order traversal
//! - [`Iter`] - Lazy in-order iterator
//! - [`SharedIndex`] - Lock-wrapped index for multi-threaded callers
//! - [`IndexStats`] - Operation counters
//!
//! [`Keyed::key`]: crate::record::Keyed::key

mod iter;
mod node;
mod ordered_index;
mod shared;
mod stats;

pub use iter::Iter;
pub use ordered_index::OrderedIndex;
pub use shared::SharedIndex;
pub use stats::{IndexStats, StatsSnapshot};
