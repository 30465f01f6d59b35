//! bidtree - an in-memory ordered index of bid records.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            bidtree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Menu Layer (cli/)                        │   │
//! │  │        Session → Command → dispatch → BidLine            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Index Layer (index/)                     │   │
//! │  │     OrderedIndex (unbalanced BST) + Iter + IndexStats    │   │
//! │  │            SharedIndex (RwLock for threads)              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Record Layer (record/)                   │   │
//! │  │              Keyed trait + Bid + BidId                   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`record`] - Record types and the [`Keyed`] contract
//! - [`index`] - The ordered index
//! - [`cli`] - Interactive menu
//!
//! # Quick Start
//! ```
//! use bidtree::{Bid, BidId, OrderedIndex};
//!
//! let mut index = OrderedIndex::new();
//! for id in ["10", "5", "15", "12", "20"] {
//!     index.insert(Bid::new(id, "", "", 0.0));
//! }
//!
//! index.remove(&BidId::from("10"));
//! assert_eq!(index.root().unwrap().bid_id.as_str(), "12");
//!
//! let ids: Vec<&str> = index.in_order().map(|b| b.bid_id.as_str()).collect();
//! assert_eq!(ids, vec!["5", "12", "15", "20"]);
//! ```

pub mod cli;
pub mod common;
pub mod index;
pub mod record;

// Re-export commonly used items at crate root for convenience
pub use common::{Config, Error, NodeId, Result};
pub use index::{IndexStats, Iter, OrderedIndex, SharedIndex, StatsSnapshot};
pub use record::{Bid, BidId, Keyed};
