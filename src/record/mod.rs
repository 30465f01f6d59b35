//! Records stored in the index.
//!
//! The index only needs one thing from a record: a key with a total order.
//! [`Keyed`] is that contract; [`Bid`] is the record the menu works with.

mod bid;
mod bid_id;

pub use bid::Bid;
pub use bid_id::BidId;

/// A record with a designated, totally-ordered key field.
///
/// The key must not change while the record sits in an index. The index
/// only ever hands out shared references, so safe code cannot break this.
pub trait Keyed {
    /// The key type. Its `Ord` decides placement in the tree.
    type Key: Ord;

    /// Borrow the record's key.
    fn key(&self) -> &Self::Key;
}
