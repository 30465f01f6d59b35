//! Bid record.

use super::{BidId, Keyed};

/// One auction bid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bid {
    /// Unique identifier, also the index key.
    pub bid_id: BidId,
    pub title: String,
    pub fund: String,
    pub amount: f64,
}

impl Bid {
    /// Create a bid.
    pub fn new(
        bid_id: impl Into<BidId>,
        title: impl Into<String>,
        fund: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            bid_id: bid_id.into(),
            title: title.into(),
            fund: fund.into(),
            amount,
        }
    }
}

impl Keyed for Bid {
    type Key = BidId;

    #[inline]
    fn key(&self) -> &BidId {
        &self.bid_id
    }
}
