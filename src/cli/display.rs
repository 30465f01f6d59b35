//! Bid formatting for the menu.

use std::fmt;

use crate::record::Bid;

/// Displays a bid as `<id>: <title> | <amount> | <fund>`.
pub struct BidLine<'a>(pub &'a Bid);

impl fmt::Display for BidLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bid = self.0;
        write!(
            f,
            "{}: {} | {} | {}",
            bid.bid_id, bid.title, bid.amount, bid.fund
        )
    }
}
