//! Interactive menu around the index.
//!
//! This layer only parses input and renders output; every decision about
//! records is made by [`OrderedIndex`](crate::index::OrderedIndex).
//!
//! # Components
//! - [`Command`] - Menu choices
//! - [`Session`] - Reads commands and dispatches them against an index
//! - [`BidLine`] - Bid formatting

mod command;
mod display;
mod session;

pub use command::Command;
pub use display::BidLine;
pub use session::{Flow, Session};
