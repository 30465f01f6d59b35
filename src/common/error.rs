//! Error types for bidtree.
//!
//! The index itself never fails: a missing key is `None`, and removing an
//! absent key does nothing. Errors come from the menu layer (bad input, I/O)
//! and from [`OrderedIndex::check_invariants`](crate::index::OrderedIndex::check_invariants).

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in bidtree.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading commands or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Menu input that is not a number.
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    /// Bid amount that does not parse as a number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Input ended while a prompt was still waiting for a field.
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    /// The tree shape broke one of its structural rules.
    ///
    /// This indicates a bug in the index, never bad caller input.
    #[error("Invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidChoice("abc".to_string());
        assert_eq!(format!("{}", err), "Invalid choice: abc");

        let err = Error::InvalidAmount("12x".to_string());
        assert_eq!(format!("{}", err), "Invalid amount: 12x");

        let err = Error::InvariantViolation {
            node: NodeId::new(3),
            reason: "left key not less than parent".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invariant violated at Node(3): left key not less than parent"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::from(io_err);
        assert!(err.source().is_some());
        assert!(Error::UnexpectedEof("title").source().is_none());
    }
}
