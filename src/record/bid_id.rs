//! Bid identifier key.

use std::cmp::Ordering;
use std::fmt;

/// The key of a [`Bid`](super::Bid).
///
/// Bid ids are free text but are ordered by their leading integer, the way
/// C's `atoi` reads them: leading whitespace is skipped, an optional sign is
/// accepted, and digits are consumed up to the first non-digit. Text with no
/// leading digits reads as `0`. Values outside `i64` saturate.
///
/// Equality is plain string equality, so two ids with the same numeric
/// prefix (`"7"` and `"007"`) are ordered by their raw text to keep the
/// order total.
///
/// # Example
/// ```
/// use bidtree::BidId;
///
/// assert!(BidId::from("5") < BidId::from("10"));
/// assert_eq!(BidId::from("98109 ").numeric(), 98109);
/// assert_ne!(BidId::from("7"), BidId::from("007"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BidId {
    raw: String,
    numeric: i64,
}

impl BidId {
    /// Create an id from its text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let numeric = leading_integer(&raw);
        Self { raw, numeric }
    }

    /// The id as typed.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The leading integer used for ordering.
    #[inline]
    pub fn numeric(&self) -> i64 {
        self.numeric
    }

    /// True for the id of an empty bid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Parse the leading integer of `text` with `atoi` rules.
fn leading_integer(text: &str) -> i64 {
    let bytes = text.as_bytes();
    let mut pos = 0;

    // C isspace: space, \t, \n, \v, \f, \r
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r') {
        pos += 1;
    }

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    while let Some(digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
        let d = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
        pos += 1;
    }

    value
}

impl Ord for BidId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric
            .cmp(&other.numeric)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for BidId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for BidId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for BidId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for BidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
