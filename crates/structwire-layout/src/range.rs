//! Byte range of a single field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placement of one scalar field as a `(start, end)` pair of byte offsets.
///
/// `end < start` is a valid state: in a net layout it marks a field whose
/// bytes are copied back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u64; 2]", into = "[u64; 2]")]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        ByteRange { start, end }
    }

    /// Number of bytes covered, regardless of direction.
    pub fn width(&self) -> u64 {
        self.start.abs_diff(self.end)
    }

    /// Whether this range carries the reversal marker.
    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    /// The same bytes with the direction flipped.
    pub fn reversed(&self) -> Self {
        ByteRange::new(self.end, self.start)
    }

    /// Shift both endpoints by `offset`, or `None` if either overflows.
    pub fn checked_offset(&self, offset: u64) -> Option<Self> {
        Some(ByteRange::new(
            self.start.checked_add(offset)?,
            self.end.checked_add(offset)?,
        ))
    }

    /// Lower endpoint.
    pub fn lo(&self) -> u64 {
        self.start.min(self.end)
    }

    /// Upper endpoint.
    pub fn hi(&self) -> u64 {
        self.start.max(self.end)
    }
}

impl From<[u64; 2]> for ByteRange {
    fn from([start, end]: [u64; 2]) -> Self {
        ByteRange::new(start, end)
    }
}

impl From<ByteRange> for [u64; 2] {
    fn from(range: ByteRange) -> Self {
        [range.start, range.end]
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.start, self.end)
    }
}
