//! Flattened field layouts and the alignment/size arithmetic over them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::range::ByteRange;

/// Alignment of a field list: the widest field's width.
///
/// Direction is ignored, so a reversed range counts with its absolute width.
pub fn alignment(ranges: &[ByteRange]) -> Result<u64> {
    ranges
        .iter()
        .map(ByteRange::width)
        .max()
        .ok_or(LayoutError::EmptyLayout)
}

/// Round `address` up to the next multiple of `alignment`.
pub fn align_up(address: u64, alignment: u64) -> Result<u64> {
    if alignment == 0 {
        return Err(LayoutError::ZeroAlignment { address });
    }
    address
        .div_ceil(alignment)
        .checked_mul(alignment)
        .ok_or(LayoutError::AlignOverflow { address, alignment })
}

/// Padded size of a field list: the last field's upper end rounded up to
/// the list's alignment.
pub fn size_of(ranges: &[ByteRange]) -> Result<u64> {
    let align = alignment(ranges)?;
    let last = ranges.last().ok_or(LayoutError::EmptyLayout)?;
    align_up(last.hi(), align)
}

/// Ordered list of field placements, one entry per scalar leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    ranges: Vec<ByteRange>,
}

impl Layout {
    pub fn new(ranges: Vec<ByteRange>) -> Self {
        Layout { ranges }
    }

    /// Single-field layout of a primitive of `width` bytes.
    pub fn primitive(width: u64) -> Self {
        Layout::new(vec![ByteRange::new(0, width)])
    }

    pub fn ranges(&self) -> &[ByteRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ByteRange> {
        self.ranges.iter()
    }

    /// Number of scalar fields.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// See [`alignment`].
    pub fn alignment(&self) -> Result<u64> {
        alignment(&self.ranges)
    }

    /// See [`size_of`].
    pub fn size(&self) -> Result<u64> {
        size_of(&self.ranges)
    }

    /// Largest byte offset touched by any field. Zero for an empty layout.
    ///
    /// For a net layout this is the serialized buffer length.
    pub fn wire_len(&self) -> u64 {
        self.ranges.iter().map(ByteRange::hi).max().unwrap_or(0)
    }

    /// `[start0, end0, start1, end1, ...]` in field order.
    pub fn flatten(&self) -> Vec<u64> {
        self.ranges.iter().flat_map(|r| [r.start, r.end]).collect()
    }
}

impl From<Vec<ByteRange>> for Layout {
    fn from(ranges: Vec<ByteRange>) -> Self {
        Layout::new(ranges)
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a ByteRange;
    type IntoIter = std::slice::Iter<'a, ByteRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{range}")?;
        }
        write!(f, "]")
    }
}
