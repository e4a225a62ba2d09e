//! Packed wire layout derivation.

use structwire_core::EndiannessConfig;

use crate::layout::Layout;
use crate::range::ByteRange;

/// Derive the net layout from a host layout.
///
/// Fields keep their order and width but are laid out back to back from
/// offset 0. When host and network byte order differ, every range is
/// stored reversed, width-1 fields included, so the copier never has to
/// special-case field sizes.
///
/// Returns `None` when the packed length does not fit in a `u64`.
pub fn pack(host: &Layout, endianness: EndiannessConfig) -> Option<Layout> {
    let swap = endianness.needs_swap();
    let mut cursor = 0u64;
    host.iter()
        .map(|field| {
            let packed = ByteRange::new(cursor, cursor.checked_add(field.width())?);
            cursor = packed.end;
            Some(if swap { packed.reversed() } else { packed })
        })
        .collect::<Option<Vec<_>>>()
        .map(Layout::from)
}
