//! Host and wire layout inference for structwire schemas.
//!
//! Given a [`Schema`](structwire_core::Schema), the engine computes for each
//! type a flat list of byte ranges, one per scalar leaf:
//!
//! - the **host layout**, placing every field at its natural alignment with
//!   C-style inter-member and trailing padding;
//! - the **net layout**, packing the same fields back to back and marking
//!   them for byte reversal when host and network byte order differ.
//!
//! Both are memoized per type in a caller-owned [`LayoutContext`].

pub mod context;
pub mod error;
pub mod layout;
pub mod net;
pub mod range;
pub mod report;

pub use context::{LayoutContext, LayoutStats};
pub use error::{LayoutError, Result};
pub use layout::{align_up, alignment, size_of, Layout};
pub use net::pack;
pub use range::ByteRange;
pub use report::TypeReport;
