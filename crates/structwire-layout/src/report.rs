//! Per-type summary handed to emitters.

use serde::Serialize;

use crate::error::Result;
use crate::layout::Layout;

/// Computed layout facts for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReport {
    pub name: String,
    /// Padded native layout.
    pub host: Layout,
    /// Packed wire layout, possibly with reversal markers.
    pub net: Layout,
    /// Native `sizeof`, trailing padding included.
    pub host_size: u64,
    pub alignment: u64,
    /// Serialized buffer length.
    pub wire_len: u64,
    /// Number of scalar leaves (equal in both layouts).
    pub field_count: usize,
}

impl TypeReport {
    pub fn new(name: impl Into<String>, host: Layout, net: Layout) -> Result<Self> {
        Ok(TypeReport {
            name: name.into(),
            host_size: host.size()?,
            alignment: host.alignment()?,
            wire_len: net.wire_len(),
            field_count: host.len(),
            host,
            net,
        })
    }
}
