//! Byte order configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte ordering of a machine or of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endianness {
    Little,
    Big,
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Little => write!(f, "little"),
            Endianness::Big => write!(f, "big"),
        }
    }
}

/// Host and network byte order for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndiannessConfig {
    /// Byte order of the machine the generated structs live on.
    pub host: Endianness,
    /// Byte order of the serialized buffer.
    pub network: Endianness,
}

impl EndiannessConfig {
    pub fn new(host: Endianness, network: Endianness) -> Self {
        EndiannessConfig { host, network }
    }

    /// Host and network agree on `order`.
    pub fn uniform(order: Endianness) -> Self {
        EndiannessConfig::new(order, order)
    }

    /// Whether field bytes must be reversed on their way to the wire.
    pub fn needs_swap(&self) -> bool {
        self.host != self.network
    }
}

impl fmt::Display for EndiannessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "host={}, network={}", self.host, self.network)
    }
}
