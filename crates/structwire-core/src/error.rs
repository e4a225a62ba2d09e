//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading or assembling a schema.
///
/// All of them are detected before any layout is computed.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("cannot read schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not well-formed JSON or has the wrong shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endianness section is absent.
    #[error("missing endianness configuration (expected \"endianness\": {{\"host\": .., \"network\": ..}})")]
    MissingEndianness,

    /// A primitive was declared with a zero width.
    #[error("primitive type '{name}' has invalid size {width} (must be > 0)")]
    InvalidWidth { name: String, width: u64 },

    /// A member was declared with a zero repeat count.
    #[error("member '{aggregate}.{member}' has invalid len {count} (must be >= 1)")]
    InvalidCount {
        aggregate: String,
        member: String,
        count: u64,
    },

    /// An aggregate declares no members.
    #[error("struct '{name}' declares no members")]
    EmptyAggregate { name: String },

    /// A member declaration could not be decoded.
    #[error("member '{aggregate}.{member}' is malformed: {detail}")]
    InvalidMember {
        aggregate: String,
        member: String,
        detail: String,
    },

    /// Two members of one aggregate share a name.
    #[error("struct '{aggregate}' declares member '{member}' more than once")]
    DuplicateMember { aggregate: String, member: String },

    /// A type name is declared twice (as primitive and struct, or twice as either).
    #[error("type '{name}' is declared more than once")]
    DuplicateType { name: String },
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
