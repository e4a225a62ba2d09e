//! Emitter error types.

use std::path::PathBuf;

use structwire_layout::LayoutError;

/// Errors that can occur while generating or writing C artifacts.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Layout computation failed; nothing is emitted.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// A table entry does not fit the `uint32_t` element type.
    #[error("layout of '{type_name}' has offset {value}, which exceeds uint32_t")]
    TableOverflow { type_name: String, value: u64 },

    /// Writing an artifact failed.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for emitter operations.
pub type Result<T> = std::result::Result<T, EmitError>;
