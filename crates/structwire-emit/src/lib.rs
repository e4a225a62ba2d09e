//! C source emitters for structwire layouts.
//!
//! Turns a schema and its computed layouts into C text:
//!
//! - [`cdecl`]: native `struct` declarations, one per aggregate
//! - [`tables`]: the shared layout record header plus per-type host/net
//!   offset tables for a generic byte copier
//! - [`artifacts`]: bundling the generated files and writing them out

pub mod artifacts;
pub mod cdecl;
pub mod error;
pub mod tables;

pub use artifacts::{Artifact, ArtifactDir, Artifacts};
pub use cdecl::{include_guard, struct_header};
pub use error::{EmitError, Result};
pub use tables::{layout_header, layout_source, runtime_header, RUNTIME_HEADER};
