//! Schema model and configuration loading for structwire.
//!
//! A structwire schema declares fixed-width primitive types and aggregate
//! types built from them. Aggregates may embed other aggregates and repeat
//! a member as a fixed-size array. Together with an [`EndiannessConfig`] the
//! schema is everything the layout engine needs.
//!
//! ## Modules
//!
//! - [`schema`]: Tagged type definitions and the ordered schema container
//! - [`endian`]: Host/network byte order configuration
//! - [`config`]: JSON schema file loading and shape validation
//! - [`error`]: Configuration error types

pub mod config;
pub mod endian;
pub mod error;
pub mod schema;

pub use config::Config;
pub use endian::{Endianness, EndiannessConfig};
pub use error::{Result, SchemaError};
pub use schema::{Aggregate, Member, Schema, TypeDef, TypeName};
