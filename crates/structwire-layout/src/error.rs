//! Layout engine errors.

use structwire_core::TypeName;

/// Errors raised while computing layouts.
///
/// None of these are retryable: the computation is a pure function of the
/// schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A layout was requested for a name the schema does not declare.
    #[error("type '{name}' is not declared")]
    UnknownType { name: TypeName },

    /// An aggregate member references an undeclared type.
    #[error("member '{aggregate}.{member}' references undeclared type '{type_name}'")]
    UnresolvedMember {
        aggregate: TypeName,
        member: String,
        type_name: TypeName,
    },

    /// A type was re-entered while its own layout was being computed.
    #[error("cyclic type reference: {}", path.join(" -> "))]
    CyclicSchema { path: Vec<TypeName> },

    /// Alignment or size was requested on a layout with no fields.
    #[error("alignment of an empty layout is undefined")]
    EmptyLayout,

    /// `align_up` was asked to align to a zero boundary.
    #[error("cannot align address {address} to a zero boundary")]
    ZeroAlignment { address: u64 },

    /// Rounding `address` up to `alignment` does not fit in a `u64`.
    #[error("aligning address {address} to {alignment} overflows")]
    AlignOverflow { address: u64, alignment: u64 },

    /// An offset or size of the type does not fit in a `u64`.
    #[error("layout of '{type_name}' exceeds the 64-bit address space")]
    Overflow { type_name: TypeName },
}

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
