//! Type-erased access to the RTTI of a type.
//!
//! Every declared type has one `&'static dyn RttiHelper`. It answers the
//! same questions as the static traits once the concrete type is gone, for
//! example when the caller only holds a [`TypeUuid`](crate::TypeUuid) read
//! from a file and a type-erased pointer.
//!
//! | Declaration                          | Helper                         |
//! |--------------------------------------|--------------------------------|
//! | `#[derive(Rtti)]`                     | [`IntrusiveRttiHelper<T>`]     |
//! | `#[derive(TypeInfo)]`, `impl_type_info!` | [`TypeInfoOnlyRttiHelper<T>`] |
//! | `impl_external_rtti!`                 | [`ExternalRttiHelper`]         |
//!
//! Intrusive and type-info-only helpers are zero-sized constants. External
//! helpers hold their base list and are built once, on first use.
#![expect(unsafe_code, reason = "Type-erased pointers are read back as concrete types.")]

// -----------------------------------------------------------------------------
// Modules

mod external;
mod intrusive;
mod rtti_helper;
mod type_info_only;

// -----------------------------------------------------------------------------
// Exports

pub use external::{ExternalBase, ExternalRttiHelper};
pub use intrusive::IntrusiveRttiHelper;
pub use rtti_helper::{RttiHelper, rtti_helper_of};
pub use type_info_only::TypeInfoOnlyRttiHelper;
