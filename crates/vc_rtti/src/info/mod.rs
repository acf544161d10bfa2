//! Compile-time type information.
//!
//! - [`Typed`]: implemented by every declared type. Gives the stable identity,
//!   the display name, the template identity of generic instantiations and the
//!   [`TypeTraits`] without an instance.
//! - [`TypeInfo`]: the same data gathered in one `'static` record, together with
//!   the compiler's [`TypeId`](core::any::TypeId), size and alignment.
//! - [`TypeTraits`]: bitflags describing the kind of type.
//!
//! Declare types with [`#[derive(TypeInfo)]`](crate::derive::TypeInfo),
//! [`#[derive(Rtti)]`](crate::derive::Rtti) or [`impl_type_info!`](crate::derive::impl_type_info).

// -----------------------------------------------------------------------------
// Modules

mod type_info;
mod type_traits;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use type_info::TypeInfo;
pub use type_traits::TypeTraits;
pub use typed::{Typed, generic_type_uuid_of, type_uuid_of};
