//! Lookup of helpers by uuid.
//!
//! Static type information is lost once a value is stored type-erased, e.g.
//! in a save file that only keeps a [`TypeUuid`](crate::TypeUuid). The
//! [`TypeRegistry`] maps uuids back to the `&'static dyn RttiHelper` of
//! the registered types.
//!
//! Registration is append-only: a type is never removed, and registering it
//! again is a no-op. Registering a type also registers its declared bases.
//!
//! ## auto_register
//!
//! Types declared with `#[rtti(auto_register)]` are collected by the
//! [`inventory`] crate and registered by [`TypeRegistry::auto_register`].
//! Only non-generic types can be collected.
//!
//! Platforms without `inventory` support make `auto_register` return `false`.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod error;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use error::RegistryError;
pub use type_registry::{TypeRegistry, TypeRegistryArc};
