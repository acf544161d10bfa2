//! Declared type hierarchies.
//!
//! A base is a field of the derived struct marked `#[rtti(base)]`. The
//! hierarchy of a type is itself followed by the hierarchies of its bases, in
//! declaration order. A base reached through two paths (a diamond) exists
//! twice in memory and is visited twice.
//!
//! - [`Rtti`]: static queries, implemented by the declaration macros.
//! - [`RttiObject`]: the same queries through a trait object, implemented for
//!   every [`Rtti`] type.
//! - [`BaseOf`]: base access for types declared with
//!   [`impl_external_rtti!`](crate::derive::impl_external_rtti).

// -----------------------------------------------------------------------------
// Modules

mod external;
mod object;
mod rtti;

// -----------------------------------------------------------------------------
// Exports

pub use external::BaseOf;
pub use object::RttiObject;
pub use rtti::{Rtti, RttiKind};
