//! Casting and type queries.
//!
//! Every function takes a source implementing [`RttiSource`]:
//!
//! - any sized [`Rtti`](crate::Rtti) type, answered statically;
//! - `dyn RttiObject` (also `+ Send`, `+ Send + Sync`) and user trait objects
//!   registered with [`impl_rtti_source!`](crate::impl_rtti_source), answered
//!   by the runtime type of the object;
//! - [`RttiRef`], [`RttiMut`] and the `AliasArc`/`AliasRc` returned by the
//!   shared pointer casts, answered by the object they were cast from;
//! - `Option<&S>` and `Option<&mut S>`, where `None` answers like a null pointer:
//!   casts fail, the type is [`TypeUuid::NULL`](crate::TypeUuid::NULL).
//!
//! [`rtti_cast`] returns a plain reference, which only knows its own type.
//! [`rtti_upcast`] returns an [`RttiRef`] that keeps the whole object, so the
//! result can be cast back to the derived type. Aliases returned by
//! [`rtti_cast_arc`] and [`rtti_cast_rc`] keep their owner and are cast back
//! with [`rtti_recast_arc`] and [`rtti_recast_rc`].
//!
//! Failures are values, never panics.

// -----------------------------------------------------------------------------
// Modules

mod ops;
mod reference;
mod smart;
mod source;

// -----------------------------------------------------------------------------
// Exports

pub use ops::{rtti_address_of, rtti_address_of_mut, rtti_cast, rtti_cast_mut};
pub use ops::{rtti_enum_hierarchy, rtti_is_template_of, rtti_is_type_of, rtti_is_type_of_uuid};
pub use ops::{rtti_type_name, rtti_type_uuid};
pub use reference::{RttiMut, RttiRef, rtti_upcast, rtti_upcast_mut};
pub use smart::{rtti_cast_arc, rtti_cast_rc, rtti_recast_arc, rtti_recast_rc};
pub use source::RttiSource;
