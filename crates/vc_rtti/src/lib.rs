#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derive macros emit `::vc_rtti::...` paths, which must also resolve when
// the macros are expanded inside this crate (built-in impls, unit tests).
extern crate self as vc_rtti;

// -----------------------------------------------------------------------------
// no_std support

// Lazy per-type cells are built on `std::sync`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod cast;
pub mod helper;
pub mod hierarchy;
pub mod id;
pub mod impls;
pub mod info;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use vc_rtti_derive as derive;

pub use cast::{RttiSource, rtti_address_of, rtti_address_of_mut, rtti_cast, rtti_cast_mut};
pub use cast::{rtti_cast_arc, rtti_cast_rc, rtti_enum_hierarchy, rtti_is_template_of};
pub use cast::{RttiMut, RttiRef, rtti_recast_arc, rtti_recast_rc, rtti_upcast, rtti_upcast_mut};
pub use cast::{rtti_is_type_of, rtti_is_type_of_uuid, rtti_type_name, rtti_type_uuid};
pub use helper::{RttiHelper, rtti_helper_of};
pub use hierarchy::{BaseOf, Rtti, RttiKind, RttiObject};
pub use id::TypeUuid;
pub use info::{TypeInfo, TypeTraits, Typed};
