//! Lightweight pointer wrappers used by the RTTI crates.
//!
//! **Ptr** and **PtrMut**
//!
//! [`Ptr<'a>`] and [`PtrMut<'a>`] are type-erased `&T` and `&mut T` equivalents.
//! They are what a type-erased caller (a serializer, a script binding) holds
//! after the static type is gone: an address plus a lifetime. Reading the
//! pointee back requires naming the type again, which is `unsafe`.
//!
//! **AliasArc** and **AliasRc**
//!
//! [`AliasArc<O, T>`] and [`AliasRc<O, T>`] keep an `Arc<O>` / `Rc<O>` alive
//! while pointing at some `T` reachable from it, usually a field or a
//! base subobject. Cloning one clones the owner, so the strong count always
//! reflects every alias.
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod alias;
mod type_erased;

// -----------------------------------------------------------------------------
// Top-level exports

pub use alias::{AliasArc, AliasRc};
pub use type_erased::{Ptr, PtrMut};
