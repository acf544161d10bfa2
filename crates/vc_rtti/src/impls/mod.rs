//! Built-in declarations and helpers for writing impls by hand.
//!
//! - [`concat`]: string concatenation for composed names.
//! - [`NonGenericTypeInfoCell`], [`GenericTypeInfoCell`]: lazily built [`TypeInfo`].
//! - [`GenericTypeNameCell`], [`GenericTypeUuidCell`]: names and uuids of generic instantiations.
//! - [`NonGenericExternalCell`], [`GenericExternalCell`]: helpers of external declarations.
//!
//! ## Implemented Menu
//!
//! Every built-in type implements [`Typed`] and a [`Rtti`] that only matches
//! itself.
//!
//! - `()` `bool` `char` `f32` `f64`
//! - `i8` `i16` `i32` `i64` `isize`
//! - `u8` `u16` `u32` `u64` `usize`
//! - `String` `&'static str` `TypeUuid`
//! - `Vec<T>` `Box<T>` `Arc<T>` `Rc<T>` `VecDeque<T>` `[T; N]`
//! - `BTreeSet<T>` `BTreeMap<K, V>`, and with `std`: `HashSet<T>` `HashMap<K, V>`
//! - `(P0,)` to `(P0, .., P7)`
//!
//! `Option<T>` implements [`Typed`] only, since `Option<&S>` is a nullable
//! cast source.
//!
//! Raw pointers `*const T`, `*mut T` and `NonNull<T>` implement [`Typed`]
//! only. They share the uuid of their pointee and set
//! [`TypeTraits::IS_POINTER`](crate::TypeTraits::IS_POINTER).
//!
//! [`TypeInfo`]: crate::TypeInfo
//! [`Typed`]: crate::Typed
//! [`Rtti`]: crate::Rtti

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod generics;
mod pointers;
mod primitives;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericExternalCell, NonGenericExternalCell};
pub use cell::{GenericTypeInfoCell, GenericTypeNameCell, GenericTypeUuidCell};
pub use cell::{GenericTypeCell, NonGenericTypeCell, NonGenericTypeInfoCell};

/// An efficient string concatenation function.
///
/// This is usually used for the names of generic instantiations.
///
/// # Example
///
/// ```
/// use vc_rtti::impls;
///
/// let s = impls::concat(&["Pair", "<", "u8", ", ", "f32", ">"]);
///
/// assert_eq!(s, "Pair<u8, f32>");
/// assert_eq!(s.capacity(), 13);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Implements a [`Rtti`](crate::Rtti) that only matches the type itself.
macro_rules! impl_type_info_only_rtti {
    (impl[$($param:tt)*] $ty:ty) => {
        impl<$($param)*> $crate::Rtti for $ty {
            const KIND: $crate::RttiKind = $crate::RttiKind::TypeInfoOnly;

            #[inline]
            fn rtti_contains_type(uuid: $crate::TypeUuid) -> bool {
                uuid == <Self as $crate::Typed>::type_uuid()
            }

            #[inline]
            fn rtti_enum_hierarchy(visitor: &mut dyn FnMut($crate::TypeUuid)) {
                visitor(<Self as $crate::Typed>::type_uuid());
            }

            #[inline]
            fn rtti_subobject(&self, uuid: $crate::TypeUuid) -> Option<&dyn ::core::any::Any> {
                let this: &dyn ::core::any::Any = self;
                <Self as $crate::Rtti>::rtti_contains_type(uuid).then_some(this)
            }

            #[inline]
            fn rtti_subobject_mut(
                &mut self,
                uuid: $crate::TypeUuid,
            ) -> Option<&mut dyn ::core::any::Any> {
                let this: &mut dyn ::core::any::Any = self;
                <Self as $crate::Rtti>::rtti_contains_type(uuid).then_some(this)
            }

            #[inline]
            fn rtti_helper() -> &'static dyn $crate::RttiHelper {
                $crate::helper::TypeInfoOnlyRttiHelper::<Self>::INSTANCE
            }
        }
    };
}

pub(crate) use impl_type_info_only_rtti;
