//! Lazily built per-type statics.
//!
//! ## NonGenericTypeCell
//!
//! A `static` inside a non-generic impl belongs to exactly one type, so a
//! [`OnceLock`] is enough.
//!
//! ## GenericTypeCell
//!
//! A `static` inside a generic impl is shared by every instantiation. The cell
//! keeps one leaked value per [`TypeId`] in a [`TypeIdMap`] behind a [`RwLock`]:
//! lookups take the read lock, the first access of a type takes the write lock.
//! Values never move once inserted, so the returned references are `'static`.
//!
//! Lock poisoning is ignored, a value is either fully inserted or absent.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::TypeIdMap;

use crate::TypeUuid;
use crate::helper::ExternalRttiHelper;
use crate::info::TypeInfo;

mod sealed {
    use super::{ExternalRttiHelper, String, TypeInfo, TypeUuid};

    pub trait TypedProperty: Send + Sync + 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
    impl TypedProperty for TypeUuid {}
    impl TypedProperty for ExternalRttiHelper {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Static storage for a non-generic type.
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Stores the [`TypeInfo`] of a non-generic type.
///
/// # Examples
///
/// ```
/// use vc_rtti::{TypeUuid, Typed, TypeInfo};
/// use vc_rtti::impls::NonGenericTypeInfoCell;
///
/// struct Opaque;
///
/// impl Typed for Opaque {
///     fn type_uuid() -> TypeUuid {
///         const { TypeUuid::parse("{2E4B8F31-7A9C-4D05-B6E2-19C3F8A0D754}") }
///     }
///     fn type_name() -> &'static str {
///         "Opaque"
///     }
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::of::<Self>)
///     }
/// }
///
/// assert_eq!(Opaque::type_info().name(), "Opaque");
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

/// Stores the [`ExternalRttiHelper`] of a non-generic type.
pub type NonGenericExternalCell = NonGenericTypeCell<ExternalRttiHelper>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
        self.0.get_or_init(f)
    }
}

impl<T: TypedProperty> Default for NonGenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage shared by all instantiations of a generic type.
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Stores the [`TypeInfo`] of each instantiation.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Stores the composed name of each instantiation, e.g. `Pair<u8, f32>`.
///
/// # Examples
///
/// ```
/// use vc_rtti::impls::{self, GenericTypeNameCell};
/// use vc_rtti::Typed;
///
/// fn name_of<T: Typed>() -> &'static str {
///     static CELL: GenericTypeNameCell = GenericTypeNameCell::new();
///     CELL.get_or_insert::<T>(|| impls::concat(&["Wrapper<", T::type_name(), ">"]))
/// }
///
/// assert_eq!(name_of::<u8>(), "Wrapper<u8>");
/// assert_eq!(name_of::<bool>(), "Wrapper<bool>");
/// ```
pub type GenericTypeNameCell = GenericTypeCell<String>;

/// Stores the aggregated uuid of each instantiation.
pub type GenericTypeUuidCell = GenericTypeCell<TypeUuid>;

/// Stores the [`ExternalRttiHelper`] of each instantiation.
pub type GenericExternalCell = GenericTypeCell<ExternalRttiHelper>;

impl<T: TypedProperty> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, building it with `f` on first access.
    ///
    /// When two threads race on the first access, both may run `f` but only
    /// one result is kept and returned to both.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl<T: TypedProperty> Default for GenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::GenericTypeUuidCell;
    use crate::TypeUuid;
    use std::thread;
    use std::vec::Vec;

    static CELL: GenericTypeUuidCell = GenericTypeUuidCell::new();

    #[test]
    fn one_value_per_type() {
        let a = CELL.get_or_insert::<u8>(|| TypeUuid::from_u128(1));
        let b = CELL.get_or_insert::<u8>(|| TypeUuid::from_u128(2));
        let c = CELL.get_or_insert::<u16>(|| TypeUuid::from_u128(3));
        assert!(core::ptr::eq(a, b));
        assert_eq!(*b, TypeUuid::from_u128(1));
        assert_eq!(*c, TypeUuid::from_u128(3));
    }

    #[test]
    fn concurrent_first_access() {
        static RACE: GenericTypeUuidCell = GenericTypeUuidCell::new();

        let handles: Vec<_> = (0..8_u128)
            .map(|i| {
                thread::spawn(move || {
                    let value = RACE.get_or_insert::<i64>(|| TypeUuid::from_u128(i + 1));
                    value as *const TypeUuid as usize
                })
            })
            .collect();

        let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
