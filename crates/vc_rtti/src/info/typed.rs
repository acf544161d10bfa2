use crate::TypeUuid;
use crate::impls::GenericTypeInfoCell;
use crate::info::{TypeInfo, TypeTraits};

// -----------------------------------------------------------------------------
// Typed

/// Static identity of a declared type.
///
/// Implemented by the derive macros and by [`impl_type_info!`]. Querying the
/// identity of a type without this trait is a compile error.
///
/// # Examples
///
/// ```
/// use vc_rtti::{TypeUuid, Typed, derive::TypeInfo};
///
/// #[derive(TypeInfo)]
/// #[rtti(uuid = "{0F3C9A7D-2B61-4E58-9D0A-6C1B7E4F2A93}")]
/// struct Velocity(f32, f32);
///
/// assert_eq!(Velocity::type_uuid(), TypeUuid::parse("{0F3C9A7D-2B61-4E58-9D0A-6C1B7E4F2A93}"));
/// assert_eq!(Velocity::type_name(), "Velocity");
/// assert!(Velocity::template_uuid().is_null());
/// assert_eq!(Velocity::type_info().size(), 8);
/// ```
///
/// Generic declarations combine their own uuid with the uuids of their arguments:
///
/// ```
/// use vc_rtti::{TypeUuid, Typed, derive::TypeInfo};
///
/// #[derive(TypeInfo)]
/// #[rtti(uuid = "{6A0E52C4-91D7-4B3F-8E26-D5F07C3A1B88}")]
/// struct Handle<T>(u32, core::marker::PhantomData<T>);
///
/// let template = TypeUuid::parse("{6A0E52C4-91D7-4B3F-8E26-D5F07C3A1B88}");
///
/// assert_eq!(<Handle<u8>>::template_uuid(), template);
/// assert_eq!(<Handle<u8>>::type_uuid(), template + u8::type_uuid());
/// assert_ne!(<Handle<u8>>::type_uuid(), <Handle<u16>>::type_uuid());
/// assert_eq!(<Handle<u8>>::type_name(), "Handle<u8>");
/// ```
///
/// [`impl_type_info!`]: crate::derive::impl_type_info
pub trait Typed: Sized + 'static {
    /// The stable identity of this type.
    fn type_uuid() -> TypeUuid;

    /// Human readable name, without module path.
    fn type_name() -> &'static str;

    /// The uuid shared by every instantiation of a generic type,
    /// [`TypeUuid::NULL`] for other types.
    #[inline]
    fn template_uuid() -> TypeUuid {
        TypeUuid::NULL
    }

    #[inline]
    fn type_traits() -> TypeTraits {
        TypeTraits::empty()
    }

    /// All of the above in one record, built on first access.
    ///
    /// The default goes through a shared map keyed by `TypeId`.
    /// Derived impls use a dedicated cell instead.
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(TypeInfo::of::<Self>)
    }
}

/// Returns the uuid of `T`.
#[inline]
pub fn type_uuid_of<T: Typed>() -> TypeUuid {
    T::type_uuid()
}

/// Returns the template uuid of `T`, identical for every instantiation of
/// the same generic type.
///
/// # Examples
///
/// ```
/// use vc_rtti::info::generic_type_uuid_of;
///
/// assert_eq!(generic_type_uuid_of::<Vec<u8>>(), generic_type_uuid_of::<Vec<f64>>());
/// assert!(generic_type_uuid_of::<u8>().is_null());
/// ```
#[inline]
pub fn generic_type_uuid_of<T: Typed>() -> TypeUuid {
    T::template_uuid()
}
