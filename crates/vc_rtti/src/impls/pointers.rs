use core::ptr::NonNull;

use crate::TypeUuid;
use crate::impls::{GenericTypeNameCell, concat};
use crate::info::{TypeTraits, Typed};

// Pointers are identified by their pointee: the uuid is forwarded and only
// the traits tell them apart. They are not `Rtti`, there is no object to cast.
macro_rules! impl_pointer {
    ($ty:ty, $prefix:literal, $suffix:literal) => {
        impl<T: Typed> Typed for $ty {
            #[inline]
            fn type_uuid() -> TypeUuid {
                T::type_uuid()
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypeNameCell = GenericTypeNameCell::new();
                CELL.get_or_insert::<Self>(|| concat(&[$prefix, T::type_name(), $suffix]))
            }

            #[inline]
            fn template_uuid() -> TypeUuid {
                T::template_uuid()
            }

            #[inline]
            fn type_traits() -> TypeTraits {
                T::type_traits() | TypeTraits::IS_POINTER
            }
        }
    };
}

impl_pointer!(*const T, "*const ", "");
impl_pointer!(*mut T, "*mut ", "");
impl_pointer!(NonNull<T>, "NonNull<", ">");

// -----------------------------------------------------------------------------
// Tests
