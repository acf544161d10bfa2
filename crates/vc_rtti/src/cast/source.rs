use core::any::Any;

use crate::helper::RttiHelper;
use crate::{Rtti, RttiObject, TypeUuid};

// -----------------------------------------------------------------------------
// RttiSource

/// A value that casts and type queries can start from.
///
/// See the [module documentation](crate::cast) for the implementers.
pub trait RttiSource {
    /// The runtime type, [`TypeUuid::NULL`] when there is none.
    fn source_type_uuid(&self) -> TypeUuid;

    fn source_type_name(&self) -> Option<&'static str>;

    fn source_is_type_of(&self, uuid: TypeUuid) -> bool;

    fn source_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any>;

    fn source_address_of_mut(&mut self, uuid: TypeUuid) -> Option<&mut dyn Any>;

    /// The helper of the runtime type.
    fn source_helper(&self) -> Option<&'static dyn RttiHelper>;

    /// The most derived object, the one casts are resolved against.
    fn source_object(&self) -> Option<&dyn RttiObject>;

    fn source_object_mut(&mut self) -> Option<&mut dyn RttiObject>;
}

impl<T: Rtti> RttiSource for T {
    #[inline]
    fn source_type_uuid(&self) -> TypeUuid {
        T::type_uuid()
    }

    #[inline]
    fn source_type_name(&self) -> Option<&'static str> {
        Some(T::type_name())
    }

    #[inline]
    fn source_is_type_of(&self, uuid: TypeUuid) -> bool {
        T::rtti_contains_type(uuid)
    }

    #[inline]
    fn source_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any> {
        self.rtti_subobject(uuid)
    }

    #[inline]
    fn source_address_of_mut(&mut self, uuid: TypeUuid) -> Option<&mut dyn Any> {
        self.rtti_subobject_mut(uuid)
    }

    #[inline]
    fn source_helper(&self) -> Option<&'static dyn RttiHelper> {
        Some(T::rtti_helper())
    }

    #[inline]
    fn source_object(&self) -> Option<&dyn RttiObject> {
        Some(self)
    }

    #[inline]
    fn source_object_mut(&mut self) -> Option<&mut dyn RttiObject> {
        Some(self)
    }
}

/// Implements [`RttiSource`] for a trait object type whose trait has
/// [`RttiObject`] as a supertrait.
///
/// # Examples
///
/// ```
/// use vc_rtti::{RttiObject, rtti_type_name, derive::Rtti};
///
/// pub trait Widget: RttiObject + Send {}
///
/// vc_rtti::impl_rtti_source!(dyn Widget);
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{4C7A1E93-B82D-4F56-A0E1-9D3B6C8F2A75}")]
/// struct Button;
///
/// impl Widget for Button {}
///
/// let widget: Box<dyn Widget> = Box::new(Button);
/// assert_eq!(rtti_type_name(&*widget), Some("Button"));
/// ```
#[macro_export]
macro_rules! impl_rtti_source {
    ($ty:ty) => {
        impl $crate::cast::RttiSource for $ty {
            #[inline]
            fn source_type_uuid(&self) -> $crate::TypeUuid {
                $crate::RttiObject::rtti_get_type(self)
            }

            #[inline]
            fn source_type_name(&self) -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some($crate::RttiObject::rtti_get_type_name(self))
            }

            #[inline]
            fn source_is_type_of(&self, uuid: $crate::TypeUuid) -> bool {
                $crate::RttiObject::rtti_is_type_of(self, uuid)
            }

            #[inline]
            fn source_address_of(
                &self,
                uuid: $crate::TypeUuid,
            ) -> ::core::option::Option<&dyn ::core::any::Any> {
                $crate::RttiObject::rtti_address_of(self, uuid)
            }

            #[inline]
            fn source_address_of_mut(
                &mut self,
                uuid: $crate::TypeUuid,
            ) -> ::core::option::Option<&mut dyn ::core::any::Any> {
                $crate::RttiObject::rtti_address_of_mut(self, uuid)
            }

            #[inline]
            fn source_helper(
                &self,
            ) -> ::core::option::Option<&'static dyn $crate::helper::RttiHelper> {
                ::core::option::Option::Some($crate::RttiObject::rtti_get_helper(self))
            }

            #[inline]
            fn source_object(&self) -> ::core::option::Option<&dyn $crate::RttiObject> {
                ::core::option::Option::Some($crate::RttiObject::as_rtti_object(self))
            }

            #[inline]
            fn source_object_mut(
                &mut self,
            ) -> ::core::option::Option<&mut dyn $crate::RttiObject> {
                ::core::option::Option::Some($crate::RttiObject::as_rtti_object_mut(self))
            }
        }
    };
}

impl_rtti_source!(dyn RttiObject);
impl_rtti_source!(dyn RttiObject + Send);
impl_rtti_source!(dyn RttiObject + Send + Sync);

// -----------------------------------------------------------------------------
// Nullable sources

impl<S: ?Sized + RttiSource> RttiSource for Option<&S> {
    #[inline]
    fn source_type_uuid(&self) -> TypeUuid {
        self.map_or(TypeUuid::NULL, S::source_type_uuid)
    }

    #[inline]
    fn source_type_name(&self) -> Option<&'static str> {
        self.and_then(S::source_type_name)
    }

    #[inline]
    fn source_is_type_of(&self, uuid: TypeUuid) -> bool {
        self.is_some_and(|source| source.source_is_type_of(uuid))
    }

    #[inline]
    fn source_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any> {
        self.and_then(|source| source.source_address_of(uuid))
    }

    /// Always `None`, the source is borrowed immutably.
    #[inline]
    fn source_address_of_mut(&mut self, _uuid: TypeUuid) -> Option<&mut dyn Any> {
        None
    }

    #[inline]
    fn source_helper(&self) -> Option<&'static dyn RttiHelper> {
        self.and_then(S::source_helper)
    }

    #[inline]
    fn source_object(&self) -> Option<&dyn RttiObject> {
        self.and_then(S::source_object)
    }

    #[inline]
    fn source_object_mut(&mut self) -> Option<&mut dyn RttiObject> {
        None
    }
}

impl<S: ?Sized + RttiSource> RttiSource for Option<&mut S> {
    #[inline]
    fn source_type_uuid(&self) -> TypeUuid {
        self.as_deref().map_or(TypeUuid::NULL, S::source_type_uuid)
    }

    #[inline]
    fn source_type_name(&self) -> Option<&'static str> {
        self.as_deref().and_then(S::source_type_name)
    }

    #[inline]
    fn source_is_type_of(&self, uuid: TypeUuid) -> bool {
        self.as_deref().is_some_and(|source| source.source_is_type_of(uuid))
    }

    #[inline]
    fn source_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any> {
        self.as_deref()?.source_address_of(uuid)
    }

    #[inline]
    fn source_address_of_mut(&mut self, uuid: TypeUuid) -> Option<&mut dyn Any> {
        self.as_deref_mut()?.source_address_of_mut(uuid)
    }

    #[inline]
    fn source_helper(&self) -> Option<&'static dyn RttiHelper> {
        self.as_deref().and_then(S::source_helper)
    }

    #[inline]
    fn source_object(&self) -> Option<&dyn RttiObject> {
        self.as_deref()?.source_object()
    }

    #[inline]
    fn source_object_mut(&mut self) -> Option<&mut dyn RttiObject> {
        self.as_deref_mut()?.source_object_mut()
    }
}
