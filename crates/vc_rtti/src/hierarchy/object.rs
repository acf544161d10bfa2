use core::any::Any;

use crate::helper::RttiHelper;
use crate::{Rtti, TypeUuid};

/// Hierarchy queries through a trait object.
///
/// Implemented for every [`Rtti`] type. Use it as a supertrait so that
/// objects of a user trait can be cast:
///
/// ```
/// use vc_rtti::{RttiObject, rtti_cast, derive::Rtti};
///
/// trait Animal: RttiObject {
///     fn legs(&self) -> u32;
/// }
///
/// vc_rtti::impl_rtti_source!(dyn Animal);
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{5D2E8A71-C3F4-4B96-8E07-A1B9D6F3C254}")]
/// struct Cat;
///
/// impl Animal for Cat {
///     fn legs(&self) -> u32 { 4 }
/// }
///
/// let animal: &dyn Animal = &Cat;
/// assert!(rtti_cast::<Cat, _>(animal).is_some());
/// assert_eq!(animal.rtti_get_type_name(), "Cat");
/// ```
pub trait RttiObject: Any {
    /// Runtime identity, the uuid of the most derived type.
    fn rtti_get_type(&self) -> TypeUuid;

    fn rtti_get_type_name(&self) -> &'static str;

    /// Returns `true` if the runtime type is `uuid` or derives from it.
    fn rtti_is_type_of(&self, uuid: TypeUuid) -> bool;

    /// Enumerates the hierarchy of the runtime type.
    fn rtti_enum_types(&self, visitor: &mut dyn FnMut(TypeUuid));

    /// The subobject of type `uuid`, if the runtime type contains one.
    fn rtti_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any>;

    fn rtti_address_of_mut(&mut self, uuid: TypeUuid) -> Option<&mut dyn Any>;

    /// The helper of the runtime type.
    fn rtti_get_helper(&self) -> &'static dyn RttiHelper;

    fn as_rtti_object(&self) -> &dyn RttiObject;

    fn as_rtti_object_mut(&mut self) -> &mut dyn RttiObject;
}

impl<T: Rtti> RttiObject for T {
    #[inline]
    fn rtti_get_type(&self) -> TypeUuid {
        T::type_uuid()
    }

    #[inline]
    fn rtti_get_type_name(&self) -> &'static str {
        T::type_name()
    }

    #[inline]
    fn rtti_is_type_of(&self, uuid: TypeUuid) -> bool {
        T::rtti_contains_type(uuid)
    }

    #[inline]
    fn rtti_enum_types(&self, visitor: &mut dyn FnMut(TypeUuid)) {
        T::rtti_enum_hierarchy(visitor);
    }

    #[inline]
    fn rtti_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any> {
        self.rtti_subobject(uuid)
    }

    #[inline]
    fn rtti_address_of_mut(&mut self, uuid: TypeUuid) -> Option<&mut dyn Any> {
        self.rtti_subobject_mut(uuid)
    }

    #[inline]
    fn rtti_get_helper(&self) -> &'static dyn RttiHelper {
        T::rtti_helper()
    }

    #[inline]
    fn as_rtti_object(&self) -> &dyn RttiObject {
        self
    }

    #[inline]
    fn as_rtti_object_mut(&mut self) -> &mut dyn RttiObject {
        self
    }
}
