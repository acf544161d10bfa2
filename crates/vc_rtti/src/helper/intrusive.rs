use core::any::Any;
use core::marker::PhantomData;

use vc_ptr::{Ptr, PtrMut};

use crate::helper::RttiHelper;
use crate::info::TypeInfo;
use crate::{Rtti, RttiKind, TypeUuid};

/// Helper of a type declared with `#[derive(Rtti)]`, forwards to its [`Rtti`] impl.
pub struct IntrusiveRttiHelper<T>(PhantomData<fn() -> T>);

impl<T: Rtti> IntrusiveRttiHelper<T> {
    pub const INSTANCE: &'static Self = &Self(PhantomData);
}

impl<T: Rtti> RttiHelper for IntrusiveRttiHelper<T> {
    #[inline]
    fn type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn kind(&self) -> RttiKind {
        T::KIND
    }

    #[inline]
    fn is_type_of(&self, uuid: TypeUuid) -> bool {
        T::rtti_contains_type(uuid)
    }

    #[inline]
    fn enum_hierarchy(&self, visitor: &mut dyn FnMut(TypeUuid)) {
        T::rtti_enum_hierarchy(visitor);
    }

    #[inline]
    fn cast<'a>(&self, object: &'a dyn Any, uuid: TypeUuid) -> Option<&'a dyn Any> {
        object.downcast_ref::<T>()?.rtti_subobject(uuid)
    }

    #[inline]
    fn cast_mut<'a>(&self, object: &'a mut dyn Any, uuid: TypeUuid) -> Option<&'a mut dyn Any> {
        object.downcast_mut::<T>()?.rtti_subobject_mut(uuid)
    }

    unsafe fn address_of<'a>(&self, object: Ptr<'a>, uuid: TypeUuid) -> Option<Ptr<'a>> {
        // SAFETY: the caller guarantees that `object` points to a `T`.
        let object = unsafe { object.as_ref::<T>() };
        object.rtti_subobject(uuid).map(Ptr::from_ref)
    }

    unsafe fn address_of_mut<'a>(
        &self,
        object: PtrMut<'a>,
        uuid: TypeUuid,
    ) -> Option<PtrMut<'a>> {
        // SAFETY: the caller guarantees that `object` points to a `T`.
        let object = unsafe { object.consume::<T>() };
        object.rtti_subobject_mut(uuid).map(PtrMut::from_mut)
    }
}
