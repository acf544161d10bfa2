use core::any::Any;
use core::marker::PhantomData;

use vc_ptr::{Ptr, PtrMut};

use crate::helper::RttiHelper;
use crate::info::TypeInfo;
use crate::{RttiKind, TypeUuid, Typed};

/// Helper of a type that only declares its identity.
///
/// Matches its own uuid and nothing else. Casting to the type itself works.
pub struct TypeInfoOnlyRttiHelper<T>(PhantomData<fn() -> T>);

impl<T: Typed> TypeInfoOnlyRttiHelper<T> {
    pub const INSTANCE: &'static Self = &Self(PhantomData);
}

impl<T: Typed> RttiHelper for TypeInfoOnlyRttiHelper<T> {
    #[inline]
    fn type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }

    #[inline]
    fn kind(&self) -> RttiKind {
        RttiKind::TypeInfoOnly
    }

    #[inline]
    fn is_type_of(&self, uuid: TypeUuid) -> bool {
        uuid == T::type_uuid()
    }

    #[inline]
    fn enum_hierarchy(&self, visitor: &mut dyn FnMut(TypeUuid)) {
        visitor(T::type_uuid());
    }

    fn cast<'a>(&self, object: &'a dyn Any, uuid: TypeUuid) -> Option<&'a dyn Any> {
        (self.is_type_of(uuid) && object.is::<T>()).then_some(object)
    }

    fn cast_mut<'a>(&self, object: &'a mut dyn Any, uuid: TypeUuid) -> Option<&'a mut dyn Any> {
        (self.is_type_of(uuid) && object.is::<T>()).then_some(object)
    }

    unsafe fn address_of<'a>(&self, object: Ptr<'a>, uuid: TypeUuid) -> Option<Ptr<'a>> {
        self.is_type_of(uuid).then_some(object)
    }

    unsafe fn address_of_mut<'a>(
        &self,
        object: PtrMut<'a>,
        uuid: TypeUuid,
    ) -> Option<PtrMut<'a>> {
        self.is_type_of(uuid).then_some(object)
    }
}
