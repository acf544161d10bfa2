use alloc::boxed::Box;
use core::any::Any;

use vc_ptr::{Ptr, PtrMut};

use crate::helper::RttiHelper;
use crate::info::TypeInfo;
use crate::{BaseOf, Rtti, RttiKind, TypeUuid};

// -----------------------------------------------------------------------------
// ExternalBase

/// One base of an external declaration: the base's own helper and the
/// projections from the derived type to the base.
///
/// Built with [`ExternalBase::new`], the projections are monomorphized for the
/// `(derived, base)` pair and come from its [`BaseOf`] impl.
#[derive(Clone, Copy)]
pub struct ExternalBase {
    helper: fn() -> &'static dyn RttiHelper,
    upcast: fn(&dyn Any) -> Option<&dyn Any>,
    upcast_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    upcast_ptr: for<'a> unsafe fn(Ptr<'a>) -> Ptr<'a>,
    upcast_ptr_mut: for<'a> unsafe fn(PtrMut<'a>) -> PtrMut<'a>,
}

impl ExternalBase {
    pub fn new<T: BaseOf<B>, B: Rtti>() -> Self {
        Self {
            helper: B::rtti_helper,
            upcast: |object| Some(object.downcast_ref::<T>()?.as_base() as &dyn Any),
            upcast_mut: |object| Some(object.downcast_mut::<T>()?.as_base_mut() as &mut dyn Any),
            upcast_ptr: upcast_ptr::<T, B>,
            upcast_ptr_mut: upcast_ptr_mut::<T, B>,
        }
    }

    #[inline]
    pub fn helper(&self) -> &'static dyn RttiHelper {
        (self.helper)()
    }
}

/// # Safety
///
/// `object` points to a live `T`.
unsafe fn upcast_ptr<'a, T: BaseOf<B>, B: 'static>(object: Ptr<'a>) -> Ptr<'a> {
    // SAFETY: guaranteed by the caller.
    let object = unsafe { object.as_ref::<T>() };
    Ptr::from_ref(object.as_base())
}

/// # Safety
///
/// `object` points to a live `T`.
unsafe fn upcast_ptr_mut<'a, T: BaseOf<B>, B: 'static>(object: PtrMut<'a>) -> PtrMut<'a> {
    // SAFETY: guaranteed by the caller.
    let object = unsafe { object.consume::<T>() };
    PtrMut::from_mut(object.as_base_mut())
}

// -----------------------------------------------------------------------------
// ExternalRttiHelper

/// Helper of a type declared with `impl_external_rtti!`.
///
/// Unlike the intrusive helper, the hierarchy is data: a list of
/// [`ExternalBase`] walked at run time, each base answering through its own
/// helper. The result is the same as for an intrusive declaration of the
/// same hierarchy.
pub struct ExternalRttiHelper {
    info: &'static TypeInfo,
    bases: Box<[ExternalBase]>,
}

impl ExternalRttiHelper {
    pub fn new(info: &'static TypeInfo, bases: &[ExternalBase]) -> Self {
        Self {
            info,
            bases: Box::from(bases),
        }
    }

    #[inline]
    pub fn bases(&self) -> &[ExternalBase] {
        &self.bases
    }

    #[inline]
    fn is_self(&self, uuid: TypeUuid) -> bool {
        self.info.uuid() == uuid
    }
}

impl RttiHelper for ExternalRttiHelper {
    #[inline]
    fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    fn kind(&self) -> RttiKind {
        RttiKind::External
    }

    fn is_type_of(&self, uuid: TypeUuid) -> bool {
        self.is_self(uuid) || self.bases.iter().any(|base| base.helper().is_type_of(uuid))
    }

    fn enum_hierarchy(&self, visitor: &mut dyn FnMut(TypeUuid)) {
        visitor(self.info.uuid());
        for base in &self.bases {
            base.helper().enum_hierarchy(visitor);
        }
    }

    fn cast<'a>(&self, object: &'a dyn Any, uuid: TypeUuid) -> Option<&'a dyn Any> {
        if object.type_id() != self.info.type_id() {
            return None;
        }
        if self.is_self(uuid) {
            return Some(object);
        }
        self.bases.iter().find_map(|base| {
            let helper = base.helper();
            if !helper.is_type_of(uuid) {
                return None;
            }
            helper.cast((base.upcast)(object)?, uuid)
        })
    }

    fn cast_mut<'a>(&self, object: &'a mut dyn Any, uuid: TypeUuid) -> Option<&'a mut dyn Any> {
        if (*object).type_id() != self.info.type_id() {
            return None;
        }
        if self.is_self(uuid) {
            return Some(object);
        }
        let base = self.bases.iter().find(|base| base.helper().is_type_of(uuid))?;
        base.helper().cast_mut((base.upcast_mut)(object)?, uuid)
    }

    unsafe fn address_of<'a>(&self, object: Ptr<'a>, uuid: TypeUuid) -> Option<Ptr<'a>> {
        if self.is_self(uuid) {
            return Some(object);
        }
        let base = self.bases.iter().find(|base| base.helper().is_type_of(uuid))?;
        // SAFETY: the caller guarantees that `object` points to the helper's type,
        // so the projection yields a live value of the base's type.
        unsafe {
            let object = (base.upcast_ptr)(object);
            base.helper().address_of(object, uuid)
        }
    }

    unsafe fn address_of_mut<'a>(
        &self,
        object: PtrMut<'a>,
        uuid: TypeUuid,
    ) -> Option<PtrMut<'a>> {
        if self.is_self(uuid) {
            return Some(object);
        }
        let base = self.bases.iter().find(|base| base.helper().is_type_of(uuid))?;
        // SAFETY: see `address_of`.
        unsafe {
            let object = (base.upcast_ptr_mut)(object);
            base.helper().address_of_mut(object, uuid)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::derive::{Rtti, impl_external_rtti, impl_type_info};
    use crate::{Rtti, RttiKind, TypeUuid, Typed, rtti_cast, rtti_cast_mut, rtti_helper_of};
    use alloc::vec::Vec;
    use vc_ptr::{Ptr, PtrMut};

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{E4C1A8B2-6D3F-4F07-9B5E-2A8C7D1F3E60}")]
    struct Frame {
        index: u32,
    }

    struct Label {
        text: u64,
    }

    struct Panel {
        frame: Frame,
        label: Label,
        depth: i8,
    }

    impl_type_info!(Label, "{3F8D2B6A-1C49-4E75-A0B3-D6E9F2C5A817}");
    impl_external_rtti!(
        Panel,
        "{7B0E5C93-A2D1-4F68-8C4B-E1F37D9A06C5}",
        Frame(frame),
        Label(label),
    );

    struct Slot<T> {
        frame: Frame,
        value: T,
    }

    impl_external_rtti!(
        [T: 'static] Slot<T>,
        "{5D19A7E3-8B42-4C6F-B0D5-3E7A91C2F684}",
        Frame(frame),
    );

    fn panel() -> Panel {
        Panel {
            frame: Frame { index: 4 },
            label: Label { text: 9 },
            depth: -1,
        }
    }

    #[test]
    fn external_matches_intrusive_shape() {
        let helper = rtti_helper_of::<Panel>();
        assert_eq!(helper.kind(), RttiKind::External);
        assert!(helper.provides_full_rtti());
        assert!(helper.is_type_of(Frame::type_uuid()));
        assert!(helper.is_type_of(Label::type_uuid()));
        assert!(!helper.is_type_of(u8::type_uuid()));
        assert!(Panel::rtti_contains_type(Panel::type_uuid()));

        let mut visited = Vec::new();
        helper.enum_hierarchy(&mut |uuid| visited.push(uuid));
        assert_eq!(
            visited,
            [Panel::type_uuid(), Frame::type_uuid(), Label::type_uuid()]
        );
    }

    #[test]
    fn cast_through_bases() {
        let mut value = panel();
        let helper = rtti_helper_of::<Panel>();

        let frame = helper.cast(&value, Frame::type_uuid()).unwrap();
        assert_eq!(frame.downcast_ref::<Frame>().unwrap().index, 4);
        assert!(helper.cast(&value.label, Frame::type_uuid()).is_none());

        let label = helper.cast_mut(&mut value, Label::type_uuid()).unwrap();
        label.downcast_mut::<Label>().unwrap().text = 10;
        assert_eq!(value.label.text, 10);
        assert_eq!(value.depth, -1);
    }

    #[test]
    fn type_erased_address() {
        let mut value = panel();
        let helper = rtti_helper_of::<Panel>();

        // SAFETY: the pointer is created from a `Panel`.
        let label = unsafe { helper.address_of(Ptr::from_ref(&value), Label::type_uuid()) };
        assert!(label.unwrap().addr_eq(&value.label));

        // SAFETY: the pointer is created from a `Panel`.
        let missing = unsafe { helper.address_of(Ptr::from_ref(&value), TypeUuid::NULL) };
        assert!(missing.is_none());

        // SAFETY: the pointer is created from a `Panel`.
        let frame =
            unsafe { helper.address_of_mut(PtrMut::from_mut(&mut value), Frame::type_uuid()) };
        // SAFETY: the helper returned the `Frame` subobject.
        unsafe { frame.unwrap().consume::<Frame>().index = 8 };
        assert_eq!(value.frame.index, 8);
    }

    #[test]
    fn generic_instantiations() {
        let small = rtti_helper_of::<Slot<u8>>();
        let wide = rtti_helper_of::<Slot<u16>>();
        assert!(!core::ptr::addr_eq(small, wide));
        assert!(core::ptr::addr_eq(small, rtti_helper_of::<Slot<u8>>()));
        assert_eq!(small.kind(), RttiKind::External);
        assert_eq!(wide.kind(), RttiKind::External);

        let template = TypeUuid::parse("{5D19A7E3-8B42-4C6F-B0D5-3E7A91C2F684}");
        assert_eq!(small.type_uuid(), template + u8::type_uuid());
        assert_eq!(wide.type_uuid(), template + u16::type_uuid());
        assert_eq!(<Slot<u8>>::template_uuid(), template);
        assert_eq!(<Slot<u16>>::template_uuid(), template);
        assert_eq!(small.type_name(), "Slot<u8>");

        assert!(small.is_type_of(Frame::type_uuid()));
        assert!(!small.is_type_of(wide.type_uuid()));

        let mut first = Slot { frame: Frame { index: 1 }, value: 7_u8 };
        let second = Slot { frame: Frame { index: 2 }, value: 700_u16 };
        assert_eq!(rtti_cast::<Frame, _>(&first).unwrap().index, 1);
        assert_eq!(rtti_cast::<Frame, _>(&second).unwrap().index, 2);
        assert!(rtti_cast::<Slot<u16>, _>(&first).is_none());

        rtti_cast_mut::<Frame, _>(&mut first).unwrap().index = 5;
        assert_eq!(first.frame.index, 5);
        assert_eq!((first.value, second.value), (7, 700));
    }
}
