use vc_ptr::{Ptr, PtrMut};

use crate::cast::RttiSource;
use crate::{Rtti, TypeUuid, Typed};

/// Casts `source` to the `T` it is or contains.
///
/// Works for upcasts (to a base field), downcasts (from a trait object to
/// the runtime type) and casts between bases of the runtime type.
///
/// # Examples
///
/// ```
/// use vc_rtti::{RttiObject, rtti_cast, derive::Rtti};
///
/// #[derive(Rtti, Default)]
/// #[rtti(uuid = "{2A4F7C91-6E3B-4D08-B5A2-C9E1F0D37B64}")]
/// struct Named {
///     name: &'static str,
/// }
///
/// #[derive(Rtti, Default)]
/// #[rtti(uuid = "{D5B38E06-71AC-4F92-8E4D-0B6A2C9F1E37}")]
/// struct Tagged {
///     tag: u16,
/// }
///
/// #[derive(Rtti, Default)]
/// #[rtti(uuid = "{6F1C9A3E-2D85-4B70-A7E4-93F5B1D80C26}")]
/// struct Item {
///     #[rtti(base)]
///     named: Named,
///     #[rtti(base)]
///     tagged: Tagged,
/// }
///
/// let item = Item::default();
/// let object: &dyn RttiObject = &item;
///
/// let tagged: &Tagged = rtti_cast(object).unwrap();
/// assert!(core::ptr::eq(tagged, &item.tagged));
/// assert!(rtti_cast::<Named, _>(tagged).is_none());
/// assert!(rtti_cast::<Item, _>(object).is_some());
/// ```
#[inline]
pub fn rtti_cast<T: Rtti, S: ?Sized + RttiSource>(source: &S) -> Option<&T> {
    source
        .source_address_of(T::type_uuid())?
        .downcast_ref::<T>()
}

/// Mutable version of [`rtti_cast`].
#[inline]
pub fn rtti_cast_mut<T: Rtti, S: ?Sized + RttiSource>(source: &mut S) -> Option<&mut T> {
    source
        .source_address_of_mut(T::type_uuid())?
        .downcast_mut::<T>()
}

/// Returns `true` if the runtime type of `source` is `Q` or derives from `Q`.
#[inline]
pub fn rtti_is_type_of<Q: Typed, S: ?Sized + RttiSource>(source: &S) -> bool {
    source.source_is_type_of(Q::type_uuid())
}

/// Like [`rtti_is_type_of`] with a uuid known only at run time.
#[inline]
pub fn rtti_is_type_of_uuid<S: ?Sized + RttiSource>(source: &S, uuid: TypeUuid) -> bool {
    source.source_is_type_of(uuid)
}

/// Returns the uuid of the runtime type of `source`, [`TypeUuid::NULL`] for `None`.
#[inline]
pub fn rtti_type_uuid<S: ?Sized + RttiSource>(source: &S) -> TypeUuid {
    source.source_type_uuid()
}

#[inline]
pub fn rtti_type_name<S: ?Sized + RttiSource>(source: &S) -> Option<&'static str> {
    source.source_type_name()
}

/// Type-erased address of the subobject of type `uuid`.
///
/// The result is suitable for code holding only a uuid, such as a serializer,
/// and is read back with [`Ptr::as_ref`] once the type is known.
#[inline]
pub fn rtti_address_of<S: ?Sized + RttiSource>(source: &S, uuid: TypeUuid) -> Option<Ptr<'_>> {
    source.source_address_of(uuid).map(Ptr::from_ref)
}

#[inline]
pub fn rtti_address_of_mut<S: ?Sized + RttiSource>(
    source: &mut S,
    uuid: TypeUuid,
) -> Option<PtrMut<'_>> {
    source.source_address_of_mut(uuid).map(PtrMut::from_mut)
}

/// Calls `visitor` with `T` and each of its bases, see [`Rtti::rtti_enum_hierarchy`].
#[inline]
pub fn rtti_enum_hierarchy<T: Rtti>(mut visitor: impl FnMut(TypeUuid)) {
    T::rtti_enum_hierarchy(&mut visitor);
}

/// Returns `true` if the runtime type of `source` is an instantiation of the
/// same generic type as `Template`.
///
/// Any instantiation can stand for the template, e.g. `Vec<()>` for all vectors.
///
/// # Examples
///
/// ```
/// use vc_rtti::rtti_is_template_of;
///
/// assert!(rtti_is_template_of::<Vec<()>, _>(&vec![1_u8]));
/// assert!(!rtti_is_template_of::<Vec<()>, _>(&[1_u8]));
/// assert!(!rtti_is_template_of::<u8, _>(&1_u8));
/// ```
pub fn rtti_is_template_of<Template: Typed, S: ?Sized + RttiSource>(source: &S) -> bool {
    let template = Template::template_uuid();
    !template.is_null()
        && source
            .source_helper()
            .is_some_and(|helper| helper.generic_type_uuid() == template)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{rtti_cast, rtti_cast_mut, rtti_enum_hierarchy, rtti_is_type_of, rtti_type_uuid};
    use crate::derive::{Rtti, TypeInfo, impl_external_rtti};
    use crate::{RttiObject, TypeUuid, Typed, rtti_address_of, rtti_type_name};
    use alloc::boxed::Box;
    use alloc::vec::Vec;

    fn hierarchy<T: crate::Rtti>() -> Vec<TypeUuid> {
        let mut visited = Vec::new();
        rtti_enum_hierarchy::<T>(|uuid| visited.push(uuid));
        visited
    }

    // Base <- Middle <- Derived

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{1B8E4F27-93A6-4C5D-8E02-F7A1D3B96C40}")]
    struct Base {
        base_data: i32,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{C0D27A95-4E31-4B68-9F7C-2E85A6D1B3F9}")]
    struct Middle {
        #[rtti(base)]
        base: Base,
        middle_data: i32,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{5E93B1C8-07D4-4A2F-B6E1-8C3F9A0D742B}")]
    struct Derived {
        #[rtti(base)]
        middle: Middle,
        derived_data: i32,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{8A6C3D1F-B254-4E97-A0C8-5F1E2D7B94A6}")]
    struct Unrelated;

    #[test]
    fn chain_upcast_and_downcast() {
        let mut derived = Derived::default();
        derived.middle.base.base_data = 1;
        derived.middle.middle_data = 2;
        derived.derived_data = 3;

        let base: &Base = rtti_cast(&derived).unwrap();
        assert!(core::ptr::eq(base, &derived.middle.base));
        assert_eq!(base.base_data, 1);

        let object: &dyn RttiObject = &derived;
        let back: &Derived = rtti_cast(object).unwrap();
        assert!(core::ptr::eq(back, &derived));
        assert_eq!(back.derived_data, 3);

        let middle: &Middle = rtti_cast(object).unwrap();
        assert_eq!(middle.middle_data, 2);

        assert!(rtti_cast::<Unrelated, _>(object).is_none());
        // A field borrow has no way back to its owner, see `rtti_upcast`.
        assert!(rtti_cast::<Derived, _>(&derived.middle).is_none());
    }

    #[test]
    fn chain_queries() {
        let derived = Derived::default();
        let object: &dyn RttiObject = &derived;

        assert_eq!(rtti_type_uuid(object), Derived::type_uuid());
        assert_eq!(rtti_type_name(object), Some("Derived"));
        assert!(rtti_is_type_of::<Base, _>(object));
        assert!(rtti_is_type_of::<Middle, _>(&derived));
        assert!(!rtti_is_type_of::<Derived, _>(&derived.middle));
        assert!(!rtti_is_type_of::<Unrelated, _>(object));

        assert_eq!(
            hierarchy::<Derived>(),
            [Derived::type_uuid(), Middle::type_uuid(), Base::type_uuid()]
        );
    }

    #[test]
    fn mutate_through_cast() {
        let mut derived = Derived::default();
        {
            let object: &mut dyn RttiObject = &mut derived;
            rtti_cast_mut::<Base, _>(object).unwrap().base_data = 7;
        }
        assert_eq!(derived.middle.base.base_data, 7);

        let mut boxed: Box<dyn RttiObject> = Box::new(Middle::default());
        assert!(rtti_cast_mut::<Derived, _>(&mut *boxed).is_none());
        assert!(rtti_cast_mut::<Base, _>(&mut *boxed).is_some());
    }

    // Diamond: Left and Right both contain a Base.

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{0D7E2A4B-C918-4F53-9B06-E4A1C7F3285D}")]
    struct Left {
        #[rtti(base)]
        base: Base,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{F2B60C97-5A3E-4D81-8C74-1B9E0A6D3F52}")]
    struct Right {
        #[rtti(base)]
        base: Base,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{93C4E1A8-7F25-4B0D-A6E3-D2F8B5C17049}")]
    struct Diamond {
        #[rtti(base)]
        left: Left,
        #[rtti(base)]
        right: Right,
        own: u8,
    }

    #[test]
    fn diamond_enumeration_keeps_repeats() {
        let visited = hierarchy::<Diamond>();
        assert_eq!(
            visited,
            [
                Diamond::type_uuid(),
                Left::type_uuid(),
                Base::type_uuid(),
                Right::type_uuid(),
                Base::type_uuid(),
            ]
        );
        assert_eq!(visited.len(), 5);
    }

    #[test]
    fn diamond_casts() {
        let diamond = Diamond::default();
        let object: &dyn RttiObject = &diamond;

        // The first base in declaration order wins.
        let base: &Base = rtti_cast(object).unwrap();
        assert!(core::ptr::eq(base, &diamond.left.base));

        let right: &Right = rtti_cast(object).unwrap();
        assert!(core::ptr::eq(right, &diamond.right));
        let right_base: &Base = rtti_cast(right).unwrap();
        assert!(core::ptr::eq(right_base, &diamond.right.base));

        assert_eq!(diamond.own, 0);
    }

    // Two bases with one base each: five nodes.

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{4E1B9D73-2C6A-4F08-B5D7-A83E0F6C92B1}")]
    struct Alpha {
        a: u32,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{B7A2F058-91E4-4C3D-8A6F-0D5C3E9B1724}")]
    struct AlphaChild {
        #[rtti(base)]
        alpha: Alpha,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{6C0D83E9-A47B-4215-9E3C-F1B8D2A05E67}")]
    struct Beta {
        b: u64,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{E83F5A16-0B9D-4C72-A4E8-7D2C6F1B309A}")]
    struct BetaChild {
        #[rtti(base)]
        beta: Beta,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{2D9A7B40-F6C1-4E85-B3A0-58E4C1D7F9B2}")]
    struct Mix {
        #[rtti(base)]
        alpha: AlphaChild,
        #[rtti(base)]
        beta: BetaChild,
    }

    #[test]
    fn mix_enumeration() {
        assert_eq!(
            hierarchy::<Mix>(),
            [
                Mix::type_uuid(),
                AlphaChild::type_uuid(),
                Alpha::type_uuid(),
                BetaChild::type_uuid(),
                Beta::type_uuid(),
            ]
        );
    }

    #[test]
    fn mix_side_cast() {
        let mut mix = Mix::default();
        mix.alpha.alpha.a = 11;
        mix.beta.beta.b = 22;

        let object: &dyn RttiObject = &mix;
        let beta: &Beta = rtti_cast(object).unwrap();
        assert_eq!(beta.b, 22);
        let alpha: &Alpha = rtti_cast(object).unwrap();
        assert_eq!(alpha.a, 11);

        let address = rtti_address_of(object, Beta::type_uuid()).unwrap();
        assert!(address.addr_eq(&mix.beta.beta));
        assert!(rtti_address_of(object, Unrelated::type_uuid()).is_none());
    }

    // External declarations mixed with intrusive ones.

    struct ExtRoot {
        value: i32,
    }

    struct ExtOnIntrusive {
        base: Base,
        ext: i32,
    }

    #[derive(Rtti)]
    #[rtti(uuid = "{A19E6C3F-D720-4B54-8E1A-3F0B7D5C92E8}")]
    struct IntrusiveOnExt {
        #[rtti(base)]
        root: ExtRoot,
    }

    struct ExtMix {
        root: ExtRoot,
        other: ExtOnIntrusive,
        intrusive: IntrusiveOnExt,
    }

    impl_external_rtti!(ExtRoot, "{5B3D8F12-C6A4-4E97-B0D1-29E7A4C8F35B}");
    impl_external_rtti!(
        ExtOnIntrusive,
        "{C84E2B71-0F5D-4A36-9C8B-E3D1F6A07B94}",
        Base(base)
    );
    impl_external_rtti!(
        ExtMix,
        "{07F9C3A5-B1E8-4D62-A5F3-8C4B2E9D1A70}",
        ExtRoot(root),
        ExtOnIntrusive(other),
        IntrusiveOnExt(intrusive),
    );

    #[test]
    fn external_intrusive_mix() {
        assert_eq!(hierarchy::<ExtRoot>().len(), 1);
        assert_eq!(hierarchy::<ExtOnIntrusive>().len(), 2);
        assert_eq!(hierarchy::<IntrusiveOnExt>().len(), 2);
        assert_eq!(
            hierarchy::<ExtMix>(),
            [
                ExtMix::type_uuid(),
                ExtRoot::type_uuid(),
                ExtOnIntrusive::type_uuid(),
                Base::type_uuid(),
                IntrusiveOnExt::type_uuid(),
                ExtRoot::type_uuid(),
            ]
        );

        let mix = ExtMix {
            root: ExtRoot { value: 1 },
            other: ExtOnIntrusive {
                base: Base { base_data: 2 },
                ext: 3,
            },
            intrusive: IntrusiveOnExt {
                root: ExtRoot { value: 4 },
            },
        };

        let object: &dyn RttiObject = &mix;
        assert_eq!(rtti_cast::<ExtRoot, _>(object).unwrap().value, 1);
        assert_eq!(rtti_cast::<Base, _>(object).unwrap().base_data, 2);
        assert_eq!(rtti_cast::<ExtOnIntrusive, _>(object).unwrap().ext, 3);

        let intrusive: &IntrusiveOnExt = rtti_cast(object).unwrap();
        assert_eq!(rtti_cast::<ExtRoot, _>(intrusive).unwrap().value, 4);
        assert!(rtti_cast::<Derived, _>(object).is_none());

        // External and intrusive answers agree.
        assert!(rtti_is_type_of::<Base, _>(&mix.other));
        assert!(rtti_is_type_of::<ExtRoot, _>(&mix.intrusive));
        assert!(!rtti_is_type_of::<ExtMix, _>(&mix.root));
    }

    // Identity only.

    #[derive(TypeInfo, Default)]
    #[rtti(uuid = "{F6A18D3C-72B9-4E05-8D4A-B1C3E7F90265}")]
    struct Plain {
        inner: Base,
    }

    #[test]
    fn identity_only_matches_itself() {
        let plain = Plain::default();
        assert!(rtti_cast::<Plain, _>(&plain).is_some());
        assert!(rtti_cast::<Base, _>(&plain).is_none());
        assert!(!rtti_is_type_of::<Base, _>(&plain));
        assert_eq!(hierarchy::<Plain>(), [Plain::type_uuid()]);
        assert_eq!(plain.inner.base_data, 0);
    }

    #[test]
    fn null_sources() {
        let none: Option<&dyn RttiObject> = None;
        assert_eq!(rtti_type_uuid(&none), TypeUuid::NULL);
        assert_eq!(rtti_type_name(&none), None);
        assert!(!rtti_is_type_of::<Base, _>(&none));
        assert!(rtti_cast::<Base, _>(&none).is_none());

        let mut none_mut: Option<&mut Derived> = None;
        assert!(rtti_cast_mut::<Base, _>(&mut none_mut).is_none());

        let derived = Derived::default();
        let some: Option<&dyn RttiObject> = Some(&derived);
        assert_eq!(rtti_type_uuid(&some), Derived::type_uuid());
        assert!(rtti_cast::<Middle, _>(&some).is_some());

        let mut derived = Derived::default();
        let mut some_mut = Some(&mut derived);
        rtti_cast_mut::<Base, _>(&mut some_mut).unwrap().base_data = 5;
        assert_eq!(derived.middle.base.base_data, 5);
    }
}
