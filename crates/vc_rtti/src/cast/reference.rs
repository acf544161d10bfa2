use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use crate::cast::{RttiSource, rtti_cast, rtti_cast_mut};
use crate::helper::RttiHelper;
use crate::{Rtti, RttiObject, TypeUuid};

// -----------------------------------------------------------------------------
// RttiRef

/// A subobject borrowed together with the object it belongs to.
///
/// Dereferences to the subobject. As a cast source it answers for the whole
/// object, so a base obtained with [`rtti_upcast`] can be cast back to the
/// derived type or sideways to another base.
///
/// # Examples
///
/// ```
/// use vc_rtti::{RttiRef, rtti_cast, rtti_upcast, derive::Rtti};
///
/// #[derive(Rtti, Default)]
/// #[rtti(uuid = "{9E2B47D1-6A08-4C3F-B15E-D83A0F7C26B4}")]
/// struct Body {
///     mass: f32,
/// }
///
/// #[derive(Rtti, Default)]
/// #[rtti(uuid = "{31C8F5A2-E94D-4B70-8A63-5F1D2B0E9C47}")]
/// struct Rocket {
///     #[rtti(base)]
///     body: Body,
///     fuel: f32,
/// }
///
/// let rocket = Rocket::default();
///
/// let body: RttiRef<'_, Body> = rtti_upcast(&rocket).unwrap();
/// assert!(core::ptr::eq(&*body, &rocket.body));
///
/// let back: &Rocket = body.downcast().unwrap();
/// assert!(core::ptr::eq(back, &rocket));
/// assert!(rtti_cast::<Rocket, _>(&body).is_some());
/// ```
pub struct RttiRef<'a, T> {
    root: &'a dyn RttiObject,
    target: &'a T,
}

impl<'a, T: Rtti> RttiRef<'a, T> {
    /// Borrows the `T` contained in `root`.
    #[inline]
    pub fn new(root: &'a dyn RttiObject) -> Option<Self> {
        let target = rtti_cast::<T, dyn RttiObject>(root)?;
        Some(Self { root, target })
    }

    /// Casts to another subobject of the same object.
    #[inline]
    pub fn cast<U: Rtti>(&self) -> Option<RttiRef<'a, U>> {
        RttiRef::new(self.root)
    }

    /// Casts to another subobject of the same object, dropping the object.
    #[inline]
    pub fn downcast<U: Rtti>(&self) -> Option<&'a U> {
        rtti_cast::<U, dyn RttiObject>(self.root)
    }
}

impl<'a, T> RttiRef<'a, T> {
    /// The most derived object.
    #[inline]
    pub fn root(&self) -> &'a dyn RttiObject {
        self.root
    }

    #[inline]
    pub fn get(&self) -> &'a T {
        self.target
    }
}

impl<T> Deref for RttiRef<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.target
    }
}

impl<T> Clone for RttiRef<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RttiRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for RttiRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.target, f)
    }
}

impl<T> RttiSource for RttiRef<'_, T> {
    #[inline]
    fn source_type_uuid(&self) -> TypeUuid {
        self.root.rtti_get_type()
    }

    #[inline]
    fn source_type_name(&self) -> Option<&'static str> {
        Some(self.root.rtti_get_type_name())
    }

    #[inline]
    fn source_is_type_of(&self, uuid: TypeUuid) -> bool {
        self.root.rtti_is_type_of(uuid)
    }

    #[inline]
    fn source_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any> {
        self.root.rtti_address_of(uuid)
    }

    /// Always `None`, the object is borrowed immutably.
    #[inline]
    fn source_address_of_mut(&mut self, _uuid: TypeUuid) -> Option<&mut dyn Any> {
        None
    }

    #[inline]
    fn source_helper(&self) -> Option<&'static dyn RttiHelper> {
        Some(self.root.rtti_get_helper())
    }

    #[inline]
    fn source_object(&self) -> Option<&dyn RttiObject> {
        Some(self.root)
    }

    #[inline]
    fn source_object_mut(&mut self) -> Option<&mut dyn RttiObject> {
        None
    }
}

// -----------------------------------------------------------------------------
// RttiMut

/// Mutable version of [`RttiRef`].
///
/// The object is borrowed exclusively and the subobject is looked up again
/// on each access.
pub struct RttiMut<'a, T> {
    root: &'a mut dyn RttiObject,
    _marker: PhantomData<fn() -> T>,
}

const STATIC_HIERARCHY: &str = "the hierarchy of a declared type should not change";

impl<'a, T: Rtti> RttiMut<'a, T> {
    /// Borrows the `T` contained in `root`.
    pub fn new(root: &'a mut dyn RttiObject) -> Option<Self> {
        if rtti_cast_mut::<T, dyn RttiObject>(&mut *root).is_none() {
            return None;
        }
        Some(Self {
            root,
            _marker: PhantomData,
        })
    }

    /// Casts to another subobject of the same object.
    pub fn cast<U: Rtti>(self) -> Result<RttiMut<'a, U>, Self> {
        if rtti_cast_mut::<U, dyn RttiObject>(&mut *self.root).is_none() {
            return Err(self);
        }
        Ok(RttiMut {
            root: self.root,
            _marker: PhantomData,
        })
    }

    /// Casts to another subobject of the same object, dropping the object.
    #[inline]
    pub fn downcast<U: Rtti>(self) -> Option<&'a mut U> {
        let root = self.root;
        rtti_cast_mut::<U, dyn RttiObject>(root)
    }

    /// Returns the subobject for the rest of the borrow.
    pub fn into_mut(self) -> &'a mut T {
        let root = self.root;
        rtti_cast_mut::<T, dyn RttiObject>(root).expect(STATIC_HIERARCHY)
    }
}

impl<'a, T> RttiMut<'a, T> {
    /// The most derived object.
    #[inline]
    pub fn root(&self) -> &dyn RttiObject {
        &*self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut dyn RttiObject {
        &mut *self.root
    }

    #[inline]
    pub fn into_root(self) -> &'a mut dyn RttiObject {
        self.root
    }
}

impl<T: Rtti> Deref for RttiMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        rtti_cast::<T, dyn RttiObject>(&*self.root).expect(STATIC_HIERARCHY)
    }
}

impl<T: Rtti> DerefMut for RttiMut<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        rtti_cast_mut::<T, dyn RttiObject>(&mut *self.root).expect(STATIC_HIERARCHY)
    }
}

impl<T: Rtti + fmt::Debug> fmt::Debug for RttiMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T> RttiSource for RttiMut<'_, T> {
    #[inline]
    fn source_type_uuid(&self) -> TypeUuid {
        self.root.rtti_get_type()
    }

    #[inline]
    fn source_type_name(&self) -> Option<&'static str> {
        Some(self.root.rtti_get_type_name())
    }

    #[inline]
    fn source_is_type_of(&self, uuid: TypeUuid) -> bool {
        self.root.rtti_is_type_of(uuid)
    }

    #[inline]
    fn source_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any> {
        self.root.rtti_address_of(uuid)
    }

    #[inline]
    fn source_address_of_mut(&mut self, uuid: TypeUuid) -> Option<&mut dyn Any> {
        self.root.rtti_address_of_mut(uuid)
    }

    #[inline]
    fn source_helper(&self) -> Option<&'static dyn RttiHelper> {
        Some(self.root.rtti_get_helper())
    }

    #[inline]
    fn source_object(&self) -> Option<&dyn RttiObject> {
        Some(&*self.root)
    }

    #[inline]
    fn source_object_mut(&mut self) -> Option<&mut dyn RttiObject> {
        Some(&mut *self.root)
    }
}

// -----------------------------------------------------------------------------
// Functions

/// Casts `source` to the `T` it contains, keeping track of the whole object.
///
/// Unlike [`rtti_cast`], the result can be cast back to the derived type.
/// Casting an [`RttiRef`] again starts from its object, not from the subobject.
#[inline]
pub fn rtti_upcast<T: Rtti, S: ?Sized + RttiSource>(source: &S) -> Option<RttiRef<'_, T>> {
    RttiRef::new(source.source_object()?)
}

/// Mutable version of [`rtti_upcast`].
#[inline]
pub fn rtti_upcast_mut<T: Rtti, S: ?Sized + RttiSource>(source: &mut S) -> Option<RttiMut<'_, T>> {
    RttiMut::new(source.source_object_mut()?)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{RttiMut, RttiRef, rtti_upcast, rtti_upcast_mut};
    use crate::derive::Rtti;
    use crate::{RttiObject, Typed, rtti_cast, rtti_cast_mut, rtti_is_type_of, rtti_type_uuid};

    #[derive(Rtti, Default, Debug)]
    #[rtti(uuid = "{4D7A2E91-C3B0-4F58-9E16-A8D5F2C07B34}")]
    struct Shape {
        id: u32,
    }

    #[derive(Rtti, Default, Debug)]
    #[rtti(uuid = "{E0B93F46-2A7C-4D15-B8E2-61C4D9A3F5B7}")]
    struct Colored {
        rgb: u32,
    }

    #[derive(Rtti, Default, Debug)]
    #[rtti(uuid = "{7C15D8A3-F62E-4B09-A4D1-3E8B0C5F92A6}")]
    struct Polygon {
        #[rtti(base)]
        shape: Shape,
        sides: u8,
    }

    #[derive(Rtti, Default, Debug)]
    #[rtti(uuid = "{B2E06A7F-853D-4C41-9F2B-D7A1E4C830F5}")]
    struct Sprite {
        #[rtti(base)]
        polygon: Polygon,
        #[rtti(base)]
        colored: Colored,
        frame: u16,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{58A3C1E7-0D92-4F6B-B3A5-E9F1264D07C8}")]
    struct Detached;

    #[test]
    fn single_base_round_trip() {
        let polygon = Polygon::default();

        let shape: RttiRef<'_, Shape> = rtti_upcast(&polygon).unwrap();
        assert!(core::ptr::eq(shape.get(), &polygon.shape));

        let back: &Polygon = rtti_cast(&shape).unwrap();
        assert!(core::ptr::eq(back, &polygon));
        assert!(core::ptr::eq(shape.downcast::<Polygon>().unwrap(), &polygon));

        assert_eq!(rtti_type_uuid(&shape), Polygon::type_uuid());
        assert!(rtti_cast::<Detached, _>(&shape).is_none());

        // A plain field borrow only knows its own type.
        assert!(rtti_cast::<Polygon, _>(&polygon.shape).is_none());
    }

    #[test]
    fn multiple_bases_round_trip() {
        let mut sprite = Sprite::default();
        sprite.polygon.shape.id = 4;
        sprite.colored.rgb = 0xFF00FF;
        let object: &dyn RttiObject = &sprite;

        let shape: RttiRef<'_, Shape> = rtti_upcast(object).unwrap();
        assert_eq!(shape.id, 4);
        assert!(core::ptr::eq(shape.downcast::<Sprite>().unwrap(), &sprite));

        // Sideways through the object.
        let colored = shape.cast::<Colored>().unwrap();
        assert!(core::ptr::eq(colored.get(), &sprite.colored));
        assert_eq!(colored.rgb, 0xFF00FF);
        assert!(rtti_is_type_of::<Polygon, _>(&colored));

        let polygon = colored.cast::<Polygon>().unwrap();
        let back = rtti_upcast::<Sprite, _>(&polygon).unwrap();
        assert!(core::ptr::eq(back.get(), &sprite));
        assert!(core::ptr::addr_eq(back.root(), &sprite));
    }

    #[test]
    fn null_and_unrelated_sources() {
        let polygon = Polygon::default();
        assert!(rtti_upcast::<Colored, _>(&polygon).is_none());
        assert!(rtti_upcast::<Shape, _>(&None::<&Polygon>).is_none());
        assert!(rtti_upcast::<Shape, _>(&Some(&polygon)).is_some());
    }

    #[test]
    fn mutable_round_trip() {
        let mut sprite = Sprite::default();

        let mut colored: RttiMut<'_, Colored> = rtti_upcast_mut(&mut sprite).unwrap();
        colored.rgb = 7;
        rtti_cast_mut::<Shape, _>(&mut colored).unwrap().id = 3;
        assert_eq!(rtti_type_uuid(&colored), Sprite::type_uuid());

        let mut polygon = colored.cast::<Polygon>().unwrap();
        polygon.sides = 6;
        assert!(polygon.cast::<Detached>().is_err_and(|polygon| polygon.sides == 6));

        let polygon = rtti_upcast_mut::<Polygon, _>(&mut sprite).unwrap();
        let back: &mut Sprite = polygon.downcast().unwrap();
        back.frame = 9;

        assert_eq!(sprite.colored.rgb, 7);
        assert_eq!(sprite.polygon.shape.id, 3);
        assert_eq!(sprite.polygon.sides, 6);
        assert_eq!(sprite.frame, 9);
    }

    #[test]
    fn into_mut_keeps_borrow() {
        let mut polygon = Polygon::default();
        let shape = rtti_upcast_mut::<Shape, _>(&mut polygon).unwrap().into_mut();
        shape.id = 12;
        assert_eq!(polygon.shape.id, 12);
    }
}
