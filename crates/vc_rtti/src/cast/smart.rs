use alloc::rc::Rc;
use alloc::sync::Arc;
use core::any::Any;

use vc_ptr::{AliasArc, AliasRc};

use crate::cast::{RttiSource, rtti_cast};
use crate::helper::RttiHelper;
use crate::{Rtti, RttiObject, TypeUuid};

/// Casts the value owned by an `Arc`, keeping the same ownership block.
///
/// On success the result holds one more strong reference to `source`. On
/// failure nothing changes.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_rtti::{RttiObject, rtti_cast_arc, derive::Rtti};
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{B36D0F48-A9C2-4E17-8D5B-1F7E3A6C2094}")]
/// struct Engine {
///     power: u32,
/// }
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{71E5C2A9-3D8B-4F04-B6A1-E9C0D4F7385B}")]
/// struct Car {
///     #[rtti(base)]
///     engine: Engine,
/// }
///
/// let car: Arc<dyn RttiObject + Send + Sync> = Arc::new(Car { engine: Engine { power: 90 } });
///
/// let engine = rtti_cast_arc::<Engine, _>(&car).unwrap();
/// assert_eq!(engine.power, 90);
/// assert_eq!(Arc::strong_count(&car), 2);
///
/// drop(engine);
/// assert_eq!(Arc::strong_count(&car), 1);
/// ```
pub fn rtti_cast_arc<T: Rtti, S: ?Sized + RttiSource>(source: &Arc<S>) -> Option<AliasArc<S, T>> {
    AliasArc::try_from_owner(source, rtti_cast::<T, S>)
}

/// Casts the value owned by an `Rc`, keeping the same ownership block.
///
/// See [`rtti_cast_arc`].
pub fn rtti_cast_rc<T: Rtti, S: ?Sized + RttiSource>(source: &Rc<S>) -> Option<AliasRc<S, T>> {
    AliasRc::try_from_owner(source, rtti_cast::<T, S>)
}

/// Casts an alias again, starting from the object that owns it.
///
/// This is how a base obtained with [`rtti_cast_arc`] is cast back to the
/// derived type.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_rtti::{RttiObject, rtti_cast_arc, rtti_recast_arc, derive::Rtti};
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{0A6D3F92-E71B-4C58-9B04-C2E8F5A1D376}")]
/// struct Wheel {
///     size: u8,
/// }
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{F4B19C07-3D62-4A8E-B5F1-7E0A2C9D4B83}")]
/// struct Bike {
///     #[rtti(base)]
///     wheel: Wheel,
///     gears: u8,
/// }
///
/// let bike: Arc<dyn RttiObject + Send + Sync> = Arc::new(Bike { wheel: Wheel { size: 28 }, gears: 21 });
///
/// let wheel = rtti_cast_arc::<Wheel, _>(&bike).unwrap();
/// let back = rtti_recast_arc::<Bike, _, _>(&wheel).unwrap();
/// assert_eq!(back.gears, 21);
/// assert_eq!(Arc::strong_count(&bike), 3);
/// ```
pub fn rtti_recast_arc<T: Rtti, O: ?Sized + RttiSource, U: ?Sized>(
    source: &AliasArc<O, U>,
) -> Option<AliasArc<O, T>> {
    rtti_cast_arc(AliasArc::owner(source))
}

/// Casts an alias again, starting from the object that owns it.
///
/// See [`rtti_recast_arc`].
pub fn rtti_recast_rc<T: Rtti, O: ?Sized + RttiSource, U: ?Sized>(
    source: &AliasRc<O, U>,
) -> Option<AliasRc<O, T>> {
    rtti_cast_rc(AliasRc::owner(source))
}

// -----------------------------------------------------------------------------
// Alias sources

macro_rules! impl_alias_source {
    ($alias:ident) => {
        impl<O: ?Sized + RttiSource, T: ?Sized> RttiSource for $alias<O, T> {
            #[inline]
            fn source_type_uuid(&self) -> TypeUuid {
                O::source_type_uuid($alias::owner(self))
            }

            #[inline]
            fn source_type_name(&self) -> Option<&'static str> {
                O::source_type_name($alias::owner(self))
            }

            #[inline]
            fn source_is_type_of(&self, uuid: TypeUuid) -> bool {
                O::source_is_type_of($alias::owner(self), uuid)
            }

            #[inline]
            fn source_address_of(&self, uuid: TypeUuid) -> Option<&dyn Any> {
                O::source_address_of($alias::owner(self), uuid)
            }

            /// Always `None`, the owner is shared.
            #[inline]
            fn source_address_of_mut(&mut self, _uuid: TypeUuid) -> Option<&mut dyn Any> {
                None
            }

            #[inline]
            fn source_helper(&self) -> Option<&'static dyn RttiHelper> {
                O::source_helper($alias::owner(self))
            }

            #[inline]
            fn source_object(&self) -> Option<&dyn RttiObject> {
                O::source_object($alias::owner(self))
            }

            #[inline]
            fn source_object_mut(&mut self) -> Option<&mut dyn RttiObject> {
                None
            }
        }
    };
}

impl_alias_source!(AliasArc);
impl_alias_source!(AliasRc);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{rtti_cast_arc, rtti_cast_rc, rtti_recast_arc, rtti_recast_rc};
    use crate::derive::Rtti;
    use crate::{RttiObject, Typed, rtti_cast, rtti_is_type_of, rtti_type_uuid};
    use vc_ptr::{AliasArc, AliasRc};
    use alloc::rc::Rc;
    use alloc::sync::Arc;
    use std::thread;

    #[derive(Rtti)]
    #[rtti(uuid = "{D09A4E6C-58B1-4F23-A7D3-6E2C8B0F91A4}")]
    struct Resource {
        id: u32,
    }

    #[derive(Rtti)]
    #[rtti(uuid = "{3E7B1F05-C4D8-4A69-9B2E-F5A0C6D3E718}")]
    struct Texture {
        #[rtti(base)]
        resource: Resource,
        width: u32,
    }

    #[derive(Rtti)]
    #[rtti(uuid = "{A84C6D2E-17F9-4B30-8E5A-0D3B9F1C7E62}")]
    struct Sound;

    #[test]
    fn arc_alias_shares_owner() {
        let texture: Arc<dyn RttiObject + Send + Sync> = Arc::new(Texture {
            resource: Resource { id: 3 },
            width: 64,
        });

        let resource = rtti_cast_arc::<Resource, _>(&texture).unwrap();
        assert_eq!(resource.id, 3);
        assert_eq!(Arc::strong_count(&texture), 2);

        assert!(rtti_cast_arc::<Sound, _>(&texture).is_none());
        assert_eq!(Arc::strong_count(&texture), 2);

        let back = rtti_cast_arc::<Texture, _>(&texture).unwrap();
        assert_eq!(back.width, 64);
        assert_eq!(Arc::strong_count(&texture), 3);

        drop((resource, back));
        assert_eq!(Arc::strong_count(&texture), 1);
    }

    #[test]
    fn alias_outlives_original_handle() {
        let texture = Arc::new(Texture {
            resource: Resource { id: 8 },
            width: 16,
        });
        let resource = rtti_cast_arc::<Resource, _>(&texture).unwrap();
        drop(texture);

        let handle = thread::spawn(move || resource.id);
        assert_eq!(handle.join().unwrap(), 8);
    }

    #[test]
    fn rc_alias() {
        let texture: Rc<dyn RttiObject> = Rc::new(Texture {
            resource: Resource { id: 1 },
            width: 2,
        });
        assert_eq!(rtti_type_uuid(&*texture), Texture::type_uuid());

        let resource = rtti_cast_rc::<Resource, _>(&texture).unwrap();
        assert_eq!(Rc::strong_count(&texture), 2);
        assert!(rtti_cast_rc::<Sound, _>(&texture).is_none());
        assert_eq!(Rc::strong_count(&texture), 2);
        drop(resource);
        assert_eq!(Rc::strong_count(&texture), 1);
    }

    #[test]
    fn arc_round_trip() {
        let texture: Arc<dyn RttiObject + Send + Sync> = Arc::new(Texture {
            resource: Resource { id: 5 },
            width: 32,
        });

        let resource = rtti_cast_arc::<Resource, _>(&texture).unwrap();
        assert_eq!(rtti_type_uuid(&resource), Texture::type_uuid());
        assert!(rtti_is_type_of::<Texture, _>(&resource));

        let back: AliasArc<_, Texture> = rtti_recast_arc(&resource).unwrap();
        assert!(core::ptr::addr_eq(AliasArc::as_ptr(&back), Arc::as_ptr(&texture)));
        assert_eq!(back.width, 32);
        assert_eq!(Arc::strong_count(&texture), 3);

        assert!(rtti_recast_arc::<Sound, _, _>(&back).is_none());
        assert_eq!(Arc::strong_count(&texture), 3);

        let borrowed: &Texture = rtti_cast(&resource).unwrap();
        assert!(core::ptr::eq(borrowed, &*back));
    }

    #[test]
    fn rc_round_trip() {
        let texture: Rc<dyn RttiObject> = Rc::new(Texture {
            resource: Resource { id: 6 },
            width: 8,
        });

        let resource = rtti_cast_rc::<Resource, _>(&texture).unwrap();
        let back: AliasRc<_, Texture> = rtti_recast_rc(&resource).unwrap();
        assert!(core::ptr::addr_eq(AliasRc::as_ptr(&back), Rc::as_ptr(&texture)));
        assert_eq!(back.resource.id, 6);
        assert_eq!(Rc::strong_count(&texture), 3);
    }
}
