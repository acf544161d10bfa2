use core::any::Any;

use vc_ptr::{Ptr, PtrMut};

use crate::info::{TypeInfo, TypeTraits};
use crate::{Rtti, RttiKind, TypeUuid};

// -----------------------------------------------------------------------------
// RttiHelper

/// Dynamic RTTI of one declared type.
///
/// Retrieved with [`rtti_helper_of`], [`RttiObject::rtti_get_helper`] or from a
/// [`TypeRegistry`] by uuid.
///
/// Casting methods take an object of the helper's own type and return a
/// subobject of the requested type, or `None` when the object has another
/// type or does not contain the requested one.
///
/// # Examples
///
/// ```
/// use vc_rtti::{RttiHelper, Typed, rtti_helper_of, derive::Rtti};
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{A7E2C948-5D13-4B6F-8F90-3C1E7B2D6A54}")]
/// struct Node {
///     id: u32,
/// }
///
/// let helper = rtti_helper_of::<Node>();
///
/// assert_eq!(helper.type_uuid(), Node::type_uuid());
/// assert_eq!(helper.type_name(), "Node");
/// assert!(helper.provides_full_rtti());
///
/// let node = Node { id: 3 };
/// assert!(helper.cast(&node, Node::type_uuid()).is_some());
/// assert!(helper.cast(&5_u32, Node::type_uuid()).is_none());
/// ```
///
/// [`RttiObject::rtti_get_helper`]: crate::RttiObject::rtti_get_helper
/// [`TypeRegistry`]: crate::registry::TypeRegistry
pub trait RttiHelper: Send + Sync + 'static {
    fn type_info(&self) -> &'static TypeInfo;

    /// How the hierarchy was declared.
    fn kind(&self) -> RttiKind;

    /// Returns `true` if `uuid` is the helper's type or one of its bases.
    fn is_type_of(&self, uuid: TypeUuid) -> bool;

    /// Enumerates the helper's type then its bases, see
    /// [`Rtti::rtti_enum_hierarchy`].
    fn enum_hierarchy(&self, visitor: &mut dyn FnMut(TypeUuid));

    /// Returns the subobject of type `uuid` inside `object`.
    fn cast<'a>(&self, object: &'a dyn Any, uuid: TypeUuid) -> Option<&'a dyn Any>;

    fn cast_mut<'a>(&self, object: &'a mut dyn Any, uuid: TypeUuid) -> Option<&'a mut dyn Any>;

    /// Type-erased [`cast`](RttiHelper::cast).
    ///
    /// # Safety
    ///
    /// `object` must point to a live value of the helper's type.
    unsafe fn address_of<'a>(&self, object: Ptr<'a>, uuid: TypeUuid) -> Option<Ptr<'a>>;

    /// Type-erased [`cast_mut`](RttiHelper::cast_mut).
    ///
    /// # Safety
    ///
    /// `object` must point to a live value of the helper's type.
    unsafe fn address_of_mut<'a>(&self, object: PtrMut<'a>, uuid: TypeUuid)
    -> Option<PtrMut<'a>>;

    #[inline]
    fn type_uuid(&self) -> TypeUuid {
        self.type_info().uuid()
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        self.type_info().name()
    }

    /// The template uuid, [`TypeUuid::NULL`] for non-generic types.
    #[inline]
    fn generic_type_uuid(&self) -> TypeUuid {
        self.type_info().template_uuid()
    }

    #[inline]
    fn type_size(&self) -> usize {
        self.type_info().size()
    }

    #[inline]
    fn type_traits(&self) -> TypeTraits {
        self.type_info().traits()
    }

    #[inline]
    fn is_abstract(&self) -> bool {
        self.type_traits().contains(TypeTraits::IS_ABSTRACT)
    }

    /// Returns `false` for types that only know their own identity.
    #[inline]
    fn provides_full_rtti(&self) -> bool {
        self.kind().is_full()
    }
}

impl core::fmt::Debug for dyn RttiHelper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RttiHelper")
            .field("type", &self.type_name())
            .field("uuid", &self.type_uuid())
            .field("kind", &self.kind())
            .finish()
    }
}

/// Returns the helper singleton of `T`.
///
/// The same reference is returned on every call.
#[inline]
pub fn rtti_helper_of<T: Rtti>() -> &'static dyn RttiHelper {
    T::rtti_helper()
}
