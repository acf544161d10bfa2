use core::any::TypeId;
use core::fmt;

use crate::TypeUuid;
use crate::info::{TypeTraits, Typed};

/// Everything known about a declared type, created once and kept for the
/// lifetime of the process.
///
/// # Examples
///
/// ```
/// use vc_rtti::{Typed, TypeTraits};
///
/// let info = i16::type_info();
///
/// assert_eq!(info.name(), "i16");
/// assert_eq!(info.size(), 2);
/// assert!(info.traits().contains(TypeTraits::IS_SIGNED));
/// assert!(info.is::<i16>());
/// ```
#[derive(Clone)]
pub struct TypeInfo {
    uuid: TypeUuid,
    template_uuid: TypeUuid,
    name: &'static str,
    type_id: TypeId,
    size: usize,
    align: usize,
    traits: TypeTraits,
}

impl TypeInfo {
    /// Collects the information of `T`.
    ///
    /// [`TypeTraits::IS_TEMPLATE`] is added when `T` has a template uuid.
    pub fn of<T: Typed>() -> Self {
        let template_uuid = T::template_uuid();
        let mut traits = T::type_traits();
        traits.set(TypeTraits::IS_TEMPLATE, !template_uuid.is_null());

        Self {
            uuid: T::type_uuid(),
            template_uuid,
            name: T::type_name(),
            type_id: TypeId::of::<T>(),
            size: size_of::<T>(),
            align: align_of::<T>(),
            traits,
        }
    }

    #[inline]
    pub fn uuid(&self) -> TypeUuid {
        self.uuid
    }

    #[inline]
    pub fn template_uuid(&self) -> TypeUuid {
        self.template_uuid
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn align(&self) -> usize {
        self.align
    }

    #[inline]
    pub fn traits(&self) -> TypeTraits {
        self.traits
    }

    #[inline]
    pub fn is_template(&self) -> bool {
        self.traits.contains(TypeTraits::IS_TEMPLATE)
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.traits.contains(TypeTraits::IS_ABSTRACT)
    }

    /// Returns `true` if this record describes `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("size", &self.size)
            .field("traits", &self.traits)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
