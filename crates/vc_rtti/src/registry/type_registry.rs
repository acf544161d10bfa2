use alloc::string::String;
use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_utils::hash::hashbrown::hash_map::Entry;
use vc_utils::hash::{FixedHashState, HashMap, HashSet, NoOpHashMap, NoOpHashState};

use crate::helper::RttiHelper;
use crate::info::TypeInfo;
use crate::registry::RegistryError;
use crate::{Rtti, TypeUuid};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of RTTI helpers keyed by [`TypeUuid`].
///
/// # Examples
///
/// ```
/// use vc_rtti::{Typed, TypeUuid, derive::Rtti};
/// use vc_rtti::registry::TypeRegistry;
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{92B4D7E1-0C3A-4F68-B5E9-6A1D8C2F4B07}")]
/// struct Mesh;
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{E0A5C3F9-64B2-4D17-8C9E-3B7F1A0D5E26}")]
/// struct SkinnedMesh {
///     #[rtti(base)]
///     mesh: Mesh,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<SkinnedMesh>();
///
/// // The base is registered too.
/// let helper = registry.get(Mesh::type_uuid()).unwrap();
/// assert_eq!(helper.type_name(), "Mesh");
///
/// // Hierarchy queries from uuids alone.
/// assert!(registry.is_type_of(SkinnedMesh::type_uuid(), Mesh::type_uuid()));
/// assert!(registry.get_with_name("SkinnedMesh").is_some());
/// assert!(registry.get(TypeUuid::from_u128(7)).is_none());
/// ```
pub struct TypeRegistry {
    helpers: NoOpHashMap<TypeUuid, &'static dyn RttiHelper>,
    name_to_uuid: HashMap<&'static str, TypeUuid>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            helpers: NoOpHashMap::with_hasher(NoOpHashState),
            name_to_uuid: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry with the built-in types.
    ///
    /// - `()` `bool` `char`
    /// - `i8` `i16` `i32` `i64` `isize`
    /// - `u8` `u16` `u32` `u64` `usize`
    /// - `f32` `f64`
    /// - `String` `TypeUuid`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<TypeUuid>();
        registry
    }

    // # Validity
    // The type must **not** already exist.
    fn add_name_index(&mut self, name: &'static str, uuid: TypeUuid) {
        if self.ambiguous_names.contains(name) {
            return;
        }
        if self.name_to_uuid.remove(name).is_some() {
            log::warn!("type name `{name}` is ambiguous, use its uuid to look it up");
            self.ambiguous_names.insert(name);
        } else {
            self.name_to_uuid.insert(name, uuid);
        }
    }

    /// Inserts a helper under its own uuid.
    ///
    /// - Returns `Ok(true)` if the helper was inserted.
    /// - Returns `Ok(false)` if the same type is already registered.
    /// - Fails if the uuid is null or belongs to another type.
    ///
    /// Bases are _not_ registered, use [`register`](Self::register) for that.
    pub fn try_insert_helper(
        &mut self,
        helper: &'static dyn RttiHelper,
    ) -> Result<bool, RegistryError> {
        let info = helper.type_info();
        let uuid = info.uuid();
        if uuid.is_null() {
            return Err(RegistryError::NullUuid { name: info.name() });
        }

        match self.helpers.entry(uuid) {
            Entry::Occupied(entry) => {
                let existing = entry.get().type_info();
                if existing.type_id() == info.type_id() {
                    Ok(false)
                } else {
                    Err(RegistryError::UuidCollision {
                        uuid,
                        existing: existing.name(),
                        new: info.name(),
                    })
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(helper);
                self.add_name_index(info.name(), uuid);
                log::debug!("registered type `{}` {uuid} ({})", info.name(), helper.kind());
                Ok(true)
            }
        }
    }

    /// Registers `T` and, the first time, its declared bases.
    ///
    /// Returns `Ok(false)` if `T` was already registered.
    pub fn try_register<T: Rtti>(&mut self) -> Result<bool, RegistryError> {
        let inserted = self.try_insert_helper(T::rtti_helper())?;
        if inserted {
            T::rtti_register_bases(self);
        }
        Ok(inserted)
    }

    /// Registers `T` and its declared bases.
    ///
    /// A uuid collision is logged and the type is skipped, see
    /// [`try_register`](Self::try_register) to handle it.
    pub fn register<T: Rtti>(&mut self) {
        if let Err(err) = self.try_register::<T>() {
            log::warn!("{err}");
        }
    }

    /// Registers the referenced type.
    #[inline]
    pub fn register_by_val<T: Rtti>(&mut self, _: &T) {
        self.register::<T>();
    }

    /// Registers every non-generic type declared with `#[rtti(auto_register)]`.
    ///
    /// Repeated calls are cheap. Returns `true` if automatic registration is
    /// supported on the current platform; always `false` without the
    /// `auto_register` feature.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vc_rtti::{Typed, derive::Rtti, registry::TypeRegistry};
    ///
    /// #[derive(Rtti)]
    /// #[rtti(uuid = "{4A8E1C6D-B3F0-4972-9D5A-E7C2B0F81634}", auto_register)]
    /// struct Light;
    ///
    /// let mut registry = TypeRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(Light::type_uuid()));
    /// ```
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        use crate::Typed;
        use crate::__macro_exports::auto_register::{__AvailFlag, __register_types};

        // Reduce the cost of duplicate registrations.
        if self.contains(__AvailFlag::type_uuid()) {
            return true;
        }
        __register_types(self);
        self.contains(__AvailFlag::type_uuid())
    }

    /// Always `false`, the `auto_register` feature is disabled.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, uuid: TypeUuid) -> bool {
        self.helpers.contains_key(&uuid)
    }

    /// Returns the helper of the type with the given uuid.
    #[inline]
    pub fn get(&self, uuid: TypeUuid) -> Option<&'static dyn RttiHelper> {
        self.helpers.get(&uuid).copied()
    }

    #[inline]
    pub fn get_type_info(&self, uuid: TypeUuid) -> Option<&'static TypeInfo> {
        self.get(uuid).map(RttiHelper::type_info)
    }

    /// Returns the helper of the type with the given [name].
    ///
    /// Returns `None` if the name is ambiguous or unknown.
    ///
    /// [name]: crate::Typed::type_name
    pub fn get_with_name(&self, name: &str) -> Option<&'static dyn RttiHelper> {
        match self.name_to_uuid.get(name) {
            Some(uuid) => self.get(*uuid),
            None => None,
        }
    }

    /// Returns `true` if several registered types share the given name.
    #[inline]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous_names.contains(name)
    }

    /// Returns `true` if the type `uuid` is registered and is, or derives from, `base`.
    pub fn is_type_of(&self, uuid: TypeUuid, base: TypeUuid) -> bool {
        self.get(uuid).is_some_and(|helper| helper.is_type_of(base))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Iterates over the registered helpers, in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static dyn RttiHelper> + '_ {
        self.helpers.values().copied()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.helpers.values().map(|helper| helper.type_name()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shared [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&*self.read(), f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{TypeRegistry, TypeRegistryArc};
    use crate::derive::{Rtti, TypeInfo};
    use crate::registry::RegistryError;
    use crate::{RttiKind, TypeUuid, Typed};
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::thread;

    mod first {
        use crate::derive::Rtti;

        #[derive(Rtti)]
        #[rtti(uuid = "{5F2A9C81-E7D3-4B06-A4C8-1D9E3B6F0A72}")]
        pub struct Shared;
    }

    mod second {
        use crate::derive::TypeInfo;

        #[derive(TypeInfo)]
        #[rtti(uuid = "{C1E7B4A0-3F96-4D28-8B5C-7A0D2E9F6B13}")]
        pub struct Shared;

        // Same uuid as `first::Shared`.
        #[derive(TypeInfo)]
        #[rtti(uuid = "{5F2A9C81-E7D3-4B06-A4C8-1D9E3B6F0A72}")]
        pub struct Impostor;
    }

    #[derive(Rtti)]
    #[rtti(uuid = "{8E4D1B67-2A9F-4C35-B0E6-D3F7A1C5942B}")]
    struct Shape;

    #[derive(Rtti)]
    #[rtti(uuid = "{3B9F6E20-D4A1-4785-9C3E-0F8B2D6A71C4}")]
    struct Circle {
        #[rtti(base)]
        shape: Shape,
        radius: f32,
    }

    #[derive(TypeInfo)]
    #[rtti(uuid = "00000000-0000-0000-0000-000000000000")]
    struct Nameless;

    #[test]
    fn builtin_types() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(i32::type_uuid()));
        assert!(registry.contains(String::type_uuid()));
        assert_eq!(registry.get_with_name("f64").unwrap().type_uuid(), f64::type_uuid());
        assert_eq!(registry.len(), 17);
        assert!(registry.iter().all(|helper| helper.kind() == RttiKind::TypeInfoOnly));
    }

    #[test]
    fn register_with_bases() {
        let mut registry = TypeRegistry::empty();
        assert_eq!(registry.try_register::<Circle>(), Ok(true));
        assert_eq!(registry.try_register::<Circle>(), Ok(false));
        assert_eq!(registry.len(), 2);

        assert!(registry.is_type_of(Circle::type_uuid(), Shape::type_uuid()));
        assert!(!registry.is_type_of(Shape::type_uuid(), Circle::type_uuid()));
        assert!(!registry.is_type_of(TypeUuid::from_u128(1), Shape::type_uuid()));

        let info = registry.get_type_info(Circle::type_uuid()).unwrap();
        assert!(info.is::<Circle>());

        let names: Vec<&str> = {
            let mut names: Vec<_> = registry.iter().map(|helper| helper.type_name()).collect();
            names.sort_unstable();
            names
        };
        assert_eq!(names, ["Circle", "Shape"]);
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = TypeRegistry::empty();
        registry.register::<first::Shared>();
        assert!(registry.get_with_name("Shared").is_some());
        registry.register::<second::Shared>();
        assert!(registry.is_ambiguous("Shared"));
        assert!(registry.get_with_name("Shared").is_none());
        assert!(registry.get(second::Shared::type_uuid()).is_some());
    }

    #[test]
    fn uuid_collision() {
        let mut registry = TypeRegistry::empty();
        registry.register::<first::Shared>();
        let err = registry.try_register::<second::Impostor>().unwrap_err();
        assert_eq!(
            err,
            RegistryError::UuidCollision {
                uuid: first::Shared::type_uuid(),
                existing: "Shared",
                new: "Impostor",
            }
        );

        // The first registration stays.
        registry.register::<second::Impostor>();
        let helper = registry.get(first::Shared::type_uuid()).unwrap();
        assert!(helper.type_info().is::<first::Shared>());
    }

    #[test]
    fn null_uuid() {
        let mut registry = TypeRegistry::empty();
        assert_eq!(
            registry.try_register::<Nameless>(),
            Err(RegistryError::NullUuid { name: "Nameless" })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn shared_registry() {
        let shared = TypeRegistryArc::default();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.write().register::<Circle>())
            })
            .collect();
        handles.into_iter().for_each(|h| h.join().unwrap());

        let registry = shared.read();
        assert!(registry.contains(Circle::type_uuid()));
        assert!(registry.contains(Shape::type_uuid()));
    }

    #[cfg(feature = "auto_register")]
    mod auto {
        use crate::derive::Rtti;
        use crate::registry::TypeRegistry;
        use crate::Typed;

        #[derive(Rtti)]
        #[rtti(uuid = "{B2F8A614-9E0C-4D73-A1B5-6C3E8F2D0947}", auto_register)]
        struct Collected;

        #[test]
        fn collects_marked_types() {
            let mut registry = TypeRegistry::empty();
            if registry.auto_register() {
                assert!(registry.contains(Collected::type_uuid()));
                assert!(registry.auto_register());
            }
        }
    }
}
