//! Items used by the code generated in `vc_rtti_derive`.

/// Helpers for composing the names of generic instantiations.
pub mod macro_utils {
    pub use crate::impls::concat;
    pub use alloc::string::ToString;
}

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::Rtti;
    use crate::derive::TypeInfo;
    use crate::registry::TypeRegistry;

    pub use inventory;

    /// A registration function collected by `inventory`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: Rtti> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered together with the collected types. If it is missing after
    /// [`__register_types`], `inventory` does not work on this platform.
    #[derive(TypeInfo)]
    #[rtti(uuid = "{6E0B3F92-A1D8-4C57-B4E6-29F7C8D01A35}", auto_register)]
    pub struct __AvailFlag;

    pub fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }

        #[cfg(all(debug_assertions, feature = "debug"))]
        log::trace!(
            "auto registration visited {} types, {} registered in total",
            inventory::iter::<__AutoRegisterFunc>.into_iter().count(),
            registry.len(),
        );
    }
}
