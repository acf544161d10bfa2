use bitflags::bitflags;

bitflags! {
    /// Properties of a declared type.
    ///
    /// Set by the declaration macros and the built-in impls, queried through
    /// [`Typed::type_traits`](crate::Typed::type_traits) or a helper.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeTraits: u8 {
        /// Raw or non-null pointer. Shares the uuid of its pointee.
        const IS_POINTER    = 1 << 0;
        /// Declared `#[rtti(abstract)]`, never the runtime type of an object.
        const IS_ABSTRACT   = 1 << 1;
        /// Instantiation of a generic type, has a template uuid.
        const IS_TEMPLATE   = 1 << 2;
        const IS_SIGNED     = 1 << 3;
        const IS_UNSIGNED   = 1 << 4;
        const IS_ENUM       = 1 << 5;
    }
}
