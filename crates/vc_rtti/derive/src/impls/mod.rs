// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_external;
mod trait_rtti;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use trait_external::impl_trait_external_rtti;
pub(crate) use trait_rtti::{impl_trait_intrusive_rtti, impl_trait_type_info_only_rtti};
pub(crate) use trait_typed::impl_trait_typed;
