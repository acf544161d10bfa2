//! Paths of the `vc_rtti` items referenced by the generated code.
//!
//! Kept in one place so a change of the `vc_rtti` layout only touches this module.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_rtti` crate.
///
/// 1. For crates that depend on `vc_rtti`, `::vc_rtti` is returned.
/// 2. For crates that depend on `voidcraft_rtti`, `::voidcraft_rtti::rtti` is returned.
/// 3. For other situations, `::vc_rtti` is returned, but this may be incorrect.
///
/// This reads the caller's `Cargo.toml`, so it is called once per macro
/// invocation and the result is passed around.
pub(crate) fn vc_rtti() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_rtti"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod helper;
mod info;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use helper::*;
pub(crate) use info::*;

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn macro_utils_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::__macro_exports::macro_utils
    }
}

#[inline(always)]
pub(crate) fn rtti_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::Rtti
    }
}

#[inline(always)]
pub(crate) fn rtti_kind_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::RttiKind
    }
}

#[inline(always)]
pub(crate) fn base_of_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::BaseOf
    }
}

#[inline(always)]
pub(crate) fn type_registry_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::registry::TypeRegistry
    }
}

#[inline(always)]
pub(crate) fn any_() -> TokenStream {
    quote! {
        ::core::any::Any
    }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! {
        ::core::option::Option
    }
}
