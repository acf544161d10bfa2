use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn typed_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn type_uuid_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::TypeUuid
    }
}

#[inline(always)]
pub(crate) fn type_traits_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::TypeTraits
    }
}
