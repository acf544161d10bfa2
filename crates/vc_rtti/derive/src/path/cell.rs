use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::impls::GenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_name_cell_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::impls::GenericTypeNameCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_uuid_cell_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::impls::GenericTypeUuidCell
    }
}

#[inline(always)]
pub(crate) fn non_generic_external_cell_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::impls::NonGenericExternalCell
    }
}

#[inline(always)]
pub(crate) fn generic_external_cell_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::impls::GenericExternalCell
    }
}
