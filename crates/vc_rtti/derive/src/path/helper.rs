use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn rtti_helper_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::RttiHelper
    }
}

#[inline(always)]
pub(crate) fn intrusive_helper_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::helper::IntrusiveRttiHelper
    }
}

#[inline(always)]
pub(crate) fn type_info_only_helper_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::helper::TypeInfoOnlyRttiHelper
    }
}

#[inline(always)]
pub(crate) fn external_helper_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::helper::ExternalRttiHelper
    }
}

#[inline(always)]
pub(crate) fn external_base_(vc_rtti_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_rtti_path::helper::ExternalBase
    }
}
