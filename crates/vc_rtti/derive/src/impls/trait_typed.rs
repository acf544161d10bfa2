use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::RttiMeta;

/// Generate implementation code for `Typed`.
///
/// Expects `__TYPE_UUID` in scope, see [`RttiMeta::uuid_const_tokens`].
pub(crate) fn impl_trait_typed(meta: &RttiMeta) -> TokenStream {
    let vc_rtti_path = meta.vc_rtti_path();
    let typed_ = crate::path::typed_(vc_rtti_path);
    let type_info_ = crate::path::type_info_(vc_rtti_path);
    let type_uuid_ = crate::path::type_uuid_(vc_rtti_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(vc_rtti_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(#type_info_::of::<Self>)
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(vc_rtti_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(#type_info_::of::<Self>)
        }
    };

    let type_uuid_tokens = meta.type_uuid_tokens();
    let type_name_tokens = meta.type_name_tokens();
    let template_and_traits = meta.template_and_traits_tokens();

    let self_ty = meta.self_ty();
    let (impl_generics, where_clause) = meta.split_generics(&[]);

    quote! {
        impl #impl_generics #typed_ for #self_ty #where_clause {
            fn type_uuid() -> #type_uuid_ {
                #type_uuid_tokens
            }

            fn type_name() -> &'static str {
                #type_name_tokens
            }

            #template_and_traits

            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
