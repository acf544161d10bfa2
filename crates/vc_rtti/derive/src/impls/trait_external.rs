use proc_macro2::TokenStream;
use quote::quote;
use syn::{WherePredicate, parse_quote};

use crate::derive_data::{BaseDef, RttiMeta};

/// Generate `Rtti` for `impl_external_rtti!`, plus `BaseOf` for bases given with a field path.
///
/// The queries go through an `ExternalRttiHelper` built on first use, which
/// holds the helper and upcast functions of each base.
pub(crate) fn impl_trait_external_rtti(meta: &RttiMeta, bases: &[BaseDef]) -> TokenStream {
    let vc_rtti_path = meta.vc_rtti_path();
    let rtti_ = crate::path::rtti_(vc_rtti_path);
    let rtti_kind_ = crate::path::rtti_kind_(vc_rtti_path);
    let rtti_helper_ = crate::path::rtti_helper_(vc_rtti_path);
    let type_uuid_ = crate::path::type_uuid_(vc_rtti_path);
    let typed_ = crate::path::typed_(vc_rtti_path);
    let registry_ = crate::path::type_registry_(vc_rtti_path);
    let base_of_ = crate::path::base_of_(vc_rtti_path);
    let external_helper_ = crate::path::external_helper_(vc_rtti_path);
    let external_base_ = crate::path::external_base_(vc_rtti_path);
    let option_ = crate::path::option_();
    let any_ = crate::path::any_();

    let base_tys: Vec<_> = bases.iter().map(|base| &base.ty).collect();

    let bounds: Vec<WherePredicate> = base_tys
        .iter()
        .map(|ty| parse_quote! { #ty: #rtti_ })
        .collect();

    let self_ty = meta.self_ty();
    let (impl_generics, where_clause) = meta.split_generics(&bounds);

    let new_helper = quote! {
        #external_helper_::new(
            <Self as #typed_>::type_info(),
            &[ #( #external_base_::new::<Self, #base_tys>() ),* ],
        )
    };

    let helper_cell_tokens = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_external_cell_(vc_rtti_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| #new_helper)
        }
    } else {
        let cell_ = crate::path::non_generic_external_cell_(vc_rtti_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| #new_helper)
        }
    };

    let registry_param = if bases.is_empty() {
        quote! { _registry }
    } else {
        quote! { registry }
    };

    let base_of_impls = bases.iter().filter_map(|base| {
        let ty = &base.ty;
        let access = base.access_tokens()?;
        Some(quote! {
            impl #impl_generics #base_of_<#ty> for #self_ty #where_clause {
                #[inline]
                fn as_base(&self) -> &#ty {
                    &#access
                }

                #[inline]
                fn as_base_mut(&mut self) -> &mut #ty {
                    &mut #access
                }
            }
        })
    });

    quote! {
        impl #impl_generics #rtti_ for #self_ty #where_clause {
            const KIND: #rtti_kind_ = #rtti_kind_::External;

            #[inline]
            fn rtti_contains_type(uuid: #type_uuid_) -> bool {
                <Self as #rtti_>::rtti_helper().is_type_of(uuid)
            }

            #[inline]
            fn rtti_enum_hierarchy(visitor: &mut dyn FnMut(#type_uuid_)) {
                <Self as #rtti_>::rtti_helper().enum_hierarchy(visitor);
            }

            #[inline]
            fn rtti_subobject(&self, uuid: #type_uuid_) -> #option_<&dyn #any_> {
                <Self as #rtti_>::rtti_helper().cast(self, uuid)
            }

            #[inline]
            fn rtti_subobject_mut(&mut self, uuid: #type_uuid_) -> #option_<&mut dyn #any_> {
                <Self as #rtti_>::rtti_helper().cast_mut(self, uuid)
            }

            fn rtti_helper() -> &'static dyn #rtti_helper_ {
                #helper_cell_tokens
            }

            fn rtti_register_bases(#registry_param: &mut #registry_) {
                #( #registry_param.register::<#base_tys>(); )*
            }
        }

        #( #base_of_impls )*
    }
}
