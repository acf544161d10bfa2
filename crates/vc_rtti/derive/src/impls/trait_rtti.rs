use proc_macro2::TokenStream;
use quote::quote;
use syn::{WherePredicate, parse_quote};

use crate::derive_data::{BaseDef, RttiMeta};

/// Generate `Rtti` for `#[derive(TypeInfo)]` and `impl_type_info!`: the type only matches itself.
pub(crate) fn impl_trait_type_info_only_rtti(meta: &RttiMeta) -> TokenStream {
    let vc_rtti_path = meta.vc_rtti_path();
    let rtti_ = crate::path::rtti_(vc_rtti_path);
    let rtti_kind_ = crate::path::rtti_kind_(vc_rtti_path);
    let rtti_helper_ = crate::path::rtti_helper_(vc_rtti_path);
    let type_uuid_ = crate::path::type_uuid_(vc_rtti_path);
    let typed_ = crate::path::typed_(vc_rtti_path);
    let helper_ = crate::path::type_info_only_helper_(vc_rtti_path);
    let option_ = crate::path::option_();
    let any_ = crate::path::any_();

    let self_ty = meta.self_ty();
    let (impl_generics, where_clause) = meta.split_generics(&[]);

    quote! {
        impl #impl_generics #rtti_ for #self_ty #where_clause {
            const KIND: #rtti_kind_ = #rtti_kind_::TypeInfoOnly;

            #[inline]
            fn rtti_contains_type(uuid: #type_uuid_) -> bool {
                uuid == <Self as #typed_>::type_uuid()
            }

            #[inline]
            fn rtti_enum_hierarchy(visitor: &mut dyn FnMut(#type_uuid_)) {
                visitor(<Self as #typed_>::type_uuid());
            }

            #[inline]
            fn rtti_subobject(&self, uuid: #type_uuid_) -> #option_<&dyn #any_> {
                if uuid == <Self as #typed_>::type_uuid() {
                    #option_::Some(self as &dyn #any_)
                } else {
                    #option_::None
                }
            }

            #[inline]
            fn rtti_subobject_mut(&mut self, uuid: #type_uuid_) -> #option_<&mut dyn #any_> {
                if uuid == <Self as #typed_>::type_uuid() {
                    #option_::Some(self as &mut dyn #any_)
                } else {
                    #option_::None
                }
            }

            #[inline]
            fn rtti_helper() -> &'static dyn #rtti_helper_ {
                #helper_::<Self>::INSTANCE
            }
        }
    }
}

/// Generate `Rtti` for `#[derive(Rtti)]`.
///
/// Self is checked first, then each base in declaration order. Every base
/// answers through its own `Rtti` impl, so the whole hierarchy is walked.
pub(crate) fn impl_trait_intrusive_rtti(meta: &RttiMeta, bases: &[BaseDef]) -> TokenStream {
    let vc_rtti_path = meta.vc_rtti_path();
    let rtti_ = crate::path::rtti_(vc_rtti_path);
    let rtti_kind_ = crate::path::rtti_kind_(vc_rtti_path);
    let rtti_helper_ = crate::path::rtti_helper_(vc_rtti_path);
    let type_uuid_ = crate::path::type_uuid_(vc_rtti_path);
    let typed_ = crate::path::typed_(vc_rtti_path);
    let registry_ = crate::path::type_registry_(vc_rtti_path);
    let helper_ = crate::path::intrusive_helper_(vc_rtti_path);
    let option_ = crate::path::option_();
    let any_ = crate::path::any_();

    let base_tys: Vec<_> = bases.iter().map(|base| &base.ty).collect();
    let base_access: Vec<_> = bases.iter().filter_map(BaseDef::access_tokens).collect();

    let bounds: Vec<WherePredicate> = base_tys
        .iter()
        .map(|ty| parse_quote! { #ty: #rtti_ })
        .collect();

    let self_ty = meta.self_ty();
    let (impl_generics, where_clause) = meta.split_generics(&bounds);

    let registry_param = if bases.is_empty() {
        quote! { _registry }
    } else {
        quote! { registry }
    };

    quote! {
        impl #impl_generics #rtti_ for #self_ty #where_clause {
            const KIND: #rtti_kind_ = #rtti_kind_::Intrusive;

            fn rtti_contains_type(uuid: #type_uuid_) -> bool {
                uuid == <Self as #typed_>::type_uuid()
                    #( || <#base_tys as #rtti_>::rtti_contains_type(uuid) )*
            }

            fn rtti_enum_hierarchy(visitor: &mut dyn FnMut(#type_uuid_)) {
                visitor(<Self as #typed_>::type_uuid());
                #( <#base_tys as #rtti_>::rtti_enum_hierarchy(visitor); )*
            }

            fn rtti_subobject(&self, uuid: #type_uuid_) -> #option_<&dyn #any_> {
                if uuid == <Self as #typed_>::type_uuid() {
                    return #option_::Some(self as &dyn #any_);
                }
                #(
                    if <#base_tys as #rtti_>::rtti_contains_type(uuid) {
                        return <#base_tys as #rtti_>::rtti_subobject(&#base_access, uuid);
                    }
                )*
                #option_::None
            }

            fn rtti_subobject_mut(&mut self, uuid: #type_uuid_) -> #option_<&mut dyn #any_> {
                if uuid == <Self as #typed_>::type_uuid() {
                    return #option_::Some(self as &mut dyn #any_);
                }
                #(
                    if <#base_tys as #rtti_>::rtti_contains_type(uuid) {
                        return <#base_tys as #rtti_>::rtti_subobject_mut(&mut #base_access, uuid);
                    }
                )*
                #option_::None
            }

            #[inline]
            fn rtti_helper() -> &'static dyn #rtti_helper_ {
                #helper_::<Self>::INSTANCE
            }

            fn rtti_register_bases(#registry_param: &mut #registry_) {
                #( #registry_param.register::<#base_tys>(); )*
            }
        }
    }
}
