use quote::quote_spanned;

use crate::derive_data::RttiMeta;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &RttiMeta) -> proc_macro2::TokenStream {
    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };
    // Invalid for generic types.
    if meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let auto_register_ = crate::path::auto_register_(meta.vc_rtti_path());
    let self_ty = meta.self_ty();

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                <#self_ty as #auto_register_::__RegisterType>::__register
            )
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &RttiMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
