use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::{Expr, GenericParam, Generics, LitStr, Member, Path, Token, Type, WherePredicate};
use syn::parse_quote;

use super::TypeAttributes;

// -----------------------------------------------------------------------------
// TypeArg

/// A generic argument taking part in the identity of an instantiation.
pub(crate) enum TypeArg {
    /// Contributes `<T as Typed>::type_uuid()`.
    Type(Type),
    /// Contributes the uuid of its value, read as a `u64`.
    Const(Expr),
}

// -----------------------------------------------------------------------------
// BaseDef

/// A declared base.
pub(crate) struct BaseDef {
    pub ty: Type,
    /// Field access from `Self`, e.g. `inner.frame`.
    ///
    /// `None` for external declarations whose `BaseOf` impl is written by hand.
    pub member: Option<Punctuated<Member, Token![.]>>,
}

impl BaseDef {
    /// Tokens of `self.a.b`.
    pub fn access_tokens(&self) -> Option<TokenStream> {
        let member = self.member.as_ref()?;
        let members = member.iter();
        Some(quote! { self.#(#members).* })
    }
}

// -----------------------------------------------------------------------------
// RttiMeta

/// Everything needed to implement `Typed`, shared by derives and function-like macros.
pub(crate) struct RttiMeta {
    vc_rtti_path: Path,
    self_ty: TokenStream,
    generics: Generics,
    name: String,
    uuid: LitStr,
    args: Vec<TypeArg>,
    attrs: TypeAttributes,
    is_enum: bool,
}

impl core::fmt::Debug for RttiMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RttiMeta")
            .field("vc_rtti_path", &self.vc_rtti_path.to_token_stream())
            .field("self_ty", &self.self_ty)
            .field("name", &self.name)
            .field("uuid", &self.uuid.value())
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl RttiMeta {
    /// `span` is used for errors about the declaration as a whole.
    pub fn new(
        self_ty: TokenStream,
        generics: Generics,
        ident: String,
        args: Vec<TypeArg>,
        mut attrs: TypeAttributes,
        is_enum: bool,
        span: Span,
    ) -> syn::Result<Self> {
        if let Some(lifetime) = generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "types with lifetime parameters cannot be declared, type identity requires `'static`",
            ));
        }

        let uuid = attrs.require_uuid(span)?;
        let name = attrs.name.as_ref().map(LitStr::value).unwrap_or(ident);

        let vc_rtti_path = crate::path::vc_rtti();
        let typed_ = crate::path::typed_(&vc_rtti_path);

        let mut generics = generics;
        let bounds: Vec<WherePredicate> = generics
            .type_params()
            .map(|param| {
                let ident = &param.ident;
                parse_quote! { #ident: #typed_ }
            })
            .collect();
        generics.make_where_clause().predicates.extend(bounds);

        Ok(Self {
            vc_rtti_path,
            self_ty,
            generics,
            name,
            uuid,
            args,
            attrs,
            is_enum,
        })
    }

    /// Arguments of a derived type: every type and const parameter, in order.
    pub fn args_of_params(generics: &Generics) -> Vec<TypeArg> {
        generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Lifetime(_) => None,
                GenericParam::Type(param) => {
                    let ident = &param.ident;
                    Some(TypeArg::Type(parse_quote! { #ident }))
                }
                GenericParam::Const(param) => {
                    let ident = &param.ident;
                    Some(TypeArg::Const(parse_quote! { #ident }))
                }
            })
            .collect()
    }

    #[inline]
    pub fn vc_rtti_path(&self) -> &Path {
        &self.vc_rtti_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn self_ty(&self) -> &TokenStream {
        &self.self_ty
    }

    /// The impl has generic parameters, per-type values go through `TypeId` keyed cells.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// The type is an instantiation of a template.
    #[inline]
    pub fn has_template(&self) -> bool {
        !self.args.is_empty()
    }

    /// Returns `(impl_generics, where_clause)` with the `Typed` bounds and `extra`.
    pub fn split_generics(&self, extra: &[WherePredicate]) -> (TokenStream, TokenStream) {
        let mut generics = self.generics.clone();
        generics
            .make_where_clause()
            .predicates
            .extend(extra.iter().cloned());
        let (impl_generics, _, where_clause) = generics.split_for_impl();
        (
            impl_generics.to_token_stream(),
            where_clause.to_token_stream(),
        )
    }

    /// The uuid literal as a constant item named `__TYPE_UUID`.
    ///
    /// A constant item is always evaluated, so a malformed literal fails the build
    /// even if the type is never queried.
    pub fn uuid_const_tokens(&self) -> TokenStream {
        let type_uuid_ = crate::path::type_uuid_(&self.vc_rtti_path);
        let uuid = &self.uuid;
        quote! {
            const __TYPE_UUID: #type_uuid_ = #type_uuid_::parse(#uuid);
        }
    }

    /// Body of `Typed::type_uuid`.
    pub fn type_uuid_tokens(&self) -> TokenStream {
        if !self.has_template() {
            return quote! { __TYPE_UUID };
        }

        let vc_rtti_path = &self.vc_rtti_path;
        let type_uuid_ = crate::path::type_uuid_(vc_rtti_path);
        let typed_ = crate::path::typed_(vc_rtti_path);
        let uuid_cell_ = crate::path::generic_type_uuid_cell_(vc_rtti_path);

        let args = self.args.iter().map(|arg| match arg {
            TypeArg::Type(ty) => quote! {
                <#ty as #typed_>::type_uuid()
            },
            TypeArg::Const(expr) => quote! {
                #type_uuid_::from_data(&((#expr) as u64).to_le_bytes())
            },
        });

        quote! {
            static CELL: #uuid_cell_ = #uuid_cell_::new();
            *CELL.get_or_insert::<Self>(|| {
                __TYPE_UUID + #type_uuid_::aggregate(&[ #(#args),* ])
            })
        }
    }

    /// Body of `Typed::type_name`.
    pub fn type_name_tokens(&self) -> TokenStream {
        let name = &self.name;
        if !self.has_template() {
            return quote! { #name };
        }

        let vc_rtti_path = &self.vc_rtti_path;
        let typed_ = crate::path::typed_(vc_rtti_path);
        let name_cell_ = crate::path::generic_type_name_cell_(vc_rtti_path);
        let macro_utils_ = crate::path::macro_utils_(vc_rtti_path);

        let mut parts = vec![quote! { #name }, quote! { "<" }];
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                parts.push(quote! { ", " });
            }
            parts.push(match arg {
                TypeArg::Type(ty) => quote! {
                    <#ty as #typed_>::type_name()
                },
                TypeArg::Const(expr) => quote! {
                    #macro_utils_::ToString::to_string(&(#expr)).as_str()
                },
            });
        }
        parts.push(quote! { ">" });

        quote! {
            static CELL: #name_cell_ = #name_cell_::new();
            CELL.get_or_insert::<Self>(|| {
                #macro_utils_::concat(&[ #(#parts),* ])
            })
        }
    }

    /// `template_uuid` and `type_traits` overrides, empty when the defaults apply.
    pub fn template_and_traits_tokens(&self) -> TokenStream {
        let vc_rtti_path = &self.vc_rtti_path;
        let type_uuid_ = crate::path::type_uuid_(vc_rtti_path);
        let type_traits_ = crate::path::type_traits_(vc_rtti_path);

        let mut flags = Vec::new();
        if self.has_template() {
            flags.push(quote! { IS_TEMPLATE });
        }
        if self.attrs.is_abstract.is_some() {
            flags.push(quote! { IS_ABSTRACT });
        }
        if self.is_enum {
            flags.push(quote! { IS_ENUM });
        }

        let template = self.has_template().then(|| {
            quote! {
                #[inline]
                fn template_uuid() -> #type_uuid_ {
                    __TYPE_UUID
                }
            }
        });

        let traits = (!flags.is_empty()).then(|| {
            quote! {
                #[inline]
                fn type_traits() -> #type_traits_ {
                    #type_traits_::empty() #( .union(#type_traits_::#flags) )*
                }
            }
        });

        quote! {
            #template
            #traits
        }
    }
}
