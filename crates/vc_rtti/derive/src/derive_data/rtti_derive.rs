use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Member};

use super::{BaseDef, FieldAttributes, RttiMeta, TypeAttributes};

/// A parsed `#[derive(TypeInfo)]` or `#[derive(Rtti)]` input.
pub(crate) struct RttiDerive {
    pub meta: RttiMeta,
    pub bases: Vec<BaseDef>,
}

impl RttiDerive {
    /// Parses the type and its `#[rtti(base)]` fields.
    ///
    /// Bases are only accepted when `with_bases` is set, i.e. for `#[derive(Rtti)]`.
    pub fn from_derive_input(ast: &DeriveInput, with_bases: bool) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let bases = match &ast.data {
            Data::Struct(data) => Self::parse_bases(&data.fields, with_bases)?,
            Data::Enum(data) => {
                for variant in &data.variants {
                    Self::reject_bases(&variant.fields, "bases are only supported on struct fields")?;
                }
                Vec::new()
            }
            Data::Union(data) => {
                let fields = Fields::Named(data.fields.clone());
                Self::reject_bases(&fields, "bases are only supported on struct fields")?;
                Vec::new()
            }
        };

        let ident = &ast.ident;
        let (_, ty_generics, _) = ast.generics.split_for_impl();

        let meta = RttiMeta::new(
            quote! { #ident #ty_generics },
            ast.generics.clone(),
            ident.to_string(),
            RttiMeta::args_of_params(&ast.generics),
            attrs,
            matches!(ast.data, Data::Enum(_)),
            ident.span(),
        )?;

        Ok(Self { meta, bases })
    }

    fn parse_bases(fields: &Fields, with_bases: bool) -> syn::Result<Vec<BaseDef>> {
        if !with_bases {
            Self::reject_bases(fields, "`#[rtti(base)]` requires `#[derive(Rtti)]`")?;
            return Ok(Vec::new());
        }

        let mut bases = Vec::new();
        for (index, field) in fields.iter().enumerate() {
            if FieldAttributes::parse_attrs(&field.attrs)?.base.is_none() {
                continue;
            }
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(syn::Index {
                    index: index as u32,
                    span: field.ty.span(),
                }),
            };
            bases.push(BaseDef {
                ty: field.ty.clone(),
                member: Some(Punctuated::from_iter([member])),
            });
        }
        Ok(bases)
    }

    fn reject_bases(fields: &Fields, message: &str) -> syn::Result<()> {
        for field in fields {
            if let Some(span) = FieldAttributes::parse_attrs(&field.attrs)?.base {
                return Err(syn::Error::new(span, message));
            }
        }
        Ok(())
    }
}
