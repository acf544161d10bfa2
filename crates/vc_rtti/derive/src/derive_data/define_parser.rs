use proc_macro2::Span;
use quote::ToTokens;
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::{GenericArgument, GenericParam, Generics, LitStr, Member, Path, PathArguments};
use syn::{Token, Type, TypePath, bracketed, parenthesized, token};

use super::{BaseDef, RttiMeta, TypeArg, TypeAttributes};

// -----------------------------------------------------------------------------
// Common parts

/// Format: `[T: Bound, const N: usize]`, optional.
fn parse_generic_params(input: ParseStream) -> syn::Result<Generics> {
    if !input.peek(token::Bracket) {
        return Ok(Generics::default());
    }

    let content;
    bracketed!(content in input);
    let params = Punctuated::<GenericParam, Token![,]>::parse_terminated(&content)?;
    if params.is_empty() {
        return Ok(Generics::default());
    }

    Ok(Generics {
        lt_token: Some(Default::default()),
        params,
        gt_token: Some(Default::default()),
        where_clause: None,
    })
}

/// Splits the angle bracketed arguments of the last segment of `path`.
///
/// An argument naming a const parameter of `generics` is a value, not a type.
fn parse_type_args(path: &Path, generics: &Generics) -> syn::Result<Vec<TypeArg>> {
    let Some(last) = path.segments.last() else {
        return Err(syn::Error::new_spanned(path, "expected a type path"));
    };
    let args = match &last.arguments {
        PathArguments::None => return Ok(Vec::new()),
        PathArguments::AngleBracketed(args) => &args.args,
        PathArguments::Parenthesized(args) => {
            return Err(syn::Error::new_spanned(args, "expected angle bracketed arguments"));
        }
    };

    let is_const_param = |ty: &Type| match ty {
        Type::Path(TypePath { qself: None, path }) => path.get_ident().is_some_and(|ident| {
            generics.const_params().any(|param| param.ident == *ident)
        }),
        _ => false,
    };

    args.iter()
        .map(|arg| match arg {
            GenericArgument::Type(ty) if is_const_param(ty) => {
                Ok(TypeArg::Const(syn::parse2(ty.to_token_stream())?))
            }
            GenericArgument::Type(ty) => Ok(TypeArg::Type(ty.clone())),
            GenericArgument::Const(expr) => Ok(TypeArg::Const(expr.clone())),
            GenericArgument::Lifetime(lifetime) => Err(syn::Error::new_spanned(
                lifetime,
                "types with lifetime parameters cannot be declared, type identity requires `'static`",
            )),
            other => Err(syn::Error::new_spanned(other, "unsupported generic argument")),
        })
        .collect()
}

/// Format: `[params] path::Type<Args>, "{uuid}"`.
fn parse_declaration(input: ParseStream) -> syn::Result<RttiMeta> {
    let span = input.span();
    let generics = parse_generic_params(input)?;
    let path: Path = input.parse()?;
    input.parse::<Token![,]>()?;
    let uuid: LitStr = input.parse()?;

    let Some(ident) = path.segments.last().map(|segment| segment.ident.to_string()) else {
        return Err(syn::Error::new(span, "expected a type path"));
    };
    let args = parse_type_args(&path, &generics)?;

    let attrs = TypeAttributes {
        uuid: Some(uuid),
        ..Default::default()
    };

    RttiMeta::new(
        path.to_token_stream(),
        generics,
        ident,
        args,
        attrs,
        false,
        Span::call_site(),
    )
}

// -----------------------------------------------------------------------------
// impl_type_info

pub(crate) struct ImplTypeInfoParser {
    pub meta: RttiMeta,
}

impl ImplTypeInfoParser {
    /// Parse the input stream of [`impl_type_info`](crate::impl_type_info).
    ///
    /// Format: `[params] path::Type<Args>, "{uuid}"`
    pub fn parse(input: ParseStream) -> syn::Result<Self> {
        let meta = parse_declaration(input)?;
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("unexpected tokens after the uuid"));
        }
        Ok(Self { meta })
    }
}

// -----------------------------------------------------------------------------
// impl_external_rtti

pub(crate) struct ImplExternalRttiParser {
    pub meta: RttiMeta,
    pub bases: Vec<BaseDef>,
}

impl ImplExternalRttiParser {
    /// Parse the input stream of [`impl_external_rtti`](crate::impl_external_rtti).
    ///
    /// Format: `[params] path::Type<Args>, "{uuid}" (, Base (field.path)? )* ,?`
    pub fn parse(input: ParseStream) -> syn::Result<Self> {
        let meta = parse_declaration(input)?;

        let mut bases = Vec::new();
        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            bases.push(Self::parse_base(input)?);
        }
        if !input.is_empty() {
            return Err(input.error("expected `,` or the end of the declaration"));
        }

        Ok(Self { meta, bases })
    }

    /// Format: `path::Base<Args>` or `path::Base<Args>(field.path)`
    fn parse_base(input: ParseStream) -> syn::Result<BaseDef> {
        let path: Path = input.parse()?;
        let ty = Type::Path(TypePath { qself: None, path });

        let member = if input.peek(token::Paren) {
            let content;
            parenthesized!(content in input);
            let member = Punctuated::<Member, Token![.]>::parse_separated_nonempty(&content)?;
            if !content.is_empty() {
                return Err(content.error("expected a field path such as `inner.base`"));
            }
            Some(member)
        } else {
            None
        };

        Ok(BaseDef { ty, member })
    }
}
