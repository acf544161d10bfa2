//! `#[rtti(...)]` attributes on types and fields.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::RTTI_ATTRIBUTE_NAME;

/// Stores `value` in `slot`, rejecting a second occurrence of the same key.
fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate rtti attribute `{key}`")));
    }
    *slot = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level attributes.
///
/// - `uuid = "{...}"`: required, the identity of the type (or of the template for generic types).
/// - `name = "..."`: replaces the identifier in the type name.
/// - `abstract`: the type carries `TypeTraits::IS_ABSTRACT`.
/// - `auto_register`: collect the type for `TypeRegistry::auto_register`.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub uuid: Option<LitStr>,
    pub name: Option<LitStr>,
    pub is_abstract: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(RTTI_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("uuid") {
            let value: LitStr = meta.value()?.parse()?;
            set_once(&mut self.uuid, value, &meta, "uuid")
        } else if meta.path.is_ident("name") {
            let value: LitStr = meta.value()?.parse()?;
            set_once(&mut self.name, value, &meta, "name")
        } else if meta.path.is_ident("abstract") {
            set_once(&mut self.is_abstract, meta.path.span(), &meta, "abstract")
        } else if meta.path.is_ident("auto_register") {
            set_once(&mut self.auto_register, meta.path.span(), &meta, "auto_register")
        } else if meta.path.is_ident("base") {
            Err(meta.error("`base` is a field attribute"))
        } else {
            Err(meta.error(
                "unknown rtti attribute, expected `uuid`, `name`, `abstract` or `auto_register`",
            ))
        }
    }

    /// The declared uuid, or an error pointing at `span` when it is missing.
    pub fn require_uuid(&mut self, span: Span) -> syn::Result<LitStr> {
        self.uuid.take().ok_or_else(|| {
            syn::Error::new(span, "missing `#[rtti(uuid = \"{...}\")]` attribute")
        })
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level attributes. Only `base` exists: the field is a base subobject.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub base: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(RTTI_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    set_once(&mut this.base, meta.path.span(), &meta, "base")
                } else {
                    Err(meta.error("unknown rtti field attribute, expected `base`"))
                }
            })?;
        }
        Ok(this)
    }
}
