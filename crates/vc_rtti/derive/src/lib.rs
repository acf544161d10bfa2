//! See following macros:
//!
//! - [`TypeInfo`]
//! - [`Rtti`]
//! - [`impl_type_info`]
//! - [`impl_external_rtti`]
//!
//! The snippets here are not compiled, since this crate cannot depend on
//! `vc_rtti`. Runnable versions live in the `vc_rtti` docs: `Typed` and
//! `Rtti` for the derives, `BaseOf` for `impl_type_info!` and
//! `impl_external_rtti!`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static RTTI_ATTRIBUTE_NAME: &str = "rtti";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

use derive_data::{ImplExternalRttiParser, ImplTypeInfoParser, RttiDerive};

// -----------------------------------------------------------------------------
// Macros

/// # Type Identity Derivation
///
/// `#[derive(TypeInfo)]` implements `Typed` and an identity-only `Rtti`:
/// the type answers every query about itself, but never matches any other
/// type. Use [`derive Rtti`](derive_rtti) when the type has bases.
///
/// ## Uuid
///
/// The uuid is required and must never change once values of the type have
/// been saved anywhere.
///
/// ```rust, ignore
/// #[derive(TypeInfo)]
/// #[rtti(uuid = "{0F3C9A7D-2B61-4E58-9D0A-6C1B7E4F2A93}")]
/// struct Velocity(f32, f32);
/// ```
///
/// A malformed uuid is a compile error.
///
/// ## Generic Types
///
/// For generic types the uuid is the template identity. Each instantiation
/// combines it with its arguments: `Handle<u8>` is `template + u8`,
/// `Pair<A, B>` is `template + (A + B)`. Type parameters receive a `Typed` bound,
/// const parameters take part through their value.
///
/// ```rust, ignore
/// #[derive(TypeInfo)]
/// #[rtti(uuid = "{6A0E52C4-91D7-4B3F-8E26-D5F07C3A1B88}")]
/// struct Handle<T>(u32, PhantomData<T>);
/// ```
///
/// Types with lifetime parameters are rejected.
///
/// ## Other Attributes
///
/// - `name = "..."`: replaces the identifier in the type name.
/// - `abstract`: adds `TypeTraits::IS_ABSTRACT`.
/// - `auto_register`: collects the type for `TypeRegistry::auto_register`.
///   No effect on generic types, or when the `auto_register` feature is disabled.
///
/// Enums get `TypeTraits::IS_ENUM`.
#[proc_macro_derive(TypeInfo, attributes(rtti))]
pub fn derive_type_info(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let RttiDerive { meta, .. } = match RttiDerive::from_derive_input(&ast, false) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let uuid_const = meta.uuid_const_tokens();
    let typed_impl = impls::impl_trait_typed(&meta);
    let rtti_impl = impls::impl_trait_type_info_only_rtti(&meta);
    let auto_register = impls::get_auto_register_impl(&meta);

    TokenStream::from(quote! {
        const _: () = {
            #uuid_const
            #typed_impl
            #rtti_impl
        };
        #auto_register
    })
}

/// # Full Rtti Derivation
///
/// `#[derive(Rtti)]` implements `Typed` and an intrusive `Rtti`. Fields
/// marked `#[rtti(base)]` are the bases of the type: casts, type tests and
/// hierarchy enumeration go through them, in declaration order.
///
/// Type level attributes are the same as [`derive TypeInfo`](derive_type_info).
///
/// ```rust, ignore
/// #[derive(Rtti)]
/// #[rtti(uuid = "{8D1F6C2A-3B47-4E90-A5D8-71C2E9B04F36}")]
/// struct Shape {
///     sides: u32,
/// }
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{C4A97E15-08B3-4F6D-92E1-5B7D3A6C8F02}")]
/// struct Square {
///     #[rtti(base)]
///     shape: Shape,
///     side: f32,
/// }
/// ```
///
/// Every base field must implement `Rtti`. There is no limit on the number
/// of bases. Enums and unions can derive `Rtti`, but cannot have bases.
#[proc_macro_derive(Rtti, attributes(rtti))]
pub fn derive_rtti(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let RttiDerive { meta, bases } = match RttiDerive::from_derive_input(&ast, true) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    let uuid_const = meta.uuid_const_tokens();
    let typed_impl = impls::impl_trait_typed(&meta);
    let rtti_impl = impls::impl_trait_intrusive_rtti(&meta, &bases);
    let auto_register = impls::get_auto_register_impl(&meta);

    TokenStream::from(quote! {
        const _: () = {
            #uuid_const
            #typed_impl
            #rtti_impl
        };
        #auto_register
    })
}

/// Implements `Typed` and an identity-only `Rtti` away from the type definition.
///
/// Syntax: `[generic params] path::Type<Args>, "{uuid}"`.
///
/// The type must be local to the calling crate.
///
/// ## Example
///
/// ```rust, ignore
/// impl_type_info!(Position, "{9C3B5E17-4A2D-4F81-B6E0-D8A7C1F52E49}");
/// impl_type_info!(geometry::Line, "{1A2B3C4D-5E6F-4A8B-9C0D-1E2F3A4B5C6D}");
///
/// // `Grid<T, 4>` is `template + (T + 4)`
/// impl_type_info!([T, const N: usize] Grid<T, N>, "{D3E4F5A6-B7C8-4D9E-A0F1-B2C3D4E5F6A7}");
/// ```
#[proc_macro]
pub fn impl_type_info(input: TokenStream) -> TokenStream {
    let ImplTypeInfoParser { meta } = parse_macro_input!(input with ImplTypeInfoParser::parse);

    let uuid_const = meta.uuid_const_tokens();
    let typed_impl = impls::impl_trait_typed(&meta);
    let rtti_impl = impls::impl_trait_type_info_only_rtti(&meta);

    TokenStream::from(quote! {
        const _: () = {
            #uuid_const
            #typed_impl
            #rtti_impl
        };
    })
}

/// Declares the identity and the bases of a type away from its definition.
///
/// Syntax: `[generic params] path::Type<Args>, "{uuid}", Base(field.path), OtherBase, ...`.
///
/// - `Base(field.path)` also implements `BaseOf<Base>` by projecting to `self.field.path`.
/// - `Base` alone expects a hand written `BaseOf<Base>` impl.
///
/// Bases may be declared with any of the macros: intrusive, identity-only or
/// external. The type gets an `ExternalRttiHelper`, built on first use, and
/// behaves like a `#[derive(Rtti)]` type from the caller's side.
///
/// ## Example
///
/// ```rust, ignore
/// struct Panel {
///     frame: Frame,
///     label: Label,
/// }
///
/// impl_external_rtti!(
///     Panel,
///     "{7B0E5C93-A2D1-4F68-8C4B-E1F37D9A06C5}",
///     Frame(frame),
///     Label(label),
/// );
/// ```
#[proc_macro]
pub fn impl_external_rtti(input: TokenStream) -> TokenStream {
    let ImplExternalRttiParser { meta, bases } =
        parse_macro_input!(input with ImplExternalRttiParser::parse);

    let uuid_const = meta.uuid_const_tokens();
    let typed_impl = impls::impl_trait_typed(&meta);
    let rtti_impl = impls::impl_trait_external_rtti(&meta, &bases);

    TokenStream::from(quote! {
        const _: () = {
            #uuid_const
            #typed_impl
            #rtti_impl
        };
    })
}
