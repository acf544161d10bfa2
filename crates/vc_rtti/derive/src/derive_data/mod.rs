//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod define_parser;
mod rtti_derive;
mod rtti_meta;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use define_parser::{ImplExternalRttiParser, ImplTypeInfoParser};
pub(crate) use rtti_derive::RttiDerive;
pub(crate) use rtti_meta::{BaseDef, RttiMeta, TypeArg};
