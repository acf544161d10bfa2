#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_ptr as ptr;
pub use vc_rtti as rtti;
pub use vc_utils as utils;
