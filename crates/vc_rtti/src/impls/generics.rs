use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::format;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

use crate::TypeUuid;
use crate::impls::{GenericTypeNameCell, GenericTypeUuidCell, concat, impl_type_info_only_rtti};
use crate::info::{TypeTraits, Typed};

const VEC_TEMPLATE: TypeUuid = TypeUuid::parse("{A60E3E61-1FF6-4982-B6B8-9E4350C4C679}");
const BOX_TEMPLATE: TypeUuid = TypeUuid::parse("{2C8E6A41-D37B-4F05-A9E2-7B14C05F3D68}");
const ARRAY_TEMPLATE: TypeUuid = TypeUuid::parse("{911B2EA8-CCB1-4F0C-A535-540AD00173AE}");
const TUPLE_TEMPLATE: TypeUuid = TypeUuid::parse("{F99F9308-DC3E-4384-9341-89CBF1ABD51E}");
const OPTION_TEMPLATE: TypeUuid = TypeUuid::parse("{3B1E8C4A-6F27-4D90-A5B3-C8E2D71F0946}");
const ARC_TEMPLATE: TypeUuid = TypeUuid::parse("{D7C42E19-5A8B-4F36-9E01-B4F3A6C8D257}");
const RC_TEMPLATE: TypeUuid = TypeUuid::parse("{6E9A0F53-C2D4-4B78-8A16-F05B3E7C9D12}");
const VEC_DEQUE_TEMPLATE: TypeUuid = TypeUuid::parse("{A41F6B2C-93E8-4D05-B7CA-2E6D8F1A5034}");
const BTREE_SET_TEMPLATE: TypeUuid = TypeUuid::parse("{25E8B4D1-7C6A-4093-B1F5-D9A2E0C83B67}");
const BTREE_MAP_TEMPLATE: TypeUuid = TypeUuid::parse("{8C2D5E7A-0B14-4F69-A3D8-76E1C9B4F205}");
#[cfg(feature = "std")]
const HASH_SET_TEMPLATE: TypeUuid = TypeUuid::parse("{C9D30E85-4F1B-4A72-96E8-3B7D5C0A1F94}");
#[cfg(feature = "std")]
const HASH_MAP_TEMPLATE: TypeUuid = TypeUuid::parse("{F1A7C360-D8B2-4E95-8C4F-0A3E6B9D7218}");

// -----------------------------------------------------------------------------
// Single parameter

macro_rules! impl_single_param {
    ($ty:ident, $template:ident) => {
        impl<T: Typed> Typed for $ty<T> {
            fn type_uuid() -> TypeUuid {
                static CELL: GenericTypeUuidCell = GenericTypeUuidCell::new();
                *CELL.get_or_insert::<Self>(|| $template + T::type_uuid())
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypeNameCell = GenericTypeNameCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[stringify!($ty), "<", T::type_name(), ">"])
                })
            }

            #[inline]
            fn template_uuid() -> TypeUuid {
                $template
            }

            #[inline]
            fn type_traits() -> TypeTraits {
                TypeTraits::IS_TEMPLATE
            }
        }

        impl_type_info_only_rtti!(impl[T: Typed] $ty<T>);
    };
}

impl_single_param!(Vec, VEC_TEMPLATE);
impl_single_param!(Box, BOX_TEMPLATE);
impl_single_param!(Arc, ARC_TEMPLATE);
impl_single_param!(Rc, RC_TEMPLATE);
impl_single_param!(VecDeque, VEC_DEQUE_TEMPLATE);
impl_single_param!(BTreeSet, BTREE_SET_TEMPLATE);
#[cfg(feature = "std")]
impl_single_param!(HashSet, HASH_SET_TEMPLATE);

// -----------------------------------------------------------------------------
// Maps

macro_rules! impl_map {
    ($ty:ident, $template:ident) => {
        impl<K: Typed, V: Typed> Typed for $ty<K, V> {
            fn type_uuid() -> TypeUuid {
                static CELL: GenericTypeUuidCell = GenericTypeUuidCell::new();
                *CELL.get_or_insert::<Self>(|| {
                    $template + TypeUuid::aggregate(&[K::type_uuid(), V::type_uuid()])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypeNameCell = GenericTypeNameCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[stringify!($ty), "<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }

            #[inline]
            fn template_uuid() -> TypeUuid {
                $template
            }

            #[inline]
            fn type_traits() -> TypeTraits {
                TypeTraits::IS_TEMPLATE
            }
        }

        impl_type_info_only_rtti!(impl[K: Typed, V: Typed] $ty<K, V>);
    };
}

impl_map!(BTreeMap, BTREE_MAP_TEMPLATE);
#[cfg(feature = "std")]
impl_map!(HashMap, HASH_MAP_TEMPLATE);

// -----------------------------------------------------------------------------
// Option

// `Option<&S>` is a nullable cast source, so `Option` only carries an identity.
impl<T: Typed> Typed for Option<T> {
    fn type_uuid() -> TypeUuid {
        static CELL: GenericTypeUuidCell = GenericTypeUuidCell::new();
        *CELL.get_or_insert::<Self>(|| OPTION_TEMPLATE + T::type_uuid())
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypeNameCell = GenericTypeNameCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn template_uuid() -> TypeUuid {
        OPTION_TEMPLATE
    }

    #[inline]
    fn type_traits() -> TypeTraits {
        TypeTraits::IS_TEMPLATE
    }
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: Typed, const N: usize> Typed for [T; N] {
    /// The length takes part as an argument: `ARRAY + (T + from_data(N))`.
    fn type_uuid() -> TypeUuid {
        static CELL: GenericTypeUuidCell = GenericTypeUuidCell::new();
        *CELL.get_or_insert::<Self>(|| {
            let len = TypeUuid::from_data(&(N as u64).to_le_bytes());
            ARRAY_TEMPLATE + TypeUuid::aggregate(&[T::type_uuid(), len])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypeNameCell = GenericTypeNameCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {}]", T::type_name(), N))
    }

    #[inline]
    fn template_uuid() -> TypeUuid {
        ARRAY_TEMPLATE
    }

    #[inline]
    fn type_traits() -> TypeTraits {
        TypeTraits::IS_TEMPLATE
    }
}

impl_type_info_only_rtti!(impl[T: Typed, const N: usize] [T; N]);

// -----------------------------------------------------------------------------
// Tuples

macro_rules! impl_tuple {
    ($($p:ident),+) => {
        impl<$($p: Typed),+> Typed for ($($p,)+) {
            fn type_uuid() -> TypeUuid {
                static CELL: GenericTypeUuidCell = GenericTypeUuidCell::new();
                *CELL.get_or_insert::<Self>(|| {
                    TUPLE_TEMPLATE + TypeUuid::aggregate(&[$($p::type_uuid()),+])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypeNameCell = GenericTypeNameCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let names = [$($p::type_name()),+];
                    let inner = names.join(", ");
                    let close = if names.len() == 1 { ",)" } else { ")" };
                    concat(&["(", &inner, close])
                })
            }

            #[inline]
            fn template_uuid() -> TypeUuid {
                TUPLE_TEMPLATE
            }

            #[inline]
            fn type_traits() -> TypeTraits {
                TypeTraits::IS_TEMPLATE
            }
        }

        impl_type_info_only_rtti!(impl[$($p: Typed),+] ($($p,)+));
    };
}

impl_tuple!(P0);
impl_tuple!(P0, P1);
impl_tuple!(P0, P1, P2);
impl_tuple!(P0, P1, P2, P3);
impl_tuple!(P0, P1, P2, P3, P4);
impl_tuple!(P0, P1, P2, P3, P4, P5);
impl_tuple!(P0, P1, P2, P3, P4, P5, P6);
impl_tuple!(P0, P1, P2, P3, P4, P5, P6, P7);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{ARRAY_TEMPLATE, BTREE_MAP_TEMPLATE, OPTION_TEMPLATE, TUPLE_TEMPLATE, VEC_TEMPLATE};
    use crate::{Rtti, TypeTraits, TypeUuid, Typed, rtti_cast, rtti_is_template_of};
    use alloc::boxed::Box;
    use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn right_fold_arguments() {
        let (a, b, c) = (u8::type_uuid(), String::type_uuid(), f32::type_uuid());
        let tuple = <(u8, String, f32)>::type_uuid();

        assert_eq!(tuple, TUPLE_TEMPLATE + (a + (b + c)));
        assert_ne!(tuple, TUPLE_TEMPLATE + a + b + c);
        assert_ne!(tuple, <(u8, f32, String)>::type_uuid());
        assert_eq!(<(u8,)>::type_uuid(), TUPLE_TEMPLATE + a);
    }

    #[test]
    fn templates_shared_across_instantiations() {
        assert_eq!(<Vec<u8>>::template_uuid(), <Vec<String>>::template_uuid());
        assert_ne!(<Vec<u8>>::type_uuid(), <Vec<String>>::type_uuid());
        assert_eq!(<Vec<u8>>::type_uuid(), VEC_TEMPLATE + u8::type_uuid());
        assert_ne!(<Vec<u8>>::template_uuid(), <Box<u8>>::template_uuid());
        assert_eq!(<Box<u8>>::type_traits(), TypeTraits::IS_TEMPLATE);
    }

    #[test]
    fn array_length_is_identity() {
        let len = TypeUuid::from_data(&4_u64.to_le_bytes());
        assert_eq!(<[u16; 4]>::type_uuid(), ARRAY_TEMPLATE + (u16::type_uuid() + len));
        assert_ne!(<[u16; 4]>::type_uuid(), <[u16; 5]>::type_uuid());
        assert_eq!(<[u16; 4]>::template_uuid(), <[u16; 5]>::template_uuid());
    }

    #[test]
    fn composed_names() {
        assert_eq!(<Vec<Box<u8>>>::type_name(), "Vec<Box<u8>>");
        assert_eq!(<[f64; 3]>::type_name(), "[f64; 3]");
        assert_eq!(<(bool,)>::type_name(), "(bool,)");
        assert_eq!(<(bool, char, ())>::type_name(), "(bool, char, ())");
    }

    #[test]
    fn template_queries() {
        assert!(rtti_is_template_of::<Vec<()>, _>(&vec![1_i32, 2]));
        assert!(rtti_is_template_of::<(u8, u8), _>(&(true, 'x', 1_u64)));
        assert!(!rtti_is_template_of::<Vec<()>, _>(&Box::new(1_u8)));
        assert!(<Vec<u8>>::type_info().is_template());
    }

    #[test]
    fn library_templates() {
        assert_eq!(<Option<u8>>::type_uuid(), OPTION_TEMPLATE + u8::type_uuid());
        assert_eq!(<Option<u8>>::type_name(), "Option<u8>");
        assert_ne!(<Option<u8>>::type_uuid(), <Option<i8>>::type_uuid());

        assert_eq!(<Arc<String>>::type_name(), "Arc<String>");
        assert_eq!(<Rc<String>>::type_name(), "Rc<String>");
        assert_ne!(<Arc<u8>>::template_uuid(), <Rc<u8>>::template_uuid());
        assert_ne!(<Arc<u8>>::template_uuid(), <Box<u8>>::template_uuid());

        assert_eq!(<VecDeque<f32>>::type_name(), "VecDeque<f32>");
        assert_ne!(<VecDeque<f32>>::type_uuid(), <Vec<f32>>::type_uuid());
        assert_eq!(<BTreeSet<char>>::type_name(), "BTreeSet<char>");
        assert!(<BTreeSet<char>>::type_info().is_template());
    }

    #[test]
    fn map_arguments_are_ordered() {
        let (k, v) = (i32::type_uuid(), String::type_uuid());
        assert_eq!(<BTreeMap<i32, String>>::type_uuid(), BTREE_MAP_TEMPLATE + (k + v));
        assert_ne!(<BTreeMap<i32, String>>::type_uuid(), <BTreeMap<String, i32>>::type_uuid());
        assert_eq!(<BTreeMap<i32, String>>::type_name(), "BTreeMap<i32, String>");
        assert_eq!(<BTreeMap<u8, u8>>::template_uuid(), BTREE_MAP_TEMPLATE);
    }

    #[test]
    fn string_slices() {
        assert_eq!(<&str>::type_name(), "&str");
        assert_ne!(<&str>::type_uuid(), String::type_uuid());
        assert_eq!(<Vec<&str>>::type_name(), "Vec<&str>");

        let text = "text";
        assert_eq!(rtti_cast::<&str, _>(&text), Some(&"text"));
        assert!(<&str>::rtti_contains_type(<&str>::type_uuid()));
    }

    #[test]
    fn shared_pointers_cast_as_values() {
        let shared = Arc::new(3_u8);
        assert!(rtti_cast::<Arc<u8>, _>(&shared).is_some());
        assert!(rtti_cast::<Rc<u8>, _>(&shared).is_none());
        assert!(rtti_is_template_of::<Arc<()>, _>(&shared));
    }

    #[cfg(feature = "std")]
    #[test]
    fn hashed_collections() {
        use std::collections::{HashMap, HashSet};

        assert_eq!(<HashMap<String, u32>>::type_name(), "HashMap<String, u32>");
        assert_eq!(<HashSet<u32>>::type_name(), "HashSet<u32>");
        assert_ne!(<HashMap<u32, u32>>::template_uuid(), <BTreeMap<u32, u32>>::template_uuid());
        assert_ne!(<HashSet<u32>>::type_uuid(), <BTreeSet<u32>>::type_uuid());
    }
}
