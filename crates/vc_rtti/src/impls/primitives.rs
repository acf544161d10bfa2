use alloc::string::String;

use crate::impls::{NonGenericTypeInfoCell, impl_type_info_only_rtti};
use crate::info::{TypeInfo, TypeTraits, Typed};
use crate::TypeUuid;

macro_rules! impl_builtin {
    ($ty:ty, $name:literal, $uuid:literal) => {
        impl_builtin!($ty, $name, $uuid, TypeTraits::empty());
    };
    ($ty:ty, $name:literal, $uuid:literal, $traits:expr) => {
        impl Typed for $ty {
            #[inline]
            fn type_uuid() -> TypeUuid {
                const { TypeUuid::parse($uuid) }
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_traits() -> TypeTraits {
                $traits
            }

            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(TypeInfo::of::<Self>)
            }
        }

        impl_type_info_only_rtti!(impl[] $ty);
    };
}

impl_builtin!((), "()", "{C0F1AFAD-5CB3-450E-B0F5-ADB5D46B0E22}");
impl_builtin!(bool, "bool", "{A0CA880C-AFE4-43cb-926C-59AC48496112}");
impl_builtin!(char, "char", "{3AB0037F-AF8D-48ce-BCA0-A170D18B2C03}");

impl_builtin!(i8, "i8", "{58422C0E-1E47-4854-98E6-34098F6FE12D}", TypeTraits::IS_SIGNED);
impl_builtin!(i16, "i16", "{B8A56D56-A10D-4dce-9F63-405EE243DD3C}", TypeTraits::IS_SIGNED);
impl_builtin!(i32, "i32", "{72039442-EB38-4d42-A1AD-CB68F7E0EEF6}", TypeTraits::IS_SIGNED);
impl_builtin!(i64, "i64", "{70D8A282-A1EA-462d-9D04-51EDE81FAC2F}", TypeTraits::IS_SIGNED);
impl_builtin!(isize, "isize", "{8F24B9AD-7C51-46cf-B2F8-277356957325}", TypeTraits::IS_SIGNED);

impl_builtin!(u8, "u8", "{72B9409A-7D1A-4831-9CFE-FCB3FADD3426}", TypeTraits::IS_UNSIGNED);
impl_builtin!(u16, "u16", "{ECA0B403-C4F8-4b86-95FC-81688D046E40}", TypeTraits::IS_UNSIGNED);
impl_builtin!(u32, "u32", "{43DA906B-7DEF-4ca8-9790-854106D3F983}", TypeTraits::IS_UNSIGNED);
impl_builtin!(u64, "u64", "{D6597933-47CD-4fc8-B911-63F3E2B0993A}", TypeTraits::IS_UNSIGNED);
impl_builtin!(usize, "usize", "{5EC2D6F7-6859-400f-9215-C106F5B10E53}", TypeTraits::IS_UNSIGNED);

impl_builtin!(f32, "f32", "{EA2C3E90-AFBE-44d4-A90D-FAAF79BAF93D}", TypeTraits::IS_SIGNED);
impl_builtin!(f64, "f64", "{110C4B14-11A8-4e9d-8638-5051013A56AC}", TypeTraits::IS_SIGNED);

impl_builtin!(String, "String", "{03AAAB3F-5C47-5A66-9EBC-D5FA4DB353C9}");
impl_builtin!(&'static str, "&str", "{B2F7E4A9-1D38-4C56-8E0B-A6C9F2D31E75}");
impl_builtin!(TypeUuid, "TypeUuid", "{E152C105-A133-4d03-BBF8-3D4B2FBA3E2A}");

// -----------------------------------------------------------------------------
// Tests
