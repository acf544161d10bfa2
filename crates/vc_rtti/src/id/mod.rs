//! Stable 128-bit type identities.
//!
//! A [`TypeUuid`] is declared by hand (or derived from other identities) and
//! never depends on the compiler, so it stays the same across builds,
//! processes and machines. This is what makes it usable as a tag in saved data.
//!
//! ## Generic instantiations
//!
//! The identity of `Template<A, B, C>` is `template + (A + (B + C))`:
//! the arguments are combined with a right fold, then combined with the
//! template's own identity. Combining is name-based hashing (uuid version 5)
//! of the 32 bytes of both operands, so it is deterministic but not commutative.

use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Add;
use core::str::FromStr;

use serde_core::de::{self, Visitor};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

// -----------------------------------------------------------------------------
// TypeUuid

/// The identity of a declared type.
///
/// Two declared types are the same type if and only if their `TypeUuid`s are equal.
/// [`TypeUuid::NULL`] is the sentinel returned when there is no answer,
/// e.g. the runtime identity of a `None` source.
///
/// # Examples
///
/// ```
/// use vc_rtti::TypeUuid;
///
/// const ID: TypeUuid = TypeUuid::parse("{72039442-EB38-4D42-A1AD-CB68F7E0EEF6}");
///
/// assert_eq!(ID.to_string(), "{72039442-EB38-4D42-A1AD-CB68F7E0EEF6}");
/// assert!(!ID.is_null());
/// assert!(TypeUuid::NULL.is_null());
/// ```
///
/// Malformed literals are rejected at compile time when parsed in a constant:
///
/// ```compile_fail
/// use vc_rtti::TypeUuid;
///
/// const ID: TypeUuid = TypeUuid::parse("{not-a-uuid}");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeUuid(Uuid);

impl TypeUuid {
    /// The null identity, all bits zero.
    pub const NULL: Self = Self(Uuid::nil());

    /// Parses a uuid literal, with or without braces, in any letter case.
    ///
    /// Meant for constants: an invalid literal panics, which fails the build
    /// when evaluated in a `const`. Use [`try_parse`](Self::try_parse) for
    /// runtime input.
    pub const fn parse(literal: &str) -> Self {
        match Uuid::try_parse(literal) {
            Ok(uuid) => Self(uuid),
            Err(_) => panic!("malformed type uuid literal"),
        }
    }

    /// Parses a uuid from runtime input.
    pub fn try_parse(input: &str) -> Result<Self, ParseTypeUuidError> {
        Uuid::try_parse(input).map(Self).map_err(ParseTypeUuidError)
    }

    #[inline]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Name-based identity of arbitrary data, e.g. the length of an array type.
    #[inline]
    pub fn from_data(data: &[u8]) -> Self {
        Self(Uuid::new_v5(&Uuid::nil(), data))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0.is_nil()
    }

    #[inline]
    pub const fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    #[inline]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Combines two identities, see the [module documentation](self).
    pub fn combine(self, rhs: Self) -> Self {
        let mut data = [0_u8; 32];
        data[..16].copy_from_slice(self.as_bytes());
        data[16..].copy_from_slice(rhs.as_bytes());
        Self::from_data(&data)
    }

    /// Right fold of [`combine`](Self::combine): `ids[0] + (ids[1] + (.. + ids[n - 1]))`.
    ///
    /// A single identity is returned unchanged, an empty slice gives [`TypeUuid::NULL`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_rtti::TypeUuid;
    ///
    /// let a = TypeUuid::from_u128(1);
    /// let b = TypeUuid::from_u128(2);
    /// let c = TypeUuid::from_u128(3);
    ///
    /// assert_eq!(TypeUuid::aggregate(&[a, b, c]), a + (b + c));
    /// assert_ne!(TypeUuid::aggregate(&[a, b, c]), (a + b) + c);
    /// ```
    pub fn aggregate(ids: &[TypeUuid]) -> Self {
        ids.iter()
            .rev()
            .copied()
            .reduce(|acc, id| id.combine(acc))
            .unwrap_or(Self::NULL)
    }
}

impl Default for TypeUuid {
    #[inline]
    fn default() -> Self {
        Self::NULL
    }
}

impl Hash for TypeUuid {
    /// A single `write_u128`, so maps keyed by uuid can skip rehashing.
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u128(self.as_u128());
    }
}

impl Add for TypeUuid {
    type Output = TypeUuid;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl From<Uuid> for TypeUuid {
    #[inline]
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<TypeUuid> for Uuid {
    #[inline]
    fn from(value: TypeUuid) -> Self {
        value.0
    }
}

impl FromStr for TypeUuid {
    type Err = ParseTypeUuidError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl fmt::Display for TypeUuid {
    /// Braced upper case form: `{72039442-EB38-4D42-A1AD-CB68F7E0EEF6}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0.braced(), f)
    }
}

impl fmt::Debug for TypeUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeUuid({self})")
    }
}

// -----------------------------------------------------------------------------
// Error

/// The input of [`TypeUuid::try_parse`] is not a uuid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid type uuid: {0}")]
pub struct ParseTypeUuidError(uuid::Error);

// -----------------------------------------------------------------------------
// Serde

impl Serialize for TypeUuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for TypeUuid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypeUuidVisitor;

        impl<'de> Visitor<'de> for TypeUuidVisitor {
            type Value = TypeUuid;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a uuid string or 16 bytes")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TypeUuid, E> {
                TypeUuid::try_parse(v).map_err(E::custom)
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<TypeUuid, E> {
                self.visit_str(&v)
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<TypeUuid, E> {
                <[u8; 16]>::try_from(v)
                    .map(TypeUuid::from_bytes)
                    .map_err(|_| E::invalid_length(v.len(), &self))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(TypeUuidVisitor)
        } else {
            deserializer.deserialize_bytes(TypeUuidVisitor)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeUuid;
    use alloc::string::ToString;

    const INT: TypeUuid = TypeUuid::parse("{72039442-EB38-4d42-A1AD-CB68F7E0EEF6}");

    #[test]
    fn parse_forms() {
        let hyphenated = TypeUuid::try_parse("72039442-eb38-4d42-a1ad-cb68f7e0eef6").unwrap();
        assert_eq!(INT, hyphenated);
        assert_eq!(INT.to_string(), "{72039442-EB38-4D42-A1AD-CB68F7E0EEF6}");
        assert!("{72039442}".parse::<TypeUuid>().is_err());
    }

    #[test]
    fn combine_order() {
        let a = TypeUuid::from_u128(0xA);
        let b = TypeUuid::from_u128(0xB);
        assert_eq!(a + b, a + b);
        assert_ne!(a + b, b + a);
        assert_ne!(a + b, TypeUuid::NULL);
        assert_eq!(TypeUuid::aggregate(&[a]), a);
        assert_eq!(TypeUuid::aggregate(&[]), TypeUuid::NULL);
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&INT).unwrap();
        assert_eq!(json, "\"{72039442-EB38-4D42-A1AD-CB68F7E0EEF6}\"");
        let back: TypeUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, INT);
        assert!(serde_json::from_str::<TypeUuid>("\"zz\"").is_err());
    }
}
