use thiserror::Error;

use crate::TypeUuid;

// -----------------------------------------------------------------------------
// Error

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("Type uuid {uuid} of `{new}` is already used by `{existing}`")]
    UuidCollision {
        uuid: TypeUuid,
        existing: &'static str,
        new: &'static str,
    },

    #[error("Type `{name}` cannot be registered with a null uuid")]
    NullUuid { name: &'static str },
}
