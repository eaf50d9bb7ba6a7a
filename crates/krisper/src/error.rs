//! Validation errors

use thiserror::Error;

/// Compiler result type
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Semantic validation failures.
///
/// Any of these aborts the whole compilation. `Display` renders the stable
/// kind string consumers match on, so it must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input normalized to nothing, or a compress payload was empty.
    #[error("EMPTY_PAYLOAD")]
    EmptyPayload,

    /// A referenced alias is not defined at the point of use.
    #[error("UNDEFINED_REF:{0}")]
    UndefinedRef(String),

    /// A seed parameter does not fit in 64 bits.
    #[error("INVALID_SEED:{0}")]
    InvalidSeed(String),
}

impl ValidationError {
    /// Detail carried by [`ValidationError::UndefinedRef`] when a compare has
    /// no explicit operands and nothing was compressed.
    pub const NO_COMPRESS_FOUND: &'static str = "no_compress_found";

    /// Kind string without the detail suffix.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyPayload => "EMPTY_PAYLOAD",
            Self::UndefinedRef(_) => "UNDEFINED_REF",
            Self::InvalidSeed(_) => "INVALID_SEED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings_are_stable() {
        assert_eq!(ValidationError::EmptyPayload.to_string(), "EMPTY_PAYLOAD");
        assert_eq!(
            ValidationError::UndefinedRef("x".into()).to_string(),
            "UNDEFINED_REF:x"
        );
        assert_eq!(
            ValidationError::UndefinedRef(ValidationError::NO_COMPRESS_FOUND.into()).to_string(),
            "UNDEFINED_REF:no_compress_found"
        );
        assert_eq!(ValidationError::UndefinedRef("y".into()).kind(), "UNDEFINED_REF");
    }
}
