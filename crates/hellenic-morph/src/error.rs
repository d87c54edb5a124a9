use std::fmt::Display;

use hellenic_types::RegistryError;
use thiserror::Error;

/// Why a single morphological code could not be turned into a tag.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The code violates the structural grammar of its source.
    #[error("malformed code '{code}': {reason}")]
    Malformed { code: String, reason: &'static str },
    /// The code is well formed but uses a class or sub-code letter the source does not define.
    #[error("unsupported {field} code '{value}' in '{code}'")]
    Unsupported {
        code: String,
        field: &'static str,
        value: String,
    },
    /// The decoder asked the registry for a key it does not hold.
    #[error("grammar registry mismatch: {0}")]
    Registry(#[from] RegistryError),
}

impl DecodeError {
    pub(crate) fn malformed(code: &str, reason: &'static str) -> Self {
        DecodeError::Malformed {
            code: code.to_string(),
            reason,
        }
    }

    pub(crate) fn unsupported(code: &str, field: &'static str, value: impl Display) -> Self {
        DecodeError::Unsupported {
            code: code.to_string(),
            field,
            value: value.to_string(),
        }
    }

    /// Registry mismatches stop a whole run; everything else only rejects the token.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DecodeError::Registry(_))
    }
}
