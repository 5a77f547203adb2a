//! Error types for ripple.
//!
//! Expected failures in the observation core (duplicate property names,
//! out-of-range indices, rejected validation) are reported by boolean or
//! Option returns and never reach this type. `Error` covers the genuinely
//! fallible surface: parsing serialized descriptor data.

use alloc::string::{String, ToString};
use core::fmt;

/// Result type alias for ripple operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for ripple operations.
#[derive(Debug)]
pub enum Error {
    /// Serialized input could not be parsed.
    Deserialize {
        message: String,
    },
    /// A serialized property record is structurally invalid.
    InvalidRecord {
        name: String,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Deserialize { message } => {
                write!(f, "Deserialization failed: {}", message)
            }
            Error::InvalidRecord { name, message } => {
                write!(f, "Invalid property record {}: {}", name, message)
            }
        }
    }
}

impl Error {
    /// Creates a deserialization error.
    pub fn deserialize(message: impl Into<String>) -> Self {
        Error::Deserialize {
            message: message.into(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidRecord {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::deserialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::deserialize("unexpected end of input");
        assert!(err.to_string().contains("unexpected end of input"));

        let err = Error::invalid_record("position", "missing varType");
        assert!(err.to_string().contains("position"));
    }
}
