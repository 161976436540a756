//! Codec error taxonomy.
//!
//! Every decode failure carries an [`ErrorKind`] so callers can route it
//! without matching on messages:
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | `MISSING_FIELD` | required field absent (or null where null is not allowed) |
//! | `INVALID_NUMERIC_VALUE` | value field present but not a representable number |
//! | `INVALID_UNIT_SYNTAX` | unit text fails to parse, or parses only a prefix |
//! | `INVALID_SCALE` | scale present but not `ABSOLUTE` / `RELATIVE` |
//! | `INVALID_CURRENCY` | currency code not in the ISO-4217 table |
//! | `WRONG_TOKEN_TYPE` | JSON value of the wrong kind entirely |
//!
//! At the wire boundary every kind is a client error. At the storage
//! boundary any of them means corrupted data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::DomainError;
use crate::infrastructure::codec::UnitParseError;

/// Error kinds raised by the measurement codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Required field absent or null.
    MissingField,
    /// Value present but not numeric.
    InvalidNumericValue,
    /// Unit string unparseable or only partially parseable.
    InvalidUnitSyntax,
    /// Scale token not recognized.
    InvalidScale,
    /// Currency code not resolvable.
    InvalidCurrency,
    /// JSON value of the wrong type.
    WrongTokenType,
}

impl ErrorKind {
    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidNumericValue => "INVALID_NUMERIC_VALUE",
            Self::InvalidUnitSyntax => "INVALID_UNIT_SYNTAX",
            Self::InvalidScale => "INVALID_SCALE",
            Self::InvalidCurrency => "INVALID_CURRENCY",
            Self::WrongTokenType => "WRONG_TOKEN_TYPE",
        }
    }

    /// Whether a wire caller should answer with a client error.
    ///
    /// Every codec failure stems from the payload, so this is always true.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        true
    }
}

/// Decode failure raised by the measurement codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Required field absent or null.
    #[error("Missing required field '{field}' in {target} JSON")]
    MissingField {
        /// Field name.
        field: &'static str,
        /// Decoded type ("Quantity" or "MonetaryAmount").
        target: &'static str,
    },

    /// Field present but not a representable number.
    #[error("Invalid numeric value for '{field}' field: {token}")]
    InvalidNumericValue {
        /// Field name.
        field: &'static str,
        /// Offending JSON token.
        token: String,
    },

    /// Unit text could not be fully parsed.
    #[error("Invalid unit value '{text}': {source}")]
    InvalidUnitSyntax {
        /// Raw unit text.
        text: String,
        /// Position and cause reported by the unit format.
        source: UnitParseError,
    },

    /// Scale not one of the recognized tokens.
    #[error("Invalid scale '{value}'. Expected ABSOLUTE or RELATIVE")]
    InvalidScale {
        /// Offending value.
        value: String,
    },

    /// Currency code not resolvable.
    #[error("Invalid currency '{code}': {source}")]
    InvalidCurrency {
        /// Offending code.
        code: String,
        /// Lookup failure.
        source: DomainError,
    },

    /// JSON value of the wrong kind.
    #[error("Invalid {field} value: expected {expected}, found {found}")]
    WrongTokenType {
        /// Field name ("unit" for a bare unit).
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
        /// Offending JSON token.
        found: String,
    },
}

impl CodecError {
    /// Kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::InvalidNumericValue { .. } => ErrorKind::InvalidNumericValue,
            Self::InvalidUnitSyntax { .. } => ErrorKind::InvalidUnitSyntax,
            Self::InvalidScale { .. } => ErrorKind::InvalidScale,
            Self::InvalidCurrency { .. } => ErrorKind::InvalidCurrency,
            Self::WrongTokenType { .. } => ErrorKind::WrongTokenType,
        }
    }

    /// Name of the offending field, when the error concerns one.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. }
            | Self::InvalidNumericValue { field, .. }
            | Self::WrongTokenType { field, .. } => Some(*field),
            Self::InvalidUnitSyntax { .. } => Some("unit"),
            Self::InvalidScale { .. } => Some("scale"),
            Self::InvalidCurrency { .. } => Some("currency"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        assert_eq!(ErrorKind::MissingField.reason(), "MISSING_FIELD");
        assert_eq!(ErrorKind::InvalidUnitSyntax.reason(), "INVALID_UNIT_SYNTAX");
        assert_eq!(ErrorKind::WrongTokenType.reason(), "WRONG_TOKEN_TYPE");
    }

    #[test]
    fn test_kind_serializes_like_reason() {
        let json = serde_json::to_string(&ErrorKind::InvalidScale).unwrap();
        assert_eq!(json, "\"INVALID_SCALE\"");
    }

    #[test]
    fn test_missing_field_message() {
        let err = CodecError::MissingField {
            field: "value",
            target: "Quantity",
        };
        assert_eq!(err.to_string(), "Missing required field 'value' in Quantity JSON");
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn test_unit_syntax_message_includes_position() {
        let err = CodecError::InvalidUnitSyntax {
            text: "m/sX".to_string(),
            source: UnitParseError::new(3, "unexpected trailing text 'X'"),
        };
        let message = err.to_string();
        assert!(message.contains("m/sX"));
        assert!(message.contains("index 3"));
        assert_eq!(err.field(), Some("unit"));
    }

    #[test]
    fn test_scale_message_lists_options() {
        let err = CodecError::InvalidScale {
            value: "SIDEWAYS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid scale 'SIDEWAYS'. Expected ABSOLUTE or RELATIVE"
        );
    }

    #[test]
    fn test_every_kind_is_client_error() {
        for kind in [
            ErrorKind::MissingField,
            ErrorKind::InvalidNumericValue,
            ErrorKind::InvalidUnitSyntax,
            ErrorKind::InvalidScale,
            ErrorKind::InvalidCurrency,
            ErrorKind::WrongTokenType,
        ] {
            assert!(kind.is_client_error());
        }
    }
}
