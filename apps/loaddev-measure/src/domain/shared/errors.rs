//! Domain errors for measurement values.

use std::fmt;

/// Domain-level errors raised by value objects and aggregations.
///
/// These errors are independent of any wire or storage format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Conversion attempted between units of different dimensions.
    IncompatibleUnits {
        /// Source unit symbol.
        from: String,
        /// Target unit symbol.
        to: String,
    },

    /// Currency code not present in the ISO-4217 table.
    UnknownCurrency {
        /// The code as supplied.
        code: String,
    },

    /// Arithmetic on two amounts of different currencies.
    CurrencyMismatch {
        /// Left-hand currency code.
        left: String,
        /// Right-hand currency code.
        right: String,
    },

    /// Invalid value for a field.
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Decimal arithmetic left the representable range.
    ArithmeticOverflow {
        /// Operation that overflowed.
        operation: String,
    },
}

impl DomainError {
    pub(crate) fn overflow(operation: &str) -> Self {
        Self::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleUnits { from, to } => {
                write!(f, "Cannot convert from '{from}' to '{to}': incompatible dimensions")
            }
            Self::UnknownCurrency { code } => {
                write!(f, "Unknown currency code: '{code}'")
            }
            Self::CurrencyMismatch { left, right } => {
                write!(f, "Currency mismatch: {left} vs {right}")
            }
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::ArithmeticOverflow { operation } => {
                write!(f, "Arithmetic overflow during {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
