//! Quantity value object: a decimal bound to a unit and a scale.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::unit::Unit;
use crate::domain::shared::DomainError;

/// Whether a quantity is an absolute magnitude or a difference.
///
/// Only matters for affine units: converting 20 `Cel` absolute to kelvin
/// gives 293.15 K, while a relative 20 `Cel` difference stays 20 K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scale {
    /// Absolute magnitude.
    #[default]
    Absolute,
    /// Relative (differential) magnitude.
    Relative,
}

impl Scale {
    /// Wire token for this scale.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absolute => "ABSOLUTE",
            Self::Relative => "RELATIVE",
        }
    }

    /// Parse a wire token. Case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ABSOLUTE" => Some(Self::Absolute),
            "RELATIVE" => Some(Self::Relative),
            _ => None,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A numeric value with a unit and a scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity {
    value: Decimal,
    unit: Unit,
    scale: Scale,
}

impl Quantity {
    /// Create an absolute quantity.
    #[must_use]
    pub const fn new(value: Decimal, unit: Unit) -> Self {
        Self {
            value,
            unit,
            scale: Scale::Absolute,
        }
    }

    /// Create a quantity with an explicit scale.
    #[must_use]
    pub const fn with_scale(value: Decimal, unit: Unit, scale: Scale) -> Self {
        Self { value, unit, scale }
    }

    /// Zero in the given unit.
    #[must_use]
    pub const fn zero(unit: Unit) -> Self {
        Self::new(Decimal::ZERO, unit)
    }

    /// Numeric value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }

    /// Unit.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Scale.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Value expressed in `target`, honouring the scale.
    pub fn value_in(&self, target: &Unit) -> Result<Decimal, DomainError> {
        self.unit.converter_to(target)?.convert(self.value, self.scale)
    }

    /// Convert to another compatible unit.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompatibleUnits` for a dimension mismatch.
    pub fn to(&self, target: &Unit) -> Result<Self, DomainError> {
        Ok(Self {
            value: self.value_in(target)?,
            unit: target.clone(),
            scale: self.scale,
        })
    }

    /// Returns true if the value is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Require a strictly positive value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` naming `field` otherwise.
    pub fn validate_positive(&self, field: &str) -> Result<(), DomainError> {
        if self.is_positive() {
            return Ok(());
        }
        Err(DomainError::InvalidValue {
            field: field.to_string(),
            message: format!("must be positive, got {self}"),
        })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol().is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol())
        }
    }
}
