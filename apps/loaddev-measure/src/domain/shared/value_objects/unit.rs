//! Measurement unit value object.
//!
//! A `Unit` pairs a canonical UCUM symbol with the information needed to
//! convert between compatible units: its [`Dimension`], a decimal factor to
//! the coherent base unit (m, g, s, A, K, mol, cd) and, for affine units such
//! as degrees Celsius, an offset applied on top of the factor.
//!
//! Equality is semantic: `"[ft_i]/s"` parsed from the wire equals
//! `FOOT.divide(&SECOND)` even though the symbols were produced differently.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::dimension::Dimension;
use super::quantity::Scale;
use crate::domain::shared::DomainError;

/// A composable measurement unit.
#[derive(Debug, Clone)]
pub struct Unit {
    symbol: Cow<'static, str>,
    dimension: Dimension,
    factor: Decimal,
    offset: Decimal,
}

// =============================================================================
// Well-known units
// =============================================================================

/// The dimensionless unit ("one").
pub const ONE: Unit = Unit::linear("", Dimension::NONE, Decimal::ONE);
/// Percent.
pub const PERCENT: Unit = Unit::linear("%", Dimension::NONE, dec!(0.01));

/// Metre.
pub const METRE: Unit = Unit::linear("m", Dimension::LENGTH, Decimal::ONE);
/// Centimetre.
pub const CENTIMETRE: Unit = Unit::linear("cm", Dimension::LENGTH, dec!(0.01));
/// Millimetre.
pub const MILLIMETRE: Unit = Unit::linear("mm", Dimension::LENGTH, dec!(0.001));
/// International inch.
pub const INCH: Unit = Unit::linear("[in_i]", Dimension::LENGTH, dec!(0.0254));
/// International foot.
pub const FOOT: Unit = Unit::linear("[ft_i]", Dimension::LENGTH, dec!(0.3048));
/// International yard.
pub const YARD: Unit = Unit::linear("[yd_i]", Dimension::LENGTH, dec!(0.9144));
/// International mile.
pub const MILE: Unit = Unit::linear("[mi_i]", Dimension::LENGTH, dec!(1609.344));

/// Gram.
pub const GRAM: Unit = Unit::linear("g", Dimension::MASS, Decimal::ONE);
/// Kilogram.
pub const KILOGRAM: Unit = Unit::linear("kg", Dimension::MASS, dec!(1000));
/// Grain.
pub const GRAIN: Unit = Unit::linear("[gr]", Dimension::MASS, dec!(0.06479891));
/// Avoirdupois ounce.
pub const OUNCE: Unit = Unit::linear("[oz_av]", Dimension::MASS, dec!(28.349523125));
/// Avoirdupois pound.
pub const POUND: Unit = Unit::linear("[lb_av]", Dimension::MASS, dec!(453.59237));

/// Second.
pub const SECOND: Unit = Unit::linear("s", Dimension::TIME, Decimal::ONE);
/// Minute.
pub const MINUTE: Unit = Unit::linear("min", Dimension::TIME, dec!(60));
/// Hour.
pub const HOUR: Unit = Unit::linear("h", Dimension::TIME, dec!(3600));

/// Kelvin.
pub const KELVIN: Unit = Unit::linear("K", Dimension::TEMPERATURE, Decimal::ONE);
/// Degree Celsius.
pub const CELSIUS: Unit = Unit::new_const("Cel", Dimension::TEMPERATURE, Decimal::ONE, dec!(273.15));
/// Degree Fahrenheit.
pub const FAHRENHEIT: Unit = Unit::new_const(
    "[degF]",
    Dimension::TEMPERATURE,
    dec!(0.5555555555555555555555555556),
    dec!(255.37222222222222222222222222),
);

/// Metre per second.
pub const METRE_PER_SECOND: Unit = Unit::linear("m/s", Dimension::SPEED, Decimal::ONE);
/// Foot per second, the customary muzzle-velocity unit.
pub const FOOT_PER_SECOND: Unit = Unit::linear("[ft_i]/s", Dimension::SPEED, dec!(0.3048));

impl Unit {
    /// Create a unit from its parts.
    ///
    /// `factor` scales a value in this unit to the coherent base unit and
    /// `offset` is added afterwards for absolute quantities.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        dimension: Dimension,
        factor: Decimal,
        offset: Decimal,
    ) -> Self {
        Self {
            symbol: Cow::Owned(symbol.into()),
            dimension,
            factor,
            offset,
        }
    }

    pub(crate) const fn new_const(
        symbol: &'static str,
        dimension: Dimension,
        factor: Decimal,
        offset: Decimal,
    ) -> Self {
        Self {
            symbol: Cow::Borrowed(symbol),
            dimension,
            factor,
            offset,
        }
    }

    pub(crate) const fn linear(symbol: &'static str, dimension: Dimension, factor: Decimal) -> Self {
        Self::new_const(symbol, dimension, factor, Decimal::ZERO)
    }

    /// Canonical case-sensitive symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Physical dimension.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Factor to the coherent base unit.
    #[must_use]
    pub const fn factor(&self) -> Decimal {
        self.factor
    }

    /// Offset applied to absolute values after scaling.
    #[must_use]
    pub const fn offset(&self) -> Decimal {
        self.offset
    }

    /// Returns true for units with a non-zero offset (e.g. `Cel`).
    #[must_use]
    pub fn is_affine(&self) -> bool {
        !self.offset.is_zero()
    }

    /// Returns true if both units measure the same dimension.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.dimension == other.dimension
    }

    /// Replace the symbol, keeping the conversion data.
    #[must_use]
    pub fn with_symbol(self, symbol: impl Into<String>) -> Self {
        Self {
            symbol: Cow::Owned(symbol.into()),
            ..self
        }
    }

    /// Product of two units. Offsets are dropped.
    pub fn multiply(&self, other: &Self) -> Result<Self, DomainError> {
        let dimension = self
            .dimension
            .multiply(&other.dimension)
            .ok_or_else(|| DomainError::overflow("unit multiplication"))?;
        let factor = self
            .factor
            .checked_mul(other.factor)
            .ok_or_else(|| DomainError::overflow("unit multiplication"))?;

        let symbol = match (self.symbol(), other.symbol()) {
            ("", rhs) => rhs.to_string(),
            (lhs, "") => lhs.to_string(),
            (lhs, rhs) if rhs.starts_with('/') => format!("{lhs}{rhs}"),
            (lhs, rhs) => format!("{lhs}.{rhs}"),
        };

        Ok(Self::new(symbol, dimension, factor, Decimal::ZERO))
    }

    /// Quotient of two units. Offsets are dropped.
    pub fn divide(&self, other: &Self) -> Result<Self, DomainError> {
        let dimension = self
            .dimension
            .divide(&other.dimension)
            .ok_or_else(|| DomainError::overflow("unit division"))?;
        let factor = self
            .factor
            .checked_div(other.factor)
            .ok_or_else(|| DomainError::overflow("unit division"))?;

        let rhs = other.symbol();
        let rhs = if is_single_term(rhs) {
            Cow::Borrowed(rhs)
        } else {
            Cow::Owned(format!("({rhs})"))
        };
        let symbol = match (self.symbol(), rhs.as_ref()) {
            (lhs, "") => lhs.to_string(),
            (lhs, rhs) => format!("{lhs}/{rhs}"),
        };

        Ok(Self::new(symbol, dimension, factor, Decimal::ZERO))
    }

    /// Unit raised to an integer power. Offsets are dropped.
    pub fn pow(&self, exponent: i32) -> Result<Self, DomainError> {
        match exponent {
            0 => return Ok(ONE),
            1 => return Ok(self.clone()),
            _ => {}
        }

        let dimension = self
            .dimension
            .pow(exponent)
            .ok_or_else(|| DomainError::overflow("unit exponentiation"))?;

        let mut factor = Decimal::ONE;
        for _ in 0..exponent.unsigned_abs() {
            factor = factor
                .checked_mul(self.factor)
                .ok_or_else(|| DomainError::overflow("unit exponentiation"))?;
        }
        if exponent < 0 {
            factor = Decimal::ONE
                .checked_div(factor)
                .ok_or_else(|| DomainError::overflow("unit exponentiation"))?;
        }

        let base = self.symbol();
        let symbol = if base.is_empty() {
            String::new()
        } else if is_single_term(base) && !base.ends_with(|c: char| c.is_ascii_digit()) {
            format!("{base}{exponent}")
        } else {
            format!("({base}){exponent}")
        };

        Ok(Self::new(symbol, dimension, factor, Decimal::ZERO))
    }

    /// Build a converter from this unit to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompatibleUnits` when the dimensions differ.
    pub fn converter_to(&self, target: &Self) -> Result<UnitConverter, DomainError> {
        if !self.is_compatible(target) {
            return Err(DomainError::IncompatibleUnits {
                from: self.symbol().to_string(),
                to: target.symbol().to_string(),
            });
        }
        Ok(UnitConverter {
            source_factor: self.factor,
            source_offset: self.offset,
            target_factor: target.factor,
            target_offset: target.offset,
            identity: self == target,
        })
    }
}

/// True when the symbol contains no top-level operator.
fn is_single_term(symbol: &str) -> bool {
    !symbol.contains(['.', '/', '('])
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self.factor == other.factor
            && self.offset == other.offset
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.factor.normalize().hash(state);
        self.offset.normalize().hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol.is_empty() {
            write!(f, "one")
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}

/// Change-of-basis between two compatible units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitConverter {
    source_factor: Decimal,
    source_offset: Decimal,
    target_factor: Decimal,
    target_offset: Decimal,
    identity: bool,
}

impl UnitConverter {
    /// Returns true if conversion leaves values unchanged.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    /// Convert a value.
    ///
    /// Absolute values go through the offsets; relative values (differences)
    /// only through the factors.
    pub fn convert(&self, value: Decimal, scale: Scale) -> Result<Decimal, DomainError> {
        if self.identity {
            return Ok(value);
        }

        let overflow = || DomainError::overflow("unit conversion");
        let mut base = value.checked_mul(self.source_factor).ok_or_else(overflow)?;
        if scale == Scale::Absolute {
            let shift = self
                .source_offset
                .checked_sub(self.target_offset)
                .ok_or_else(overflow)?;
            base = base.checked_add(shift).ok_or_else(overflow)?;
        }
        base.checked_div(self.target_factor).ok_or_else(overflow)
    }
}
