//! Physical dimension of a unit.
//!
//! A dimension is the vector of integer exponents over the seven SI base
//! quantities, in the order L (length), M (mass), T (time), I (electric
//! current), Θ (thermodynamic temperature), N (amount of substance) and
//! J (luminous intensity). Two units are compatible exactly when their
//! dimensions are equal.

use std::fmt;

const SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// Exponent vector over the SI base quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension([i8; 7]);

impl Dimension {
    /// Dimensionless (all exponents zero).
    pub const NONE: Self = Self([0; 7]);
    /// Length.
    pub const LENGTH: Self = Self([1, 0, 0, 0, 0, 0, 0]);
    /// Mass.
    pub const MASS: Self = Self([0, 1, 0, 0, 0, 0, 0]);
    /// Time.
    pub const TIME: Self = Self([0, 0, 1, 0, 0, 0, 0]);
    /// Electric current.
    pub const CURRENT: Self = Self([0, 0, 0, 1, 0, 0, 0]);
    /// Thermodynamic temperature.
    pub const TEMPERATURE: Self = Self([0, 0, 0, 0, 1, 0, 0]);
    /// Amount of substance.
    pub const AMOUNT: Self = Self([0, 0, 0, 0, 0, 1, 0]);
    /// Luminous intensity.
    pub const LUMINOUS_INTENSITY: Self = Self([0, 0, 0, 0, 0, 0, 1]);
    /// Speed (L·T⁻¹).
    pub const SPEED: Self = Self([1, 0, -1, 0, 0, 0, 0]);
    /// Frequency (T⁻¹).
    pub const FREQUENCY: Self = Self([0, 0, -1, 0, 0, 0, 0]);
    /// Volume (L³).
    pub const VOLUME: Self = Self([3, 0, 0, 0, 0, 0, 0]);
    /// Force (L·M·T⁻²).
    pub const FORCE: Self = Self([1, 1, -2, 0, 0, 0, 0]);
    /// Pressure (L⁻¹·M·T⁻²).
    pub const PRESSURE: Self = Self([-1, 1, -2, 0, 0, 0, 0]);
    /// Energy (L²·M·T⁻²).
    pub const ENERGY: Self = Self([2, 1, -2, 0, 0, 0, 0]);
    /// Power (L²·M·T⁻³).
    pub const POWER: Self = Self([2, 1, -3, 0, 0, 0, 0]);

    /// Create a dimension from raw exponents.
    #[must_use]
    pub const fn new(exponents: [i8; 7]) -> Self {
        Self(exponents)
    }

    /// Raw exponents in L, M, T, I, Θ, N, J order.
    #[must_use]
    pub const fn exponents(&self) -> [i8; 7] {
        self.0
    }

    /// Returns true if every exponent is zero.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|e| *e == 0)
    }

    /// Dimension of a product.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Option<Self> {
        self.combine(other, i8::checked_add)
    }

    /// Dimension of a quotient.
    #[must_use]
    pub fn divide(&self, other: &Self) -> Option<Self> {
        self.combine(other, i8::checked_sub)
    }

    /// Dimension raised to an integer power.
    #[must_use]
    pub fn pow(&self, exponent: i32) -> Option<Self> {
        let exponent = i8::try_from(exponent).ok()?;
        let mut out = [0_i8; 7];
        for (slot, e) in out.iter_mut().zip(self.0) {
            *slot = e.checked_mul(exponent)?;
        }
        Some(Self(out))
    }

    fn combine(&self, other: &Self, op: fn(i8, i8) -> Option<i8>) -> Option<Self> {
        let mut out = [0_i8; 7];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = op(self.0[i], other.0[i])?;
        }
        Some(Self(out))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let mut first = true;
        for (symbol, e) in SYMBOLS.iter().zip(self.0) {
            if e == 0 {
                continue;
            }
            if !first {
                write!(f, "·")?;
            }
            first = false;
            if e == 1 {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}^{e}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_length_over_time() {
        assert_eq!(
            Dimension::LENGTH.divide(&Dimension::TIME),
            Some(Dimension::SPEED)
        );
    }

    #[test]
    fn test_force_composition() {
        let accel = Dimension::SPEED.divide(&Dimension::TIME).unwrap();
        assert_eq!(Dimension::MASS.multiply(&accel), Some(Dimension::FORCE));
    }

    #[test]
    fn test_pow() {
        assert_eq!(Dimension::LENGTH.pow(3), Some(Dimension::VOLUME));
        assert_eq!(Dimension::TIME.pow(-1), Some(Dimension::FREQUENCY));
        assert_eq!(Dimension::LENGTH.pow(0), Some(Dimension::NONE));
    }

    #[test]
    fn test_pow_overflow() {
        assert_eq!(Dimension::LENGTH.pow(1000), None);
        assert_eq!(Dimension::new([100, 0, 0, 0, 0, 0, 0]).pow(2), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimension::NONE.to_string(), "1");
        assert_eq!(Dimension::SPEED.to_string(), "L·T^-1");
        assert_eq!(Dimension::MASS.to_string(), "M");
    }
}
