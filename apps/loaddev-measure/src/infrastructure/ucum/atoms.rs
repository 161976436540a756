//! UCUM atom and prefix tables.
//!
//! Factors are relative to the UCUM base units (m, g, s, A, K, mol, cd),
//! so the newton is 1000 g·m/s².

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::shared::{Dimension, Unit};

/// A unit atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Atom {
    pub symbol: &'static str,
    pub dimension: Dimension,
    pub factor: Decimal,
    pub offset: Decimal,
    /// Whether metric prefixes may be applied.
    pub metric: bool,
}

impl Atom {
    const fn metric(symbol: &'static str, dimension: Dimension, factor: Decimal) -> Self {
        Self {
            symbol,
            dimension,
            factor,
            offset: Decimal::ZERO,
            metric: true,
        }
    }

    const fn customary(symbol: &'static str, dimension: Dimension, factor: Decimal) -> Self {
        Self {
            symbol,
            dimension,
            factor,
            offset: Decimal::ZERO,
            metric: false,
        }
    }

    pub fn to_unit(self) -> Unit {
        Unit::new(self.symbol, self.dimension, self.factor, self.offset)
    }
}

/// A metric prefix as a power of ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Prefix {
    pub symbol: &'static str,
    pub exponent: i32,
}

impl Prefix {
    pub fn factor(self) -> Option<Decimal> {
        if self.exponent >= 0 {
            Decimal::try_from_i128_with_scale(10_i128.pow(self.exponent.unsigned_abs()), 0).ok()
        } else {
            Decimal::try_new(1, self.exponent.unsigned_abs()).ok()
        }
    }
}

pub(super) const ATOMS: &[Atom] = &[
    // Base units
    Atom::metric("m", Dimension::LENGTH, Decimal::ONE),
    Atom::metric("g", Dimension::MASS, Decimal::ONE),
    Atom::metric("s", Dimension::TIME, Decimal::ONE),
    Atom::metric("A", Dimension::CURRENT, Decimal::ONE),
    Atom::metric("K", Dimension::TEMPERATURE, Decimal::ONE),
    Atom::metric("mol", Dimension::AMOUNT, Decimal::ONE),
    Atom::metric("cd", Dimension::LUMINOUS_INTENSITY, Decimal::ONE),
    Atom::metric("rad", Dimension::NONE, Decimal::ONE),
    // Derived SI
    Atom::metric("Hz", Dimension::FREQUENCY, Decimal::ONE),
    Atom::metric("N", Dimension::FORCE, dec!(1000)),
    Atom::metric("Pa", Dimension::PRESSURE, dec!(1000)),
    Atom::metric("J", Dimension::ENERGY, dec!(1000)),
    Atom::metric("W", Dimension::POWER, dec!(1000)),
    Atom::metric("L", Dimension::VOLUME, dec!(0.001)),
    Atom::metric("l", Dimension::VOLUME, dec!(0.001)),
    Atom::metric("t", Dimension::MASS, dec!(1000000)),
    Atom::metric("bar", Dimension::PRESSURE, dec!(100000000)),
    // Time
    Atom::customary("min", Dimension::TIME, dec!(60)),
    Atom::customary("h", Dimension::TIME, dec!(3600)),
    Atom::customary("d", Dimension::TIME, dec!(86400)),
    Atom::customary("wk", Dimension::TIME, dec!(604800)),
    Atom::customary("a", Dimension::TIME, dec!(31557600)),
    // Dimensionless
    Atom::customary("deg", Dimension::NONE, dec!(0.0174532925199432957692369077)),
    Atom::customary("%", Dimension::NONE, dec!(0.01)),
    // International customary
    Atom::customary("[in_i]", Dimension::LENGTH, dec!(0.0254)),
    Atom::customary("[ft_i]", Dimension::LENGTH, dec!(0.3048)),
    Atom::customary("[yd_i]", Dimension::LENGTH, dec!(0.9144)),
    Atom::customary("[mi_i]", Dimension::LENGTH, dec!(1609.344)),
    Atom::customary("[nmi_i]", Dimension::LENGTH, dec!(1852)),
    Atom::customary("[lb_av]", Dimension::MASS, dec!(453.59237)),
    Atom::customary("[oz_av]", Dimension::MASS, dec!(28.349523125)),
    Atom::customary("[gr]", Dimension::MASS, dec!(0.06479891)),
    Atom::customary("[lbf_av]", Dimension::FORCE, dec!(4448.2216152605)),
    Atom::customary("[psi]", Dimension::PRESSURE, dec!(6894757.2931683613367226734453)),
    // Temperature
    Atom {
        symbol: "Cel",
        dimension: Dimension::TEMPERATURE,
        factor: Decimal::ONE,
        offset: dec!(273.15),
        metric: false,
    },
    Atom {
        symbol: "[degF]",
        dimension: Dimension::TEMPERATURE,
        factor: dec!(0.5555555555555555555555555556),
        offset: dec!(255.37222222222222222222222222),
        metric: false,
    },
];

/// Metric prefixes, two-letter symbols first.
pub(super) const PREFIXES: &[Prefix] = &[
    Prefix { symbol: "da", exponent: 1 },
    Prefix { symbol: "Y", exponent: 24 },
    Prefix { symbol: "Z", exponent: 21 },
    Prefix { symbol: "E", exponent: 18 },
    Prefix { symbol: "P", exponent: 15 },
    Prefix { symbol: "T", exponent: 12 },
    Prefix { symbol: "G", exponent: 9 },
    Prefix { symbol: "M", exponent: 6 },
    Prefix { symbol: "k", exponent: 3 },
    Prefix { symbol: "h", exponent: 2 },
    Prefix { symbol: "d", exponent: -1 },
    Prefix { symbol: "c", exponent: -2 },
    Prefix { symbol: "m", exponent: -3 },
    Prefix { symbol: "u", exponent: -6 },
    Prefix { symbol: "n", exponent: -9 },
    Prefix { symbol: "p", exponent: -12 },
    Prefix { symbol: "f", exponent: -15 },
    Prefix { symbol: "a", exponent: -18 },
    Prefix { symbol: "z", exponent: -21 },
    Prefix { symbol: "y", exponent: -24 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_symbols_unique() {
        for (i, a) in ATOMS.iter().enumerate() {
            assert!(
                ATOMS[i + 1..].iter().all(|b| b.symbol != a.symbol),
                "duplicate atom {}",
                a.symbol
            );
        }
    }

    #[test]
    fn test_prefix_factors() {
        let kilo = PREFIXES.iter().find(|p| p.symbol == "k").unwrap();
        assert_eq!(kilo.factor(), Some(dec!(1000)));
        let milli = PREFIXES.iter().find(|p| p.symbol == "m").unwrap();
        assert_eq!(milli.factor(), Some(dec!(0.001)));
        for prefix in PREFIXES {
            assert!(prefix.factor().is_some(), "{}", prefix.symbol);
        }
    }

    #[test]
    fn test_customary_factors_are_exact() {
        let inch = ATOMS.iter().find(|a| a.symbol == "[in_i]").unwrap();
        let foot = ATOMS.iter().find(|a| a.symbol == "[ft_i]").unwrap();
        assert_eq!(inch.factor * dec!(12), foot.factor);
    }
}
