//! UCUM unit format adapter.
//!
//! Implements [`UnitFormat`] for the case-sensitive UCUM syntax used on the
//! wire (`m/s`, `[in_i]`, `kg.m/s2`, `Cel`). The atom table is built once per
//! process and shared through [`UcumFormat::shared`].

mod atoms;
mod parser;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use atoms::{ATOMS, Atom, PREFIXES};
use parser::Parser;

use crate::domain::shared::Unit;
use crate::infrastructure::codec::{ParsedUnit, UnitFormat, UnitParseError};

/// UCUM parser and formatter.
#[derive(Debug)]
pub struct UcumFormat {
    atoms: HashMap<&'static str, Atom>,
}

impl UcumFormat {
    /// Build a new format with its own atom table.
    ///
    /// Prefer [`UcumFormat::shared`] outside of tests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            atoms: ATOMS.iter().map(|atom| (atom.symbol, *atom)).collect(),
        }
    }

    /// Process-wide instance, initialized on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<UcumFormat>> = OnceLock::new();
        SHARED
            .get_or_init(|| {
                let format = Self::new();
                tracing::debug!(
                    atoms = format.atoms.len(),
                    prefixes = PREFIXES.len(),
                    "Initialized UCUM unit table"
                );
                Arc::new(format)
            })
            .clone()
    }

    /// Resolve a single token (no operators) to a unit.
    fn resolve(&self, token: &str) -> Option<Unit> {
        if let Some(atom) = self.atoms.get(token) {
            return Some(atom.to_unit());
        }
        PREFIXES.iter().find_map(|prefix| {
            let rest = token.strip_prefix(prefix.symbol)?;
            let atom = self.atoms.get(rest).filter(|a| a.metric)?;
            let factor = prefix.factor()?.checked_mul(atom.factor)?;
            Some(Unit::new(token, atom.dimension, factor, atom.offset))
        })
    }
}

impl Default for UcumFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitFormat for UcumFormat {
    fn parse(&self, text: &str) -> Result<ParsedUnit, UnitParseError> {
        Parser::new(self, text).parse()
    }

    /// Returns the symbol as parsed.
    ///
    /// Equivalent spellings (`m/s`, `m.s-1`) are equal units but each keeps
    /// its own token, so a decoded unit is written back the way it arrived.
    /// Built-in constants carry their canonical UCUM symbol.
    fn format(&self, unit: &Unit) -> String {
        unit.symbol().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Dimension;
    use crate::domain::shared::value_objects::unit::{
        CELSIUS, CENTIMETRE, FAHRENHEIT, FOOT_PER_SECOND, INCH, KILOGRAM, METRE,
        METRE_PER_SECOND, MILLIMETRE, ONE, PERCENT,
    };
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn parse(text: &str) -> ParsedUnit {
        UcumFormat::new().parse(text).unwrap()
    }

    #[test_case("m", &METRE ; "metre")]
    #[test_case("m/s", &METRE_PER_SECOND ; "metre per second")]
    #[test_case("[in_i]", &INCH ; "inch")]
    #[test_case("[ft_i]/s", &FOOT_PER_SECOND ; "foot per second")]
    #[test_case("kg", &KILOGRAM ; "kilogram")]
    #[test_case("cm", &CENTIMETRE ; "centimetre")]
    #[test_case("mm", &MILLIMETRE ; "millimetre")]
    #[test_case("Cel", &CELSIUS ; "celsius")]
    #[test_case("[degF]", &FAHRENHEIT ; "fahrenheit")]
    #[test_case("%", &PERCENT ; "percent")]
    fn test_parse_known_units(text: &str, expected: &Unit) {
        let parsed = parse(text);
        assert_eq!(&parsed.unit, expected);
        assert_eq!(parsed.consumed, text.len());
        assert_eq!(parsed.unit.symbol(), text);
    }

    #[test]
    fn test_empty_is_dimensionless() {
        let parsed = parse("");
        assert_eq!(parsed.unit, ONE);
        assert_eq!(parsed.consumed, 0);
    }

    #[test]
    fn test_prefix_parse_stops_before_trailing_text() {
        let parsed = parse("m/sX");
        assert_eq!(parsed.consumed, 3);
        assert_eq!(parsed.unit, METRE_PER_SECOND);
        assert_eq!(parsed.unit.symbol(), "m/s");
    }

    #[test]
    fn test_derived_units_match_compositions() {
        assert_eq!(parse("kg.m/s2").unit, parse("N").unit);
        assert_eq!(parse("N.m").unit, parse("J").unit);
        assert_eq!(parse("s-1").unit, parse("Hz").unit);
        assert_eq!(parse("/s").unit, parse("Hz").unit);
        assert_eq!(parse("(m/s)2").unit, parse("m2/s2").unit);
    }

    #[test]
    fn test_exponents() {
        assert_eq!(parse("m3").unit.dimension(), Dimension::VOLUME);
        assert_eq!(parse("m+2").unit.dimension(), parse("m2").unit.dimension());
        assert_eq!(parse("L").unit, parse("dm3").unit);
    }

    #[test]
    fn test_atoms_win_over_prefixes() {
        assert_eq!(parse("cd").unit.dimension(), Dimension::LUMINOUS_INTENSITY);
        assert_eq!(parse("min").unit.factor(), dec!(60));
        assert_eq!(parse("h").unit.factor(), dec!(3600));
        assert_eq!(parse("dam").unit.factor(), dec!(10));
        assert_eq!(parse("hPa").unit.factor(), dec!(100000));
    }

    #[test]
    fn test_prefixes_rejected_on_customary_units() {
        let err = UcumFormat::new().parse("k[in_i]").unwrap_err();
        assert_eq!(err.index, 0);
    }

    #[test]
    fn test_annotations_and_factors() {
        let parsed = parse("mg{dry}");
        assert_eq!(parsed.consumed, 7);
        assert_eq!(parsed.unit.factor(), dec!(0.001));

        assert_eq!(parse("{shots}").unit, ONE);
        assert_eq!(parse("100").unit.factor(), dec!(100));
    }

    #[test]
    fn test_errors_report_index() {
        let format = UcumFormat::new();
        assert_eq!(format.parse("X").unwrap_err().index, 0);
        assert_eq!(format.parse("m/").unwrap_err().index, 2);
        assert_eq!(format.parse("m/Xs").unwrap_err().index, 2);
        assert_eq!(format.parse("(m").unwrap_err().index, 2);
        assert_eq!(format.parse("{abc").unwrap_err().index, 0);
        assert_eq!(format.parse("m..s").unwrap_err().index, 2);
    }

    #[test]
    fn test_format_returns_symbol() {
        let format = UcumFormat::new();
        let unit = parse("[ft_i]/s").unit;
        assert_eq!(format.format(&unit), "[ft_i]/s");
        assert_eq!(format.format(&ONE), "");
    }

    #[test]
    fn test_format_keeps_parsed_spelling() {
        let format = UcumFormat::new();
        let unit = parse("m.s-1").unit;
        assert_eq!(unit, METRE_PER_SECOND);
        assert_eq!(format.format(&unit), "m.s-1");
        assert_eq!(format.format(&METRE_PER_SECOND), "m/s");
    }

    #[test]
    fn test_nesting_limit() {
        let depth = parser::MAX_DEPTH;
        let nested = format!("{}m{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&nested).unit, METRE);

        let too_deep = format!("{}m{}", "(".repeat(depth + 1), ")".repeat(depth + 1));
        let err = UcumFormat::new().parse(&too_deep).unwrap_err();
        assert_eq!(err.index, depth);
        assert!(err.message.contains("nesting too deep"));
    }

    #[test]
    fn test_hostile_nesting_is_rejected() {
        let text = format!("{}m{}", "(".repeat(5_000), ")".repeat(5_000));
        assert!(UcumFormat::new().parse(&text).is_err());
    }

    #[test]
    fn test_shared_is_single_instance() {
        assert!(Arc::ptr_eq(&UcumFormat::shared(), &UcumFormat::shared()));
    }
}
