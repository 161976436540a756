//! Library-neutral view of decoded JSON members.
//!
//! The validation pipeline in [`super::MeasureCodec`] only sees
//! [`FieldValue`]s, never `serde_json` nodes, so the defaulting and error
//! rules stay the same whichever JSON library feeds them.

use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::error::CodecError;

/// Shape of one member of a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Key absent (or the parent is not an object).
    Missing,
    /// Key present with JSON null.
    Null,
    /// A JSON number, in its exact source text.
    Number(String),
    /// A JSON string.
    Text(&'a str),
    /// Any other JSON value (bool, array, object), rendered as JSON.
    Other(String),
}

impl<'a> FieldValue<'a> {
    /// Classify an optional `serde_json` value.
    #[must_use]
    pub fn from_json(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Missing,
            Some(Value::Null) => Self::Null,
            Some(Value::Number(n)) => Self::Number(n.to_string()),
            Some(Value::String(s)) => Self::Text(s),
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Classify `root[name]`. A non-object root has no members.
    #[must_use]
    pub fn member(root: &'a Value, name: &str) -> Self {
        Self::from_json(root.as_object().and_then(|object| object.get(name)))
    }

    /// Returns true for `Missing` and `Null`.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Missing | Self::Null)
    }

    /// JSON-like rendering for error messages.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Missing => "<missing>".to_string(),
            Self::Null => "null".to_string(),
            Self::Number(text) | Self::Other(text) => text.clone(),
            Self::Text(text) => format!("{text:?}"),
        }
    }
}

/// Require a numeric field and parse it exactly.
pub(super) fn decimal(field: &'static str, value: &FieldValue<'_>) -> Result<Decimal, CodecError> {
    let invalid = || CodecError::InvalidNumericValue {
        field,
        token: value.token(),
    };
    match value {
        FieldValue::Number(text) => parse_decimal(text).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Zero padding allowed when moving the decimal point of an exponent form.
const MAX_EXPONENT_PADDING: usize = 64;

/// Parse a JSON number without rounding.
///
/// Numbers needing more precision than a `Decimal` holds are rejected. An
/// exponent form is accepted exactly when its plain spelling would be.
pub(super) fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_str_exact(&expand_exponent(text)?).ok()
    } else {
        Decimal::from_str_exact(text).ok()
    }
}

/// Rewrite `d.ddde±x` as plain decimal text.
fn expand_exponent(text: &str) -> Option<String> {
    let (mantissa, exponent) = text.split_once(['e', 'E'])?;
    let exponent: i64 = exponent.parse().ok()?;
    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{int}{frac}");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let len = i64::try_from(digits.len()).ok()?;
    let point = i64::try_from(int.len()).ok()?.checked_add(exponent)?;
    let padding = if point < 0 {
        point.unsigned_abs()
    } else {
        point.saturating_sub(len).unsigned_abs()
    };
    if padding > MAX_EXPONENT_PADDING as u64 {
        return None;
    }

    let plain = if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if point >= len {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    };
    Some(format!("{sign}{plain}"))
}

/// Render a decimal as a JSON number with its exact digits.
pub(super) fn decimal_to_json(value: Decimal) -> Value {
    let text = value.to_string();
    match text.parse::<Number>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::String(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_classification() {
        let root: Value =
            serde_json::from_str(r#"{"n": 1.50, "s": "m", "z": null, "b": true, "a": [1]}"#)
                .unwrap();
        assert_eq!(FieldValue::member(&root, "n"), FieldValue::Number("1.50".to_string()));
        assert_eq!(FieldValue::member(&root, "s"), FieldValue::Text("m"));
        assert_eq!(FieldValue::member(&root, "z"), FieldValue::Null);
        assert_eq!(FieldValue::member(&root, "b"), FieldValue::Other("true".to_string()));
        assert_eq!(FieldValue::member(&root, "a"), FieldValue::Other("[1]".to_string()));
        assert_eq!(FieldValue::member(&root, "missing"), FieldValue::Missing);
    }

    #[test]
    fn test_non_object_root_has_no_members() {
        let root = json!([1, 2]);
        assert_eq!(FieldValue::member(&root, "value"), FieldValue::Missing);
    }

    #[test]
    fn test_number_text_is_exact() {
        let root: Value = serde_json::from_str(r#"{"v": 39.995}"#).unwrap();
        let field = FieldValue::member(&root, "v");
        assert_eq!(decimal("v", &field).unwrap().to_string(), "39.995");
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(parse_decimal("2800"), Some(dec!(2800)));
        assert_eq!(parse_decimal("-0.25"), Some(dec!(-0.25)));
        assert_eq!(parse_decimal("1.5e3"), Some(dec!(1500)));
        assert_eq!(parse_decimal("2E-2"), Some(dec!(0.02)));
        assert_eq!(parse_decimal("1e400"), None);
        assert_eq!(parse_decimal("-4.2E+1"), Some(dec!(-42)));
        assert_eq!(parse_decimal("12.5e-1"), Some(dec!(1.25)));
        assert_eq!(parse_decimal("0.00000000000000000000000000000001"), None);
    }

    #[test]
    fn test_exponent_form_is_never_rounded() {
        let long = "1.2345678901234567890123456789012";
        assert_eq!(parse_decimal(long), None);
        assert_eq!(parse_decimal(&format!("{long}e0")), None);
        assert_eq!(parse_decimal(&format!("{long}E2")), None);
        assert_eq!(parse_decimal("1e-1000000000"), None);
        assert_eq!(
            parse_decimal("1.50e0").map(|d| d.to_string()),
            Some("1.50".to_string())
        );
    }

    #[test]
    fn test_decimal_rejects_text() {
        let err = decimal("value", &FieldValue::Text("abc")).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidNumericValue {
                field: "value",
                token: "\"abc\"".to_string()
            }
        );
    }

    #[test]
    fn test_decimal_to_json_keeps_digits() {
        assert_eq!(decimal_to_json(dec!(39.995)).to_string(), "39.995");
        assert_eq!(decimal_to_json(dec!(1.50)).to_string(), "1.50");
        assert_eq!(decimal_to_json(dec!(-3)).to_string(), "-3");
    }
}
