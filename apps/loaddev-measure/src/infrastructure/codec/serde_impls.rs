//! `serde` integration for the measurement value objects.
//!
//! Records that derive `Serialize`/`Deserialize` can hold `Quantity`,
//! `Unit` and `MonetaryAmount` fields directly. Decoding delegates to
//! [`default_codec`] so the same validation applies everywhere.
//!
//! Encoding writes the fields straight to the serializer, so non-JSON
//! formats see plain numbers and strings. A decimal goes out as a number
//! when a binary integer or float carries its exact digits, and as decimal
//! text otherwise; decoding here accepts that text back.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::default_codec;
use super::field::{decimal_to_json, parse_decimal};
use crate::domain::shared::{MonetaryAmount, Quantity, Unit};
use crate::error::CodecError;

/// Decimal written as a number when that is exact, else as text.
struct ExactDecimal(Decimal);

impl Serialize for ExactDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.scale() == 0 {
            if let Some(integer) = value.to_i64() {
                return serializer.serialize_i64(integer);
            }
        } else if let Some(float) = value
            .to_f64()
            .filter(|f| f.is_finite() && f.to_string() == value.to_string())
        {
            return serializer.serialize_f64(float);
        }
        Serialize::serialize(&value, serializer)
    }
}

/// Turn a decimal string member back into a number before validation.
fn numeric_text_to_number(json: &mut Value, field: &str) {
    let Some(member) = json.get_mut(field) else {
        return;
    };
    if let Some(value) = member.as_str().and_then(parse_decimal) {
        *member = decimal_to_json(value);
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&default_codec().format_unit(self))
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Value::deserialize(deserializer)?;
        match default_codec().decode_unit(&json) {
            Ok(Some(unit)) => Ok(unit),
            Ok(None) => Err(de::Error::custom(CodecError::WrongTokenType {
                field: "unit",
                expected: "a string",
                found: "null".to_string(),
            })),
            Err(e) => Err(de::Error::custom(e)),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let codec = default_codec();
        let include_scale = codec.options().include_scale;
        let mut state = serializer.serialize_struct("Quantity", 2 + usize::from(include_scale))?;
        state.serialize_field("value", &ExactDecimal(self.value()))?;
        state.serialize_field("unit", &codec.format_unit(self.unit()))?;
        if include_scale {
            state.serialize_field("scale", &self.scale())?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut json = Value::deserialize(deserializer)?;
        numeric_text_to_number(&mut json, "value");
        default_codec()
            .decode_quantity(&json)
            .map_err(de::Error::custom)
    }
}

impl Serialize for MonetaryAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MonetaryAmount", 2)?;
        state.serialize_field("amount", &ExactDecimal(self.amount()))?;
        state.serialize_field("currency", self.currency().code())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for MonetaryAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut json = Value::deserialize(deserializer)?;
        numeric_text_to_number(&mut json, "amount");
        default_codec().decode_money(&json).map_err(de::Error::custom)
    }
}
