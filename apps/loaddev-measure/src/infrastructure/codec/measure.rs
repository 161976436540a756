//! Quantity, unit and money JSON codec.
//!
//! Wire shapes:
//!
//! ```text
//! Quantity:        {"value": <number>, "unit": "<ucum>", "scale": "ABSOLUTE"|"RELATIVE"}
//! Unit:            "<ucum>" | null
//! MonetaryAmount:  {"amount": <number>, "currency": "<ISO-4217>"}
//! ```
//!
//! Quantity validation runs in a fixed order and stops at the first failure:
//! value presence, value type, unit presence, unit type, unit full parse,
//! then scale. An absent or null scale means `ABSOLUTE`.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::{self, FieldValue, decimal_to_json};
use super::format::{UnitFormat, UnitParseError};
use crate::domain::shared::{Currency, MonetaryAmount, Quantity, Scale, Unit};
use crate::error::CodecError;
use crate::infrastructure::ucum::UcumFormat;

const QUANTITY: &str = "Quantity";
const MONETARY_AMOUNT: &str = "MonetaryAmount";

/// Encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecOptions {
    /// Write `scale` when encoding quantities.
    ///
    /// Off for wire responses, where decoders default it; on for storage.
    #[serde(default)]
    pub include_scale: bool,
}

/// Bidirectional codec for measurement values.
#[derive(Debug, Clone)]
pub struct MeasureCodec {
    format: Arc<dyn UnitFormat>,
    options: CodecOptions,
}

/// Process-wide codec over the shared UCUM format with default options.
pub fn default_codec() -> &'static MeasureCodec {
    static CODEC: OnceLock<MeasureCodec> = OnceLock::new();
    CODEC.get_or_init(MeasureCodec::ucum)
}

impl MeasureCodec {
    /// Create a codec over any unit format.
    #[must_use]
    pub fn new(format: Arc<dyn UnitFormat>) -> Self {
        Self {
            format,
            options: CodecOptions::default(),
        }
    }

    /// Codec over the shared UCUM format.
    #[must_use]
    pub fn ucum() -> Self {
        Self::new(UcumFormat::shared())
    }

    /// Replace the encoding options.
    #[must_use]
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Current encoding options.
    #[must_use]
    pub const fn options(&self) -> CodecOptions {
        self.options
    }

    // =========================================================================
    // Unit
    // =========================================================================

    /// Parse unit text, requiring the whole input to be consumed.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidUnitSyntax` when the format rejects the
    /// text or stops before its end (`"m/sX"`).
    pub fn parse_unit(&self, text: &str) -> Result<Unit, CodecError> {
        let parsed = self
            .format
            .parse(text)
            .map_err(|source| CodecError::InvalidUnitSyntax {
                text: text.to_string(),
                source,
            })?;

        if parsed.consumed < text.len() {
            let rest = text.get(parsed.consumed..).unwrap_or_default();
            return Err(CodecError::InvalidUnitSyntax {
                text: text.to_string(),
                source: UnitParseError::new(
                    parsed.consumed,
                    format!("unexpected trailing text '{rest}'"),
                ),
            });
        }
        Ok(parsed.unit)
    }

    /// Unit token as the format writes it (the parsed spelling for decoded
    /// units).
    #[must_use]
    pub fn format_unit(&self, unit: &Unit) -> String {
        self.format.format(unit)
    }

    /// Encode a unit; `None` becomes JSON null.
    #[must_use]
    pub fn encode_unit(&self, unit: Option<&Unit>) -> Value {
        unit.map_or(Value::Null, |unit| Value::String(self.format_unit(unit)))
    }

    /// Decode a bare unit token; JSON null gives `None`.
    ///
    /// # Errors
    ///
    /// `WrongTokenType` for non-string JSON, `InvalidUnitSyntax` for text
    /// that does not fully parse.
    pub fn decode_unit(&self, json: &Value) -> Result<Option<Unit>, CodecError> {
        let result = match FieldValue::from_json(Some(json)) {
            FieldValue::Null => Ok(None),
            FieldValue::Text(text) => self.parse_unit(text).map(Some),
            other => Err(CodecError::WrongTokenType {
                field: "unit",
                expected: "a string or null",
                found: other.token(),
            }),
        };
        result.inspect_err(|e| log_rejection("unit", e))
    }

    // =========================================================================
    // Quantity
    // =========================================================================

    /// Encode a quantity as `{value, unit}`, plus `scale` when configured.
    #[must_use]
    pub fn encode_quantity(&self, quantity: &Quantity) -> Value {
        let mut object = Map::new();
        object.insert("value".to_string(), decimal_to_json(quantity.value()));
        object.insert(
            "unit".to_string(),
            Value::String(self.format_unit(quantity.unit())),
        );
        if self.options.include_scale {
            object.insert(
                "scale".to_string(),
                Value::String(quantity.scale().as_str().to_string()),
            );
        }
        Value::Object(object)
    }

    /// Decode a quantity object.
    ///
    /// # Errors
    ///
    /// Returns the first failing check of the validation order.
    pub fn decode_quantity(&self, json: &Value) -> Result<Quantity, CodecError> {
        self.quantity_from_fields(
            FieldValue::member(json, "value"),
            FieldValue::member(json, "unit"),
            FieldValue::member(json, "scale"),
        )
        .inspect_err(|e| log_rejection(QUANTITY, e))
    }

    /// Validate already-classified quantity members.
    pub fn quantity_from_fields(
        &self,
        value: FieldValue<'_>,
        unit: FieldValue<'_>,
        scale: FieldValue<'_>,
    ) -> Result<Quantity, CodecError> {
        let value = match value {
            FieldValue::Missing => {
                return Err(CodecError::MissingField {
                    field: "value",
                    target: QUANTITY,
                });
            }
            present => field::decimal("value", &present)?,
        };

        let unit = match unit {
            FieldValue::Missing => {
                return Err(CodecError::MissingField {
                    field: "unit",
                    target: QUANTITY,
                });
            }
            FieldValue::Text(text) => self.parse_unit(text)?,
            other => {
                return Err(CodecError::WrongTokenType {
                    field: "unit",
                    expected: "a string",
                    found: other.token(),
                });
            }
        };

        let scale = match scale {
            FieldValue::Missing | FieldValue::Null => Scale::default(),
            FieldValue::Text(token) => {
                Scale::from_token(token).ok_or_else(|| CodecError::InvalidScale {
                    value: token.to_string(),
                })?
            }
            other => {
                return Err(CodecError::InvalidScale {
                    value: other.token(),
                });
            }
        };

        Ok(Quantity::with_scale(value, unit, scale))
    }

    // =========================================================================
    // MonetaryAmount
    // =========================================================================

    /// Encode an amount as `{amount, currency}` with its exact digits.
    #[must_use]
    pub fn encode_money(&self, money: &MonetaryAmount) -> Value {
        let mut object = Map::new();
        object.insert("amount".to_string(), decimal_to_json(money.amount()));
        object.insert(
            "currency".to_string(),
            Value::String(money.currency().code().to_string()),
        );
        Value::Object(object)
    }

    /// Decode a monetary amount object.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent or null member, then
    /// `InvalidNumericValue`, `WrongTokenType` or `InvalidCurrency`.
    pub fn decode_money(&self, json: &Value) -> Result<MonetaryAmount, CodecError> {
        self.money_from_fields(
            FieldValue::member(json, "amount"),
            FieldValue::member(json, "currency"),
        )
        .inspect_err(|e| log_rejection(MONETARY_AMOUNT, e))
    }

    /// Validate already-classified monetary members.
    pub fn money_from_fields(
        &self,
        amount: FieldValue<'_>,
        currency: FieldValue<'_>,
    ) -> Result<MonetaryAmount, CodecError> {
        for (field, value) in [("amount", &amount), ("currency", &currency)] {
            if value.is_absent() {
                return Err(CodecError::MissingField {
                    field,
                    target: MONETARY_AMOUNT,
                });
            }
        }

        let amount = field::decimal("amount", &amount)?;
        let currency = match currency {
            FieldValue::Text(code) => {
                Currency::from_code(code).map_err(|source| CodecError::InvalidCurrency {
                    code: code.to_string(),
                    source,
                })?
            }
            other => {
                return Err(CodecError::WrongTokenType {
                    field: "currency",
                    expected: "a string",
                    found: other.token(),
                });
            }
        };

        Ok(MonetaryAmount::new(amount, currency))
    }
}

fn log_rejection(target: &str, error: &CodecError) {
    tracing::debug!(
        target_type = target,
        kind = error.kind().reason(),
        error = %error,
        "Rejected measurement payload"
    );
}
