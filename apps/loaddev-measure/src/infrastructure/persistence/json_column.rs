//! JSON-column converters for relational storage.
//!
//! Quantities are stored with their scale so that a relative temperature
//! difference reads back as relative. A value that fails to decode is
//! corrupted data: it is logged at error level and never retried.

use serde_json::Value;
use thiserror::Error;

use crate::domain::shared::{MonetaryAmount, Quantity};
use crate::error::{CodecError, ErrorKind};
use crate::infrastructure::codec::{CodecOptions, MeasureCodec};

/// Storage-side decode/encode failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A required field is absent from the stored JSON.
    #[error("Failed to parse {target} JSON: missing field '{field}'")]
    MissingField {
        /// Stored type.
        target: &'static str,
        /// Field name.
        field: &'static str,
    },

    /// The column does not hold valid JSON.
    #[error("Failed to parse {target} JSON: {source}")]
    MalformedJson {
        /// Stored type.
        target: &'static str,
        /// Parser error.
        source: serde_json::Error,
    },

    /// The stored unit cannot be parsed.
    #[error("Failed to parse {target} JSON: {source}")]
    InvalidUnit {
        /// Stored type.
        target: &'static str,
        /// Codec error.
        source: CodecError,
    },

    /// Any other invalid stored value (number, scale, currency).
    #[error("Failed to parse {target} JSON: {source}")]
    InvalidValue {
        /// Stored type.
        target: &'static str,
        /// Codec error.
        source: CodecError,
    },

    /// Encoding to JSON text failed.
    #[error("Failed to write {target} JSON: {source}")]
    Serialization {
        /// Stored type.
        target: &'static str,
        /// Serializer error.
        source: serde_json::Error,
    },
}

impl PersistenceError {
    fn from_codec(target: &'static str, error: CodecError) -> Self {
        match (error.kind(), error.field()) {
            (ErrorKind::MissingField, Some(field)) => Self::MissingField { target, field },
            (ErrorKind::InvalidUnitSyntax, _) | (ErrorKind::WrongTokenType, Some("unit")) => {
                Self::InvalidUnit {
                    target,
                    source: error,
                }
            }
            _ => Self::InvalidValue {
                target,
                source: error,
            },
        }
    }
}

/// Converter pair between value objects and JSON column text.
#[derive(Debug, Clone)]
pub struct JsonColumnCodec {
    codec: MeasureCodec,
}

impl Default for JsonColumnCodec {
    fn default() -> Self {
        Self::new(MeasureCodec::ucum())
    }
}

impl JsonColumnCodec {
    /// Wrap a codec; `scale` is always written regardless of its options.
    #[must_use]
    pub fn new(codec: MeasureCodec) -> Self {
        Self {
            codec: codec.with_options(CodecOptions {
                include_scale: true,
            }),
        }
    }

    /// `Quantity` → column text.
    pub fn quantity_to_column(&self, quantity: &Quantity) -> Result<String, PersistenceError> {
        write_json("Quantity", &self.codec.encode_quantity(quantity))
    }

    /// Column text → `Quantity`.
    pub fn quantity_from_column(&self, text: &str) -> Result<Quantity, PersistenceError> {
        let json = read_json("Quantity", text)?;
        self.codec
            .decode_quantity(&json)
            .map_err(|e| corrupted(PersistenceError::from_codec("Quantity", e)))
    }

    /// `MonetaryAmount` → column text.
    pub fn money_to_column(&self, money: &MonetaryAmount) -> Result<String, PersistenceError> {
        write_json("MonetaryAmount", &self.codec.encode_money(money))
    }

    /// Column text → `MonetaryAmount`.
    pub fn money_from_column(&self, text: &str) -> Result<MonetaryAmount, PersistenceError> {
        let json = read_json("MonetaryAmount", text)?;
        self.codec
            .decode_money(&json)
            .map_err(|e| corrupted(PersistenceError::from_codec("MonetaryAmount", e)))
    }
}

fn read_json(target: &'static str, text: &str) -> Result<Value, PersistenceError> {
    serde_json::from_str(text)
        .map_err(|source| corrupted(PersistenceError::MalformedJson { target, source }))
}

fn write_json(target: &'static str, json: &Value) -> Result<String, PersistenceError> {
    serde_json::to_string(json).map_err(|source| PersistenceError::Serialization { target, source })
}

fn corrupted(error: PersistenceError) -> PersistenceError {
    tracing::error!(error = %error, "Corrupted measurement column");
    error
}
