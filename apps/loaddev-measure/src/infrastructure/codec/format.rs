//! Unit format port.
//!
//! The codec depends on this trait only, so replacing the unit library means
//! writing a new adapter rather than touching the validation pipeline.

use std::fmt;

use thiserror::Error;

use crate::domain::shared::Unit;

/// Result of a prefix parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit {
    /// The unit built from the consumed text.
    pub unit: Unit,
    /// Number of bytes consumed from the start of the input.
    pub consumed: usize,
}

/// Parse failure reported by a [`UnitFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid UCUM unit syntax at index {index}: {message}")]
pub struct UnitParseError {
    /// Byte offset where parsing failed.
    pub index: usize,
    /// Description of the failure.
    pub message: String,
}

impl UnitParseError {
    /// Create a new parse error.
    #[must_use]
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }
}

/// Parses and formats unit tokens.
///
/// `parse` may stop before the end of the input and report how much it
/// consumed; rejecting trailing text is the caller's job.
pub trait UnitFormat: Send + Sync + fmt::Debug {
    /// Parse the longest unit expression at the start of `text`.
    fn parse(&self, text: &str) -> Result<ParsedUnit, UnitParseError>;

    /// Token for `unit`. Parsed units keep the spelling they were parsed
    /// from; `parse(format(u))` is always equal to `u`.
    fn format(&self, unit: &Unit) -> String;
}
