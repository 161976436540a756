// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Loaddev Measure - typed measurement codec and velocity statistics.
//!
//! # Architecture (inside → outside)
//!
//! - **Domain**: value objects with exact decimal arithmetic
//!   - `shared`: `Unit`, `Dimension`, `Quantity`, `Scale`, `Currency`,
//!     `MonetaryAmount`, `DomainError`
//!   - `ballistics`: `VelocityStats`, a persistent accumulator for shot
//!     velocities
//!
//! - **Infrastructure**: adapters
//!   - `ucum`: UCUM unit parser/formatter, one shared table per process
//!   - `codec`: JSON encode/decode behind the `UnitFormat` port
//!   - `persistence`: JSON-column converters for relational storage
//!
//! - **Config / Observability**: YAML configuration and `tracing` setup
//!
//! # Example
//!
//! ```rust,ignore
//! use loaddev_measure::{MeasureCodec, VelocityStats};
//!
//! let codec = MeasureCodec::ucum();
//! let shots = [r#"{"value": 2800, "unit": "[ft_i]/s"}"#, r#"{"value": 853.44, "unit": "m/s"}"#]
//!     .iter()
//!     .map(|s| codec.decode_quantity(&serde_json::from_str(s)?))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let stats = VelocityStats::compute(&shots, codec.parse_unit("[ft_i]/s")?)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Domain layer - value objects and statistics with no I/O.
pub mod domain;

/// Codec error taxonomy.
pub mod error;

/// Infrastructure layer - unit format, codec and storage adapters.
pub mod infrastructure;

/// Logging setup.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use domain::ballistics::{VelocityStats, VelocitySummary};
pub use domain::shared::{
    Currency, Dimension, DomainError, MonetaryAmount, Quantity, Scale, Unit, UnitConverter,
};
pub use error::{CodecError, ErrorKind};
pub use infrastructure::codec::{
    CodecOptions, FieldValue, MeasureCodec, ParsedUnit, UnitFormat, UnitParseError,
    default_codec,
};
pub use infrastructure::persistence::{JsonColumnCodec, PersistenceError};
pub use infrastructure::ucum::UcumFormat;

/// Well-known unit constants.
pub mod units {
    pub use crate::domain::shared::value_objects::unit::{
        CELSIUS, CENTIMETRE, FAHRENHEIT, FOOT, FOOT_PER_SECOND, GRAIN, GRAM, HOUR, INCH,
        KELVIN, KILOGRAM, METRE, METRE_PER_SECOND, MILE, MILLIMETRE, MINUTE, ONE, OUNCE,
        PERCENT, POUND, SECOND, YARD,
    };
}
