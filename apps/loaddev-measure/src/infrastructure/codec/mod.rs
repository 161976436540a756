//! JSON codec for units, quantities and monetary amounts.

mod field;
mod format;
mod measure;
mod serde_impls;

pub use field::FieldValue;
pub use format::{ParsedUnit, UnitFormat, UnitParseError};
pub use measure::{CodecOptions, MeasureCodec, default_codec};
