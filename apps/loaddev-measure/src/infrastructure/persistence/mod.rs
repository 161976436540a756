//! Storage boundary adapters.

mod json_column;

pub use json_column::{JsonColumnCodec, PersistenceError};
