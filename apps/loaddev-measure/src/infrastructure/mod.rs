//! Infrastructure layer: unit format, JSON codec and storage converters.

pub mod codec;
pub mod persistence;
pub mod ucum;
