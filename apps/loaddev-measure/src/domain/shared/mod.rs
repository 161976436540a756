//! Shared kernel: value objects and errors used by every domain module.

mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{Currency, Dimension, MonetaryAmount, Quantity, Scale, Unit, UnitConverter};
