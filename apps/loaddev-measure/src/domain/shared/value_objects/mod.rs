//! Value objects shared across the measurement domain.

pub mod currency;
pub mod dimension;
pub mod money;
pub mod quantity;
pub mod unit;

pub use currency::Currency;
pub use dimension::Dimension;
pub use money::MonetaryAmount;
pub use quantity::{Quantity, Scale};
pub use unit::{Unit, UnitConverter};
