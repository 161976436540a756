//! Ballistics aggregations over shot measurements.

mod math;
pub mod velocity_stats;

pub use math::sqrt_decimal;
pub use velocity_stats::{VelocityStats, VelocitySummary};
