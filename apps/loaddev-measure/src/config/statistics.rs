//! Velocity statistics configuration.

use serde::{Deserialize, Serialize};

/// Settings for the statistics accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// UCUM unit all statistics are reported in.
    #[serde(default = "default_velocity_unit")]
    pub velocity_unit: String,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            velocity_unit: default_velocity_unit(),
        }
    }
}

fn default_velocity_unit() -> String {
    "[ft_i]/s".to_string()
}
