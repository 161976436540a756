//! Configuration loading for the measurement tools.
//!
//! Provides YAML loading, environment variable interpolation and
//! validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use loaddev_measure::config::load_config;
//!
//! // Load from default path (measure.yaml)
//! let config = load_config(None)?;
//!
//! // Reporting unit for velocity statistics
//! let unit = config.velocity_unit()?;
//! ```

mod observability;
mod statistics;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::{Dimension, Unit};
use crate::infrastructure::codec::{CodecOptions, default_codec};

pub use observability::{LOG_FORMATS, LOG_LEVELS, LoggingConfig};
pub use statistics::StatisticsConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Codec encoding options.
    #[serde(default)]
    pub codec: CodecOptions,
    /// Statistics settings.
    #[serde(default)]
    pub statistics: StatisticsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Reporting unit for velocity statistics.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the unit does not parse or
    /// is not a speed.
    pub fn velocity_unit(&self) -> Result<Unit, ConfigError> {
        let text = &self.statistics.velocity_unit;
        let unit = default_codec()
            .parse_unit(text)
            .map_err(|e| ConfigError::ValidationError(format!("statistics.velocity_unit: {e}")))?;
        if unit.dimension() != Dimension::SPEED {
            return Err(ConfigError::ValidationError(format!(
                "statistics.velocity_unit '{text}' is not a speed (dimension {})",
                unit.dimension()
            )));
        }
        Ok(unit)
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "measure.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("measure.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config.velocity_unit()?;

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "logging.level must be one of: {LOG_LEVELS:?}"
        )));
    }

    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::value_objects::unit::{FOOT_PER_SECOND, METRE_PER_SECOND};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.codec.include_scale);
        assert_eq!(config.statistics.velocity_unit, "[ft_i]/s");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.velocity_unit().unwrap(), FOOT_PER_SECOND);
    }

    #[test]
    fn test_load_empty_mapping() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_full_config() {
        let yaml = r#"
codec:
  include_scale: true
statistics:
  velocity_unit: "m/s"
logging:
  level: debug
  format: json
"#;
        let config = load_config_from_string(yaml).unwrap();
        assert!(config.codec.include_scale);
        assert_eq!(config.velocity_unit().unwrap(), METRE_PER_SECOND);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "velocity_unit: ${LOADDEV_CONFIG_TEST_NONEXISTENT_VAR:-m/s}";
        assert_eq!(interpolate_env_vars(input), "velocity_unit: m/s");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${LOADDEV_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "level: ");
    }

    #[test]
    fn test_validation_rejects_non_speed_unit() {
        let yaml = r#"
statistics:
  velocity_unit: "[ft_i]"
"#;
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for non-speed unit");
        };
        assert!(err.to_string().contains("not a speed"));
    }

    #[test]
    fn test_validation_rejects_partial_unit() {
        let yaml = r#"
statistics:
  velocity_unit: "m/sX"
"#;
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for partial unit");
        };
        assert!(err.to_string().contains("velocity_unit"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
logging:
  format: xml
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid format");
        };
        assert!(err.to_string().contains("logging.format"));
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let yaml = r"
logging:
  level: loud
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid level");
        };
        assert!(err.to_string().contains("logging.level"));
    }
}
