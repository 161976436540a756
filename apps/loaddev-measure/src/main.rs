//! Velocity Statistics CLI
//!
//! Reads a JSON array of shot velocities and prints count, average,
//! standard deviation and extreme spread as JSON.
//!
//! # Usage
//!
//! ```text
//! velocity-stats [INPUT]
//! ```
//!
//! Reads from `INPUT`, or stdin when no path is given.
//!
//! # Environment Variables
//!
//! - `MEASURE_CONFIG`: Path to a YAML config file (defaults are used when unset)
//! - `RUST_LOG`: Log filter, overrides `logging.level`

use std::io::Read;

use anyhow::Context;
use serde_json::{Value, json};

use loaddev_measure::config::{Config, load_config};
use loaddev_measure::observability::init_logging;
use loaddev_measure::{MeasureCodec, Quantity, VelocityStats, VelocitySummary};

fn main() -> anyhow::Result<()> {
    let config = match std::env::var("MEASURE_CONFIG") {
        Ok(path) if !path.is_empty() => load_config(Some(&path))
            .with_context(|| format!("failed to load configuration from {path}"))?,
        _ => Config::default(),
    };

    init_logging(&config.logging).context("failed to initialize logging")?;

    let input = read_input(std::env::args().nth(1).as_deref())?;
    let codec = MeasureCodec::ucum().with_options(config.codec);

    let payload: Value = serde_json::from_str(&input).context("input is not valid JSON")?;
    let Value::Array(items) = payload else {
        anyhow::bail!("input must be a JSON array of quantities");
    };
    let velocities = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            codec
                .decode_quantity(item)
                .with_context(|| format!("invalid velocity at index {i}"))
        })
        .collect::<anyhow::Result<Vec<Quantity>>>()?;

    let unit = config.velocity_unit()?;
    tracing::info!(shots = velocities.len(), unit = %unit, "Computing velocity statistics");
    let stats = VelocityStats::compute(&velocities, unit)?;

    println!("{}", serde_json::to_string_pretty(&render_summary(&codec, &stats.summary()))?);
    Ok(())
}

fn render_summary(codec: &MeasureCodec, summary: &VelocitySummary) -> Value {
    json!({
        "count": summary.count,
        "average": codec.encode_quantity(&summary.average),
        "standard_deviation": codec.encode_quantity(&summary.standard_deviation),
        "extreme_spread": codec.encode_quantity(&summary.extreme_spread),
    })
}

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
