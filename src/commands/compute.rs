//! `compute`: print the report for a single date as JSON.

use anyhow::{Context, Result};

use crate::astro::{AstroQuery, compute_report};
use crate::config::{self, Config};
use crate::ephemeris::AnalyticEphemeris;
use crate::logger::Log;

/// Compute and print one report. Logging stays off unless `debug_enabled`
/// so stdout carries only the JSON document.
pub fn run_compute(
    date: &str,
    tz: Option<&str>,
    config_dir: Option<String>,
    debug_enabled: bool,
) -> Result<()> {
    Log::set_enabled(debug_enabled);

    config::set_config_dir(config_dir)?;
    let config = Config::load()?;

    let query = AstroQuery {
        date: date.to_string(),
        tz: tz.unwrap_or(config.timezone()).to_string(),
        latitude: config.latitude(),
        longitude: config.longitude(),
    };

    let report = compute_report(
        &query,
        &AnalyticEphemeris::new(),
        &config.calculation_settings(),
    )
    .with_context(|| format!("Failed to compute panchang for {date}"))?;

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}
