//! Default config file creation.
//!
//! The file is assembled with a small builder so every setting line gets its
//! comment aligned in one column.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Write a commented default `panchang.toml` at `path`, creating parent dirs.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))
}

/// Contents of the default config file.
pub fn default_config_content() -> String {
    let mut content = ConfigBuilder::new()
        .add_section("Server")
        .add_setting(
            "bind",
            &format!("\"{DEFAULT_BIND}\""),
            "Listen address (IPv4 or IPv6)",
        )
        .add_setting(
            "port",
            &DEFAULT_PORT.to_string(),
            &format!("Listen port ({MINIMUM_PORT}-65535, {PORT_ENV_VAR} env overrides)"),
        )
        .add_setting(
            "workers",
            &DEFAULT_WORKERS.to_string(),
            &format!("Request worker threads ({MINIMUM_WORKERS}-{MAXIMUM_WORKERS})"),
        )
        .add_setting(
            "cors_origin",
            &format!("\"{DEFAULT_CORS_ORIGIN}\""),
            "Value of Access-Control-Allow-Origin",
        )
        .add_section("Request defaults")
        .add_setting(
            "timezone",
            &format!("\"{DEFAULT_TIMEZONE}\""),
            "IANA timezone used when a request omits tz",
        )
        .add_setting(
            "latitude",
            &DEFAULT_LATITUDE.to_string(),
            "Default observer latitude (-90 to 90)",
        )
        .add_setting(
            "longitude",
            &DEFAULT_LONGITUDE.to_string(),
            "Default observer longitude (-180 to 180)",
        )
        .add_section("Calculation")
        .add_setting(
            "dst_gap",
            &format!("\"{DEFAULT_DST_GAP}\""),
            "06:00 inside a DST gap: \"shift_forward\" or \"reject\"",
        )
        .add_setting(
            "zodiac",
            &format!("\"{DEFAULT_ZODIAC}\""),
            "\"tropical\", \"lahiri\", \"raman\" or \"krishnamurti\"",
        )
        .build();
    content.push('\n');
    content
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    fn build(self) -> String {
        // One space between the longest setting and its comment
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !result.is_empty() {
                        result.push(String::new());
                    }
                    result.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{line}{padding}{comment}"));
                }
            }
        }

        result.join("\n")
    }
}
