//! Configuration system for the panchang service.
//!
//! Settings live in `panchang.toml` under `$XDG_CONFIG_HOME/panchang/` (or the
//! directory given with `--config`). A commented default file is written the
//! first time the service starts without one.
//!
//! ```toml
//! #[Server]
//! bind = "0.0.0.0"          # Listen address (IPv4 or IPv6)
//! port = 8000               # Listen port (1-65535, PORT env overrides)
//! workers = 4               # Request worker threads (1-256)
//! cors_origin = "*"         # Value of Access-Control-Allow-Origin
//!
//! #[Request defaults]
//! timezone = "Asia/Kolkata" # IANA timezone used when a request omits tz
//! latitude = 28.6139        # Default observer latitude (-90 to 90)
//! longitude = 77.209        # Default observer longitude (-180 to 180)
//!
//! #[Calculation]
//! dst_gap = "shift_forward" # 06:00 inside a DST gap: "shift_forward" or "reject"
//! zodiac = "tropical"       # "tropical", "lahiri", "raman" or "krishnamurti"
//! ```
//!
//! Every field is optional. Loading parses the file, applies the `PORT`
//! environment override, validates and then fills in defaults.

pub mod builder;
pub mod loading;
pub mod validation;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::astro::CalculationSettings;
use crate::constants::*;
use crate::panchang::Zodiac;
use crate::time::DstGapPolicy;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Service settings loaded from `panchang.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
    pub cors_origin: Option<String>,

    /// Timezone used when a request has no `tz`.
    pub timezone: Option<String>,
    /// Used when a request has no `lat`.
    pub latitude: Option<f64>,
    /// Used when a request has no `lon`.
    pub longitude: Option<f64>,

    pub dst_gap: Option<DstGapPolicy>,
    pub zodiac: Option<Zodiac>,
}

impl Config {
    /// Load configuration using the module's load function
    pub fn load() -> Result<Self> {
        load()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    pub fn bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn workers(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_WORKERS)
    }

    pub fn cors_origin(&self) -> &str {
        self.cors_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or(DEFAULT_LATITUDE)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or(DEFAULT_LONGITUDE)
    }

    pub fn calculation_settings(&self) -> CalculationSettings {
        CalculationSettings {
            dst_gap: self.dst_gap.unwrap_or_default(),
            zodiac: self.zodiac.unwrap_or_default(),
        }
    }

    /// `bind:port` for the listener.
    pub fn listen_address(&self) -> String {
        if self.bind().contains(':') {
            format!("[{}]:{}", self.bind(), self.port())
        } else {
            format!("{}:{}", self.bind(), self.port())
        }
    }

    pub fn log_config(&self) {
        let source = match get_custom_config_dir() {
            Some(dir) => format!("custom directory {}", loading::private_path(&dir)),
            None => "default configuration".to_string(),
        };
        let settings = self.calculation_settings();

        log_block_start!("Loaded {source}");
        log_indented!("Listen address: {}", self.listen_address());
        log_indented!("Workers: {}", self.workers());
        log_indented!("CORS origin: {}", self.cors_origin());
        log_indented!("Default timezone: {}", self.timezone());
        log_indented!(
            "Default location: {:.4}°, {:.4}°",
            self.latitude(),
            self.longitude()
        );
        log_indented!("DST gap policy: {}", settings.dst_gap.as_str());
        log_indented!("Zodiac: {}", settings.zodiac.as_str());
    }
}

#[cfg(test)]
mod tests;
