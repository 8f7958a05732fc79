//! Application-wide constants and defaults.
//!
//! Centralizes the default request parameters, server settings, calculation
//! constants and validation limits so that configuration, CLI and the HTTP
//! layer agree on the same values.

// # Request Defaults

/// Timezone used when `tz` is omitted from a request
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
/// Latitude used when `lat` is omitted (New Delhi)
pub const DEFAULT_LATITUDE: f64 = 28.6139;
/// Longitude used when `lon` is omitted (New Delhi)
pub const DEFAULT_LONGITUDE: f64 = 77.2090;

// # Server Defaults

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_CORS_ORIGIN: &str = "*";
/// Service name reported by the liveness probe
pub const SERVICE_NAME: &str = "astro-api";
/// How long a worker blocks on `recv_timeout` before re-checking the shutdown flag
pub const WORKER_POLL_INTERVAL_MS: u64 = 250;

// # Calculation Constants

/// Local wall-clock hour that represents the whole civil day
pub const ANCHOR_HOUR: i64 = 6;
/// Decimal places kept on reported longitudes
pub const LONGITUDE_DECIMALS: i32 = 6;
pub const DEFAULT_DST_GAP: &str = "shift_forward";
pub const DEFAULT_ZODIAC: &str = "tropical";

// # Validation Limits

pub const MINIMUM_PORT: u16 = 1;
pub const MINIMUM_WORKERS: usize = 1;
pub const MAXIMUM_WORKERS: usize = 256;

// # Configuration Files

pub const CONFIG_DIR_NAME: &str = "panchang";
pub const CONFIG_FILE_NAME: &str = "panchang.toml";
/// Environment variable set by hosting platforms to choose the listen port
pub const PORT_ENV_VAR: &str = "PORT";

// # Exit Codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
