//! Configuration validation functionality.
//!
//! Runs before defaults are applied, so only fields present in the file (or
//! set through `PORT`) are checked.

use anyhow::Result;
use std::net::IpAddr;

use super::Config;
use crate::constants::*;
use crate::time::parse_timezone;

/// Reject settings the server cannot start with.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(bind) = config.bind.as_deref()
        && bind.parse::<IpAddr>().is_err()
    {
        anyhow::bail!("bind ({bind}) must be an IPv4 or IPv6 address");
    }

    if let Some(port) = config.port
        && port < MINIMUM_PORT
    {
        anyhow::bail!(
            "port ({port}) must be between {MINIMUM_PORT} and {}",
            u16::MAX
        );
    }

    if let Some(workers) = config.workers
        && !(MINIMUM_WORKERS..=MAXIMUM_WORKERS).contains(&workers)
    {
        anyhow::bail!(
            "workers ({workers}) must be between {MINIMUM_WORKERS} and {MAXIMUM_WORKERS}"
        );
    }

    if let Some(origin) = config.cors_origin.as_deref()
        && (origin.trim().is_empty() || origin.contains(['\r', '\n']))
    {
        anyhow::bail!("cors_origin must be a non-empty single-line value");
    }

    if let Some(tz) = config.timezone.as_deref()
        && parse_timezone(tz).is_err()
    {
        anyhow::bail!("timezone ({tz}) is not a known IANA timezone identifier");
    }

    if let Some(lat) = config.latitude
        && !(-90.0..=90.0).contains(&lat)
    {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {})", lat);
    }

    if let Some(lon) = config.longitude
        && !(-180.0..=180.0).contains(&lon)
    {
        anyhow::bail!(
            "longitude must be between -180 and 180 degrees (got {})",
            lon
        );
    }

    Ok(())
}
