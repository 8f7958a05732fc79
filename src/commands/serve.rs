//! `serve`: load configuration and run the HTTP service until a shutdown signal.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{self, Config, validation::validate_config};
use crate::ephemeris::{AnalyticEphemeris, Ephemeris};
use crate::logger::Log;
use crate::server::{AppContext, AstroServer};
use crate::signals::setup_signal_handler;

/// Flags accepted by `serve`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ServeOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub log_file: Option<String>,
}

pub fn run_serve(options: ServeOptions) -> Result<()> {
    // Hold the guard until shutdown so the writer thread flushes
    let _log_guard = match options.log_file.clone() {
        Some(path) => Some(Log::start_file_logging(path).context("Failed to open log file")?),
        None => None,
    };
    Log::set_timestamps(true);

    log_version!();

    config::set_config_dir(options.config_dir.clone())?;
    let mut config = Config::load()?;
    apply_cli_overrides(&mut config, &options)?;
    config.log_config();

    let ephemeris: Arc<dyn Ephemeris> = Arc::new(AnalyticEphemeris::new());
    let context = AppContext::from_config(&config, Arc::clone(&ephemeris))
        .with_debug(options.debug_enabled);

    let signals = setup_signal_handler(options.debug_enabled)?;

    let address = config.listen_address();
    let server = AstroServer::bind(&address, context, config.workers())?;
    let shown = server
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or(address);

    log_block_start!("Ephemeris: {}", ephemeris.name());
    log_info!(
        "Listening on http://{shown} with {} workers",
        config.workers()
    );
    if options.debug_enabled {
        log_debug!("Request logging enabled");
    }

    server.run(&signals)?;

    log_block_start!("Shutdown complete");
    log_end!();
    Ok(())
}

/// `--bind` and `--port` win over the file and over `PORT`.
pub fn apply_cli_overrides(config: &mut Config, options: &ServeOptions) -> Result<()> {
    if let Some(bind) = &options.bind {
        config.bind = Some(bind.clone());
    }
    if let Some(port) = options.port {
        config.port = Some(port);
    }
    validate_config(config).context("Invalid command-line override")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config {
            bind: Some("0.0.0.0".to_string()),
            port: Some(8000),
            ..Default::default()
        };
        let options = ServeOptions {
            bind: Some("127.0.0.1".to_string()),
            port: Some(9100),
            ..Default::default()
        };
        apply_cli_overrides(&mut config, &options).unwrap();
        assert_eq!(config.listen_address(), "127.0.0.1:9100");
    }

    #[test]
    fn test_cli_overrides_are_validated() {
        let mut config = Config::default();
        let options = ServeOptions {
            bind: Some("not-an-ip".to_string()),
            ..Default::default()
        };
        assert!(apply_cli_overrides(&mut config, &options).is_err());
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = Config {
            port: Some(8123),
            ..Default::default()
        };
        apply_cli_overrides(&mut config, &ServeOptions::default()).unwrap();
        assert_eq!(config.port(), 8123);
    }
}
