//! Shutdown signal handling.
//!
//! A dedicated thread waits on SIGINT, SIGTERM and SIGHUP and clears the shared
//! `running` flag. Server workers poll the flag between `recv_timeout` calls,
//! so in-flight requests finish before the process exits.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

/// Signal handling state shared between threads
#[derive(Debug, Clone)]
pub struct SignalState {
    /// Cleared once a shutdown signal arrives
    pub running: Arc<AtomicBool>,
}

impl SignalState {
    /// State without a handler thread, for tests and embedded use.
    pub fn detached() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Message shown when a shutdown signal is received.
pub fn shutdown_message(signal: i32, debug_enabled: bool) -> &'static str {
    match signal {
        SIGINT if debug_enabled => "Received SIGINT (Ctrl+C), initiating graceful shutdown...",
        SIGINT => "Received interrupt signal, initiating graceful shutdown...",
        SIGTERM => "Received termination request, initiating graceful shutdown...",
        SIGHUP => "Received hangup signal, initiating graceful shutdown...",
        _ => "Received shutdown signal, initiating graceful shutdown...",
    }
}

/// Register shutdown signals and spawn the thread that watches them.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handlers")?;

    let handler_state = state.clone();
    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                // A second signal while shutting down is just noted
                if !handler_state.is_running() {
                    log_debug!("Signal {sig} received during shutdown");
                    continue;
                }
                log_pipe!();
                log_info!("{}", shutdown_message(sig, debug_enabled));
                handler_state.request_shutdown();
            }
        })
        .context("failed to spawn signal handler thread")?;

    Ok(state)
}
