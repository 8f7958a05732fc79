//! # Panchang Library
//!
//! Internal library for the `panchang` binary.
//!
//! This library exists to enable testing of the calculation pipeline and the HTTP
//! routing without a running server, and to keep CLI dispatch (main.rs) separate
//! from application logic.
//!
//! ## Architecture
//!
//! - **Time Normalizer**: `time` turns a civil date and IANA timezone into the
//!   06:00-local anchor instant and its Julian day
//! - **Ephemeris**: `ephemeris` defines the `Ephemeris` trait and ships a
//!   closed-form analytic engine
//! - **Classifier**: `panchang` maps longitudes to rashi, nakshatra and tithi
//! - **Pipeline**: `astro` wires the three together into the JSON report
//! - **Service**: `server` (routing, query parsing, worker pool), `config`,
//!   `signals`, `commands` and `args`
//! - **Infrastructure**: logging, constants and the error taxonomy

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod astro;
pub mod commands;
pub mod config;
pub mod constants;
pub mod ephemeris;
pub mod error;
pub mod panchang;
pub mod server;
pub mod signals;
pub mod time;

pub use astro::{AstroQuery, AstroReport, CalculationSettings, compute_report};
pub use error::AstroError;
