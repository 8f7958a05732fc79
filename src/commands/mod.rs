//! Command-line command handlers for panchang.
//!
//! Each command is implemented in its own submodule; `main.rs` only maps the
//! parsed [`CliAction`](crate::args::CliAction) onto these entry points.

pub mod compute;
pub mod help;
pub mod serve;
