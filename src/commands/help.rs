//! Help and version output.

use anyhow::Result;

/// Show brief usage for a command (used for error messages)
pub fn show_command_usage(command: &str) {
    match command {
        "serve" => log_block_start!(
            "Usage: panchang serve [--config <dir>] [--bind <addr>] [--port <n>] [--debug] [--log <file>]"
        ),
        "compute" => log_block_start!("Usage: panchang compute <YYYY-MM-DD> [--tz <zone>]"),
        _ => log_block_start!("Usage: panchang [OPTIONS] [COMMAND]"),
    }
}

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_help(),
        Some("serve") => display_serve_help(),
        Some("compute") => display_compute_help(),
        Some("help") => display_help_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_help();
        }
    }
    Ok(())
}

pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// General usage, shown for `--help` and after argument errors.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("panchang [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-b, --bind <addr>      Override the listen address");
    log_indented!("-p, --port <n>         Override the listen port");
    log_indented!("-d, --debug            Log every request");
    log_indented!("-l, --log <file>       Write log output to a file");
    log_indented!("-z, --tz <zone>        Timezone for compute (default from config)");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("serve                  Run the HTTP service (default)");
    log_indented!("compute <date>         Print the panchang JSON for one date");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_end!();
}

fn display_serve_help() {
    log_version!();
    log_block_start!("serve - Run the HTTP service");
    show_command_usage("serve");
    log_block_start!("Endpoints:");
    log_indented!("GET /astro?date=YYYY-MM-DD[&tz=<zone>][&lat=<deg>][&lon=<deg>]");
    log_indented!("GET /healthz");
    log_block_start!("Notes:");
    log_indented!("The PORT environment variable overrides the configured port;");
    log_indented!("--port overrides both.");
    log_end!();
}

fn display_compute_help() {
    log_version!();
    log_block_start!("compute - Print the panchang for one date");
    show_command_usage("compute");
    log_block_start!("Examples:");
    log_indented!("panchang compute 2026-02-06");
    log_indented!("panchang compute 2026-03-08 --tz America/New_York");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: panchang help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_end!();
}
