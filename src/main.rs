//! Main application entry point.
//!
//! Parses the command line and hands off to the matching command. Errors that
//! reach this level are printed through the logger and turn into a non-zero
//! exit code.

use anyhow::Result;

use panchang::args::{CliAction, ParsedArgs};
use panchang::commands::{self, serve::ServeOptions};
use panchang::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use panchang::logger::Log;
use panchang::{log_end, log_error, log_indented, log_pipe};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let code = match run(parsed_args.action) {
        Ok(code) => code,
        Err(e) => {
            // compute silences logging; failures must still be visible
            Log::set_enabled(true);
            log_pipe!();
            log_error!("{e}");
            for cause in e.chain().skip(1) {
                log_indented!("{cause}");
            }
            log_end!();
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

fn run(action: CliAction) -> Result<i32> {
    match action {
        CliAction::ShowVersion => {
            commands::help::display_version_info();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelp => {
            commands::help::display_help();
            Ok(EXIT_SUCCESS)
        }
        CliAction::ShowHelpDueToError => {
            commands::help::display_help();
            Ok(EXIT_FAILURE)
        }
        CliAction::HelpCommand { command } => {
            commands::help::run_help_command(command.as_deref())?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Serve {
            debug_enabled,
            config_dir,
            bind,
            port,
            log_file,
        } => {
            commands::serve::run_serve(ServeOptions {
                debug_enabled,
                config_dir,
                bind,
                port,
                log_file,
            })?;
            Ok(EXIT_SUCCESS)
        }
        CliAction::Compute {
            debug_enabled,
            config_dir,
            date,
            tz,
        } => {
            commands::compute::run_compute(&date, tz.as_deref(), config_dir, debug_enabled)?;
            Ok(EXIT_SUCCESS)
        }
    }
}
