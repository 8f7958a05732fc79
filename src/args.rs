//! Command-line argument parsing and processing.
//!
//! Supported forms:
//!
//! ```text
//! panchang [serve] [--config DIR] [--bind ADDR] [--port N] [--debug] [--log FILE]
//! panchang compute <YYYY-MM-DD> [--tz ZONE] [--config DIR]
//! panchang help [COMMAND]
//! panchang --help | --version
//! ```
//!
//! Help and version flags win over everything else. Anything unrecognised,
//! or a flag missing its value, turns into [`CliAction::ShowHelpDueToError`].

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the HTTP service
    Serve {
        debug_enabled: bool,
        config_dir: Option<String>,
        bind: Option<String>,
        port: Option<u16>,
        log_file: Option<String>,
    },
    /// Print the report for one date and exit
    Compute {
        debug_enabled: bool,
        config_dir: Option<String>,
        date: String,
        tz: Option<String>,
    },
    /// `help` subcommand, optionally for one command
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

#[derive(Default)]
struct RawArgs {
    debug_enabled: bool,
    display_help: bool,
    display_version: bool,
    config_dir: Option<String>,
    bind: Option<String>,
    port: Option<u16>,
    log_file: Option<String>,
    tz: Option<String>,
    positionals: Vec<String>,
    error: bool,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw = collect_args(args);

        if raw.display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if raw.display_help {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }
        if raw.error {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        ParsedArgs {
            action: resolve_action(raw),
        }
    }

    /// Parse arguments from the running process.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn collect_args<I, S>(args: I) -> RawArgs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut raw = RawArgs::default();
    let mut iter = args.into_iter().skip(1).map(|s| s.as_ref().to_string());

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => raw.display_help = true,
            "--version" | "-V" | "-v" => raw.display_version = true,
            "--debug" | "-d" => raw.debug_enabled = true,
            "--config" | "-c" => raw.config_dir = take_value(&mut iter, &mut raw.error),
            "--bind" | "-b" => raw.bind = take_value(&mut iter, &mut raw.error),
            "--log" | "-l" => raw.log_file = take_value(&mut iter, &mut raw.error),
            "--tz" | "-z" => raw.tz = take_value(&mut iter, &mut raw.error),
            "--port" | "-p" => {
                raw.port = take_value(&mut iter, &mut raw.error).and_then(|v| {
                    let port = v.parse::<u16>().ok().filter(|p| *p > 0);
                    if port.is_none() {
                        log_warning_standalone!("Invalid port: {v}");
                        raw.error = true;
                    }
                    port
                })
            }
            other if other.starts_with('-') && other.len() > 1 => {
                log_warning_standalone!("Unknown option: {other}");
                raw.error = true;
            }
            _ => raw.positionals.push(arg),
        }
    }

    raw
}

fn take_value(iter: &mut impl Iterator<Item = String>, error: &mut bool) -> Option<String> {
    let value = iter.next();
    if value.is_none() {
        *error = true;
    }
    value
}

fn resolve_action(raw: RawArgs) -> CliAction {
    let mut positionals = raw.positionals.into_iter();
    let command = positionals.next();
    let rest: Vec<String> = positionals.collect();

    match command.as_deref() {
        None | Some("serve") => {
            if !rest.is_empty() || raw.tz.is_some() {
                return CliAction::ShowHelpDueToError;
            }
            CliAction::Serve {
                debug_enabled: raw.debug_enabled,
                config_dir: raw.config_dir,
                bind: raw.bind,
                port: raw.port,
                log_file: raw.log_file,
            }
        }
        Some("compute") => {
            let serve_only = raw.bind.is_some() || raw.port.is_some() || raw.log_file.is_some();
            match rest.as_slice() {
                [date] if !serve_only => CliAction::Compute {
                    debug_enabled: raw.debug_enabled,
                    config_dir: raw.config_dir,
                    date: date.clone(),
                    tz: raw.tz,
                },
                _ => CliAction::ShowHelpDueToError,
            }
        }
        Some("help") => match rest.as_slice() {
            [] => CliAction::HelpCommand { command: None },
            [topic] => CliAction::HelpCommand {
                command: Some(topic.clone()),
            },
            _ => CliAction::ShowHelpDueToError,
        },
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {unknown}");
            CliAction::ShowHelpDueToError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_defaults() -> CliAction {
        CliAction::Serve {
            debug_enabled: false,
            config_dir: None,
            bind: None,
            port: None,
            log_file: None,
        }
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(vec!["panchang"]);
        assert_eq!(parsed.action, serve_defaults());
    }

    #[test]
    fn test_parse_serve_subcommand_is_default() {
        let parsed = ParsedArgs::parse(vec!["panchang", "serve"]);
        assert_eq!(parsed.action, serve_defaults());
    }

    #[test]
    fn test_parse_serve_flags() {
        let parsed = ParsedArgs::parse(vec![
            "panchang",
            "serve",
            "--bind",
            "127.0.0.1",
            "-p",
            "9000",
            "-d",
            "--config",
            "/tmp/panchang",
            "--log",
            "/tmp/panchang.log",
        ]);
        assert_eq!(
            parsed.action,
            CliAction::Serve {
                debug_enabled: true,
                config_dir: Some("/tmp/panchang".to_string()),
                bind: Some("127.0.0.1".to_string()),
                port: Some(9000),
                log_file: Some("/tmp/panchang.log".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_compute() {
        let parsed = ParsedArgs::parse(vec!["panchang", "compute", "2026-02-06", "--tz", "UTC"]);
        assert_eq!(
            parsed.action,
            CliAction::Compute {
                debug_enabled: false,
                config_dir: None,
                date: "2026-02-06".to_string(),
                tz: Some("UTC".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_compute_requires_exactly_one_date() {
        for args in [
            vec!["panchang", "compute"],
            vec!["panchang", "compute", "2026-02-06", "2026-02-07"],
            vec!["panchang", "compute", "2026-02-06", "--port", "8000"],
        ] {
            assert_eq!(
                ParsedArgs::parse(args.clone()).action,
                CliAction::ShowHelpDueToError,
                "{args:?}"
            );
        }
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(ParsedArgs::parse(vec!["panchang", "--help"]).action, CliAction::ShowHelp);
        assert_eq!(ParsedArgs::parse(vec!["panchang", "-h"]).action, CliAction::ShowHelp);
        assert_eq!(ParsedArgs::parse(vec!["panchang", "-V"]).action, CliAction::ShowVersion);
        // Version wins over help and over errors
        assert_eq!(
            ParsedArgs::parse(vec!["panchang", "--bogus", "--help", "--version"]).action,
            CliAction::ShowVersion
        );
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(
            ParsedArgs::parse(vec!["panchang", "help"]).action,
            CliAction::HelpCommand { command: None }
        );
        assert_eq!(
            ParsedArgs::parse(vec!["panchang", "help", "compute"]).action,
            CliAction::HelpCommand {
                command: Some("compute".to_string())
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        for args in [
            vec!["panchang", "--unknown"],
            vec!["panchang", "--port"],
            vec!["panchang", "--port", "0"],
            vec!["panchang", "--port", "eighty"],
            vec!["panchang", "--config"],
            vec!["panchang", "launch"],
            vec!["panchang", "serve", "--tz", "UTC"],
        ] {
            assert_eq!(
                ParsedArgs::parse(args.clone()).action,
                CliAction::ShowHelpDueToError,
                "{args:?}"
            );
        }
    }
}
