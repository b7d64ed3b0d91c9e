use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jsend_core::{Envelope, JSendError, Status};
use serde_json::Value;
use tracing::{debug, error, info};

mod observability;

use observability::{LogFormat, init_tracing};

/// Exit code for input that is not a valid JSend document (or bad arguments).
const EXIT_INVALID: u8 = 1;
/// Exit code when a parsed envelope reports `fail`.
const EXIT_FAIL: u8 = 3;
/// Exit code when a parsed envelope reports `error`.
const EXIT_ERROR: u8 = 4;

#[derive(Debug, Parser)]
#[command(name = "jsend", version, about = "Build and check JSend response envelopes")]
struct Cli {
    /// Log line format on stderr.
    #[arg(
        long,
        global = true,
        env = "JSEND_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build an envelope and print its wire JSON.
    ///
    /// Empty values (`--code 0`, `--message ""`, `--data ""`, `--data '{}'`) are treated as not given.
    Build {
        /// success, fail or error.
        #[arg(long)]
        status: String,

        /// Payload as a JSON document.
        #[arg(long)]
        data: Option<String>,

        /// Application error code.
        #[arg(long, allow_negative_numbers = true)]
        code: Option<i64>,

        /// Human-readable error message.
        #[arg(long)]
        message: Option<String>,

        #[arg(long)]
        pretty: bool,
    },

    /// Validate a JSend document from FILE (or stdin) and print it normalised.
    ///
    /// Exits 0 for success, 3 for fail, 4 for error and 1 for invalid input.
    Parse {
        file: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },

    /// List the allowed statuses.
    Statuses,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    JSend(#[from] JSendError),

    #[error("--data is not valid JSON: {0}")]
    Data(serde_json::Error),

    #[error("could not read {source_name}: {source}")]
    Read {
        source_name: String,
        source: io::Error,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "jsend command failed");
            ExitCode::from(EXIT_INVALID)
        }
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Build {
            status,
            data,
            code,
            message,
            pretty,
        } => {
            let data = data
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| serde_json::from_str::<Value>(&raw))
                .transpose()
                .map_err(CliError::Data)?;
            let envelope = Envelope::create(status.as_str(), data, code, message)?;
            debug!(status = %envelope.status(), "built envelope");
            println!("{}", render(&envelope, pretty)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Parse { file, pretty } => {
            let input = read_input(file)?;
            let envelope = Envelope::parse(&input)?;
            info!(
                status = %envelope.status(),
                code = envelope.code(),
                has_data = envelope.has_data(),
                "parsed envelope"
            );
            println!("{}", render(&envelope, pretty)?);
            Ok(exit_code_for(envelope.status()))
        }
        Command::Statuses => {
            for status in Status::ALL {
                println!("{status}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn render(envelope: &Envelope, pretty: bool) -> Result<String, JSendError> {
    if pretty {
        envelope.to_json_pretty()
    } else {
        envelope.to_json()
    }
}

fn read_input(file: Option<PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) => fs::read_to_string(&path).map_err(|source| CliError::Read {
            source_name: path.display().to_string(),
            source,
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CliError::Read {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            Ok(input)
        }
    }
}

fn exit_code_for(status: Status) -> ExitCode {
    match status {
        Status::Success => ExitCode::SUCCESS,
        Status::Fail => ExitCode::from(EXIT_FAIL),
        Status::Error => ExitCode::from(EXIT_ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_arguments_are_parsed() {
        let cli = Cli::try_parse_from([
            "jsend", "build", "--status", "error", "--message", "boom", "--code", "-1",
        ])
        .unwrap();
        match cli.command {
            Command::Build {
                status,
                code,
                message,
                data,
                pretty,
            } => {
                assert_eq!(status, "error");
                assert_eq!(code, Some(-1));
                assert_eq!(message.as_deref(), Some("boom"));
                assert_eq!(data, None);
                assert!(!pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn log_format_accepts_json() {
        let cli = Cli::try_parse_from(["jsend", "statuses", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_data_is_reported_before_building() {
        let err = run(Command::Build {
            status: "success".to_string(),
            data: Some("{not json".to_string()),
            code: None,
            message: None,
            pretty: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Data(_)));
    }

    #[test]
    fn blank_data_counts_as_not_given() {
        for blank in ["", "   "] {
            let result = run(Command::Build {
                status: "success".to_string(),
                data: Some(blank.to_string()),
                code: None,
                message: None,
                pretty: false,
            });
            assert!(result.is_ok(), "data {blank:?}: {result:?}");
        }
    }

    #[test]
    fn invalid_status_is_reported() {
        let err = run(Command::Build {
            status: "bogus".to_string(),
            data: None,
            code: None,
            message: None,
            pretty: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::JSend(JSendError::InvalidStatus(_))));
    }
}
