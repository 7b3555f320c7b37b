//! # notif CLI entry point
//!
//! Parses command-line arguments, initializes logging, and dispatches to
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use notif_cli::scenario::{run_scenario, ScenarioArgs};
use notif_cli::send::{run_send, SendArgs};
use notif_cli::validate::{run_validate, ValidateArgs};
use notif_cli::ConnectionArgs;

/// Notification service toolkit.
///
/// Validates tagged JSON documents, sends commands to a running service,
/// and runs the end-to-end smoke scenario.
#[derive(Parser, Debug)]
#[command(name = "notif", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a command or result document and list every violation.
    Validate(ValidateArgs),

    /// Build one command from arguments and send it.
    Send(SendArgs),

    /// Run the smoke scenario against a live service.
    Scenario(ScenarioArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr; stdout carries command output.
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!("notif CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Send(args) => match cli.connection.client_config() {
            Ok(config) => run_send(&args, config).await,
            Err(e) => Err(e),
        },
        Commands::Scenario(args) => match cli.connection.client_config() {
            Ok(config) => run_scenario(&args, config).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
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
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "notif",
            "send",
            "notify",
            "0",
            "Hello!",
            "--expires-in",
            "10",
            "--dry-run",
            "-vv",
            "--base-url",
            "http://svc.internal",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.connection.base_url.as_deref(), Some("http://svc.internal"));
        match cli.command {
            Commands::Send(args) => assert!(args.dry_run),
            other => panic!("expected send, got: {other:?}"),
        }
    }

    #[test]
    fn expiration_flags_conflict() {
        let err = Cli::try_parse_from([
            "notif", "send", "notify", "0", "hi", "--expires-at", "1", "--expires-in", "1",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn validate_kind_defaults_to_command() {
        let cli = Cli::try_parse_from(["notif", "validate", "-", "--json"]).unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.kind, notif_cli::validate::DocumentKind::Command);
                assert!(args.json);
            }
            other => panic!("expected validate, got: {other:?}"),
        }
    }
}
