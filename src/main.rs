//! Fleet - command-line client for a fleet-management API
//!
//! Tags applications, devices and releases through the remote API.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use fleet_core::error::{ExitCode as FleetExitCode, FleetError};
use fleet_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return parse_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FleetError::from)
        .and_then(|runtime| runtime.block_on(commands::dispatch::run(&cli, start)));

    match result {
        Ok(()) => ExitCode::from(FleetExitCode::Success as u8),
        Err(e) => report(&cli, &e),
    }
}

/// Handle an argument error before a `Cli` exists.
///
/// Scripts asking for `--format json` get the JSON error envelope on stderr
/// and exit code 2; everyone else gets clap's own rendering.
fn parse_failure(err: clap::Error) -> ExitCode {
    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    if informational || !argv_requests_json() {
        err.exit();
    }

    let usage = FleetError::UsageError(err.to_string());
    eprintln!("{}", usage.to_json());
    ExitCode::from(usage.exit_code() as u8)
}

fn report(cli: &Cli, err: &FleetError) -> ExitCode {
    match cli.format {
        OutputFormat::Json => eprintln!("{}", err.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", err),
        OutputFormat::Human => {}
    }
    ExitCode::from(err.exit_code() as u8)
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let value = match arg.strip_prefix("--format") {
            Some("") => args.next(),
            Some(inline) => inline.strip_prefix('=').map(str::to_string),
            None => continue,
        };
        if value.is_some_and(|v| v.eq_ignore_ascii_case("json")) {
            return true;
        }
    }
    false
}
