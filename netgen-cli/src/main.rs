//! Entry point for the `netgen` binary.
//!
//! Parses the positional arguments with clap, generates and writes the
//! network, prints a summary to stdout, and maps failures to exit statuses.
//! Logging is initialised first so every later step can emit diagnostics.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use netgen_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Runs the command and renders its summary.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to generate network")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let cli_error = err.downcast_ref::<CliError>();
        let code_field = cli_error
            .and_then(CliError::generator_code)
            .map(|code| field::display(code.as_str()));
        let status = cli_error.map_or(1, CliError::exit_code);

        error!(error = %format!("{err:#}"), code = code_field, status, "netgen failed");
        return ExitCode::from(status);
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
