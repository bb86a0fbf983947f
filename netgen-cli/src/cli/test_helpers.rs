//! Small helpers shared across CLI tests.

use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, run_cli};

pub(super) type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Positional values of the small arc-parent instance, after the output path.
pub(super) const SMALL_INSTANCE: [&str; 16] = [
    "123", "10", "2", "2", "20", "1", "100", "10000", "0", "0", "100", "100", "100", "500", "1",
    "2",
];

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn output_in(dir: &TempDir) -> PathBuf {
    dir.path().join("network.min")
}

/// Parses `netgen <output> <values...>`.
pub(super) fn parse(output: &Path, values: &[&str]) -> Result<Cli, clap::Error> {
    let output = output.to_string_lossy().into_owned();
    let args = ["netgen".to_owned(), output]
        .into_iter()
        .chain(values.iter().map(|value| (*value).to_owned()));
    Cli::try_parse_from(args)
}

/// Small instance with one positional value replaced.
pub(super) fn small_with(index: usize, value: &'static str) -> Vec<&'static str> {
    let mut values = SMALL_INSTANCE.to_vec();
    if let Some(slot) = values.get_mut(index) {
        *slot = value;
    }
    values
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
