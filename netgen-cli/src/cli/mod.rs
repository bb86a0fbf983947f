//! Command-line interface for the network generator.
//!
//! One positional invocation validates the parameters, generates the
//! network, and writes it atomically to the output path.

mod commands;

pub use commands::{Cli, CliError, GenerationSummary, render_summary, run_cli};

#[cfg(test)]
mod test_helpers;
