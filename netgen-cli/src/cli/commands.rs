//! Argument parsing and the generate-and-write pipeline.

use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use netgen_core::{
    DEFAULT_MAX_ARCS, DEFAULT_MAX_NODES, GenerationParams, GeneratorBuilder, GeneratorError,
    GeneratorErrorCode, Limits, Network, NetworkStats, ParentMode, write_network,
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Positional invocation of the generator.
///
/// The seventeen positional arguments follow the historical order; a wrong
/// count is a usage error reported by clap.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "netgen",
    about = "Generate a minimum-cost flow network with interdependencies.",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// File the network is written to.
    pub output: PathBuf,
    /// Positive random seed.
    pub seed: i64,
    /// Number of nodes (`NODES`).
    pub nodes: i64,
    /// Number of source nodes (`SOURCES`).
    pub sources: i64,
    /// Number of sink nodes (`SINKS`).
    pub sinks: i64,
    /// Requested number of arcs (`DENSITY`).
    pub density: i64,
    /// Minimum arc cost (`MINCOST`).
    pub min_cost: i64,
    /// Maximum arc cost (`MAXCOST`).
    pub max_cost: i64,
    /// Total supply (`SUPPLY`).
    pub supply: i64,
    /// Transshipment sources (`TSOURCES`).
    pub transshipment_sources: i64,
    /// Transshipment sinks (`TSINKS`).
    pub transshipment_sinks: i64,
    /// Percentage of skeleton arcs given the maximum cost (`HICOST`).
    pub hicost_percent: i64,
    /// Percentage of skeleton arcs that are capacitated (`CAPACITATED`).
    pub capacitated_percent: i64,
    /// Minimum arc capacity (`MINCAP`).
    pub min_capacity: i64,
    /// Maximum arc capacity (`MAXCAP`).
    pub max_capacity: i64,
    /// Parent mode: 0 for sink nodes, 1 for arcs (`PARENT`).
    pub parent: i64,
    /// Number of interdependencies (`INTER`).
    pub interdependencies: i64,

    /// Largest node count accepted.
    #[arg(long = "max-nodes", default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: i64,
    /// Largest arc count accepted.
    #[arg(long = "max-arcs", default_value_t = DEFAULT_MAX_ARCS)]
    pub max_arcs: i64,
}

impl Cli {
    /// Converts the positional values into generation parameters.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameters`] when `parent` is neither
    /// `0` nor `1`.
    pub fn params(&self) -> Result<GenerationParams, GeneratorError> {
        Ok(GenerationParams {
            seed: self.seed,
            nodes: self.nodes,
            sources: self.sources,
            sinks: self.sinks,
            density: self.density,
            min_cost: self.min_cost,
            max_cost: self.max_cost,
            supply: self.supply,
            transshipment_sources: self.transshipment_sources,
            transshipment_sinks: self.transshipment_sinks,
            hicost_percent: self.hicost_percent,
            capacitated_percent: self.capacitated_percent,
            min_capacity: self.min_capacity,
            max_capacity: self.max_capacity,
            parent_mode: ParentMode::try_from(self.parent)?,
            interdependencies: self.interdependencies,
        })
    }

    /// Hard size limits from `--max-nodes` and `--max-arcs`.
    #[must_use]
    pub const fn limits(&self) -> Limits {
        Limits {
            max_nodes: self.max_nodes,
            max_arcs: self.max_arcs,
        }
    }
}

/// Errors surfaced while executing the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Validation or generation failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// The output file could not be written.
    #[error("unable to write to file `{path}`: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Process exit status reported for this error.
    ///
    /// Usage errors are reported by clap with status `2`, so each failure
    /// here has a status of its own above that.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Generator(err) => match err.code() {
                GeneratorErrorCode::BadSeed => 3,
                GeneratorErrorCode::TooBig => 4,
                GeneratorErrorCode::BadParameters => 5,
                GeneratorErrorCode::AllocationFailure => 6,
                _ => 1,
            },
            Self::Io { .. } => 7,
        }
    }

    /// Stable generator code, when the failure came from the generator.
    #[must_use]
    pub const fn generator_code(&self) -> Option<GeneratorErrorCode> {
        match self {
            Self::Generator(err) => Some(err.code()),
            Self::Io { .. } => None,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// File the network was written to.
    pub output: PathBuf,
    /// Number of nodes.
    pub nodes: usize,
    /// Number of arcs written.
    pub arcs: usize,
    /// Number of interdependencies written.
    pub interdependencies: usize,
    /// Arc counts by kind and balance totals.
    pub stats: NetworkStats,
}

/// Validates the arguments, generates the network, and writes it to the
/// output path.
///
/// Nothing is written unless generation succeeds, and the output replaces
/// the destination atomically.
///
/// # Errors
/// Returns [`CliError::Generator`] for invalid parameters and
/// [`CliError::Io`] when the output cannot be written.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use netgen_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = tempfile::tempdir()?;
/// let output = dir.path().join("net.min");
/// let cli = Cli::try_parse_from([
///     "netgen", output.to_str().ok_or("utf-8 path")?,
///     "123", "10", "2", "2", "20", "1", "100", "10000",
///     "0", "0", "100", "100", "100", "500", "1", "2",
/// ])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.interdependencies, 2);
/// assert!(std::fs::read_to_string(&output)?.contains("p min 10 "));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(output = %cli.output.display(), seed = cli.seed, arcs = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<GenerationSummary, CliError> {
    let network = GeneratorBuilder::new()
        .with_params(cli.params()?)
        .with_limits(cli.limits())
        .build()?
        .generate()?;
    write_output(&cli.output, &network)?;

    Span::current().record("arcs", network.arc_count());
    let summary = GenerationSummary {
        output: cli.output,
        nodes: network.node_count(),
        arcs: network.arc_count(),
        interdependencies: network.interdependencies().len(),
        stats: network.stats(),
    };
    info!(
        output = %summary.output.display(),
        arcs = summary.arcs,
        interdependencies = summary.interdependencies,
        "network written"
    );
    Ok(summary)
}

/// Writes `network` to a temporary file beside `path`, then moves it into
/// place.
pub(super) fn write_output(path: &Path, network: &Network) -> Result<(), CliError> {
    let io_error = |source: io::Error| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(directory).map_err(io_error)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        write_network(network, &mut writer).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
    }
    staged
        .persist(path)
        .map_err(|err| io_error(err.error))?;
    Ok(())
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::path::PathBuf;
/// # use netgen_cli::cli::{GenerationSummary, render_summary};
/// # use netgen_core::NetworkStats;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = GenerationSummary {
///     output: PathBuf::from("net.min"),
///     nodes: 10,
///     arcs: 18,
///     interdependencies: 2,
///     stats: NetworkStats::default(),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("output: net.min\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &GenerationSummary, mut writer: impl Write) -> io::Result<()> {
    let stats = &summary.stats;
    writeln!(writer, "output: {}", summary.output.display())?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(
        writer,
        "arcs: {} (skeleton {}, filler {}, delivery {})",
        summary.arcs, stats.skeleton_arcs, stats.filler_arcs, stats.delivery_arcs
    )?;
    writeln!(writer, "interdependencies: {}", summary.interdependencies)?;
    writeln!(
        writer,
        "supply: {} (demand {}, delivered {})",
        stats.total_supply, stats.total_demand, stats.delivered_demand
    )?;
    Ok(())
}
