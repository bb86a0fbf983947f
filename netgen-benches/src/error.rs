//! Benchmark setup error type.

use std::io;

use netgen_core::{GeneratorError, ParseError};

/// Errors that may occur while preparing a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A scenario was rejected or failed to generate.
    #[error("generation failed: {0}")]
    Generator(#[from] GeneratorError),
    /// Rendering a network into memory failed.
    #[error("rendering failed: {0}")]
    Render(#[from] io::Error),
    /// A rendered network could not be read back.
    #[error("parsing failed: {0}")]
    Parse(#[from] ParseError),
}
