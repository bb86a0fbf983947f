//! Benchmark support crate for netgen.
//!
//! Provides the parameter scenarios and setup errors used by the Criterion
//! benchmarks for generation and for the text format.

pub mod error;
pub mod scenario;
