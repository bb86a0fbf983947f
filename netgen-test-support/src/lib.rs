//! Shared test utilities used across netgen crates.

pub mod tracing;
