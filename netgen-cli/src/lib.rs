//! Support library for the `netgen` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and tests can
//! drive a run without spawning a process.

pub mod cli;
pub mod logging;
