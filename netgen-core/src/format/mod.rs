//! Line-oriented text format for generated networks.
//!
//! Every line starts with a one-letter tag followed by space-separated
//! fields:
//!
//! - `c ...` comments, used to echo the run parameters;
//! - `p min <nodes> <arcs> <inter> <n|a>` or `p max <nodes> <arcs>`;
//! - `n <id> <balance>` (or `n <id> s|t` for maximum flow);
//! - `a <tail> <head> 0 <capacity> <cost>` (or `a <tail> <head> <capacity>`);
//! - `i <parent arc> <child arc>`.
//!
//! Consumers read fields positionally, so field order and the zero lower
//! bound are fixed.

mod reader;
mod writer;

pub use reader::{
    NodeDesignation, ParseError, ParseErrorCode, ParsedArc, ParsedNode, ParsedProblem,
    ProblemKind, read_problem,
};
pub use writer::write_network;
