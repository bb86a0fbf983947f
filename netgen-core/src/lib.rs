//! Netgen core library: a seeded generator for minimum-cost flow networks
//! with interdependent arcs, and the text format those networks travel in.

mod builder;
mod error;
mod format;
mod generator;
mod network;
mod params;
mod random;
mod selection;

pub use crate::{
    builder::GeneratorBuilder,
    error::{Constraint, GeneratorError, GeneratorErrorCode, Result},
    format::{
        NodeDesignation, ParseError, ParseErrorCode, ParsedArc, ParsedNode, ParsedProblem,
        ProblemKind, read_problem, write_network,
    },
    generator::{DELIVERY_COST, Generator},
    network::{Arc, ArcKind, Interdependency, Network, NetworkStats},
    params::{DEFAULT_MAX_ARCS, DEFAULT_MAX_NODES, GenerationParams, Limits, ParentMode},
    random::RandomStream,
    selection::SelectionSet,
};
