//! Error types for the network generator.
//!
//! Defines the closed set of generation failures, their stable codes, and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::params::Limits;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Structural parameter check that a run violated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Constraint {
    /// `NODES` must be positive.
    NodesPositive,
    /// `NODES` must not exceed the requested arc count.
    NodesWithinDensity,
    /// `SOURCES` must be positive.
    SourcesPositive,
    /// `SINKS` must be positive.
    SinksPositive,
    /// Sources and sinks must fit inside the node range.
    TerminalsWithinNodes,
    /// `MINCOST` must not exceed `MAXCOST`.
    CostRange,
    /// Every source needs at least one unit of supply.
    SupplyCoversSources,
    /// `TSOURCES` must not exceed `SOURCES`.
    TransshipmentSources,
    /// `TSINKS` must not exceed `SINKS`.
    TransshipmentSinks,
    /// `HICOST` is a percentage.
    HiCostPercentage,
    /// `CAPACITATED` is a percentage.
    CapacitatedPercentage,
    /// `MINCAP` must not exceed `MAXCAP`.
    CapacityRange,
    /// `PARENT` must select nodes (0) or arcs (1).
    UnknownParentMode,
    /// Node parents are drawn from the sinks, so `INTER <= SINKS`.
    NodeParentsWithinSinks,
    /// Arc parents and children share one pool, so `INTER <= DENSITY / 2`.
    ArcParentsWithinDensity,
}

impl Constraint {
    /// Human-readable statement of the rule.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NodesPositive => "node count must be positive",
            Self::NodesWithinDensity => "node count must not exceed arc count",
            Self::SourcesPositive => "source count must be positive",
            Self::SinksPositive => "sink count must be positive",
            Self::TerminalsWithinNodes => "sources plus sinks must not exceed node count",
            Self::CostRange => "minimum cost must not exceed maximum cost",
            Self::SupplyCoversSources => "total supply must be at least the source count",
            Self::TransshipmentSources => "transshipment sources must not exceed sources",
            Self::TransshipmentSinks => "transshipment sinks must not exceed sinks",
            Self::HiCostPercentage => "max-cost skeleton percentage must lie in [0, 100]",
            Self::CapacitatedPercentage => "capacitated percentage must lie in [0, 100]",
            Self::CapacityRange => "minimum capacity must not exceed maximum capacity",
            Self::UnknownParentMode => "parent mode must be 0 (nodes) or 1 (arcs)",
            Self::NodeParentsWithinSinks => {
                "node-parent interdependencies must not exceed sink count"
            }
            Self::ArcParentsWithinDensity => {
                "arc-parent interdependencies must not exceed half the arc count"
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Error produced when validating parameters or generating a network.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GeneratorError {
    /// The random seed must be strictly positive.
    #[error("the generator requires a positive random seed (got {seed})")]
    BadSeed {
        /// Seed supplied by the caller.
        seed: i64,
    },
    /// The requested size exceeds the configured hard limits.
    #[error(
        "problem too large for generator: {nodes} nodes and {arcs} arcs requested, limits are {limits}"
    )]
    TooBig {
        /// Requested node count.
        nodes: i64,
        /// Requested arc count.
        arcs: i64,
        /// Limits in force for the run.
        limits: Limits,
    },
    /// The parameter set is inconsistent.
    #[error("inconsistent parameter settings: {constraint}")]
    InvalidParameters {
        /// First rule the parameters violated.
        constraint: Constraint,
    },
    /// Reserving the generation arenas failed.
    #[error("memory allocation failure while reserving {requested} slots")]
    AllocationFailure {
        /// Number of slots the failed reservation asked for.
        requested: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GeneratorError`] variants.
    enum GeneratorErrorCode for GeneratorError {
        /// The random seed must be strictly positive.
        BadSeed => BadSeed { .. } => "NETGEN_BAD_SEED",
        /// The requested size exceeds the configured hard limits.
        TooBig => TooBig { .. } => "NETGEN_TOO_BIG",
        /// The parameter set is inconsistent.
        BadParameters => InvalidParameters { .. } => "NETGEN_BAD_PARAMETERS",
        /// Reserving the generation arenas failed.
        AllocationFailure => AllocationFailure { .. } => "NETGEN_ALLOCATION_FAILURE",
    }
}

impl GeneratorErrorCode {
    /// Numeric status historically reported by the generator (`-1` to `-4`).
    #[must_use]
    pub const fn legacy_code(self) -> i32 {
        match self {
            Self::BadSeed => -1,
            Self::TooBig => -2,
            Self::BadParameters => -3,
            Self::AllocationFailure => -4,
        }
    }
}

impl GeneratorError {
    /// Returns the violated [`Constraint`] for parameter errors.
    #[must_use]
    pub const fn constraint(&self) -> Option<Constraint> {
        match self {
            Self::InvalidParameters { constraint } => Some(*constraint),
            _ => None,
        }
    }
}

impl From<Constraint> for GeneratorError {
    fn from(constraint: Constraint) -> Self {
        Self::InvalidParameters { constraint }
    }
}

/// Convenient alias for results returned by the generator API.
pub type Result<T> = core::result::Result<T, GeneratorError>;
