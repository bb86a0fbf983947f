//! Run parameters, parent modes, and hard size limits.

use std::fmt;

use crate::error::{Constraint, GeneratorError, Result};

/// Largest node count accepted by default.
pub const DEFAULT_MAX_NODES: i64 = 5_000;
/// Largest arc count accepted by default.
pub const DEFAULT_MAX_ARCS: i64 = 60_000;

/// Selects what an interdependency's parent refers to.
///
/// # Examples
/// ```
/// use netgen_core::ParentMode;
///
/// assert_eq!(ParentMode::try_from(0).ok(), Some(ParentMode::Node));
/// assert_eq!(ParentMode::Arc.token(), 'a');
/// assert!(ParentMode::try_from(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentMode {
    /// Parents are sink nodes, rewritten into delivery arcs after generation.
    Node,
    /// Parents are arcs drawn from the same pool as the children.
    Arc,
}

impl ParentMode {
    /// Numeric selector used on the command line (`0` or `1`).
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Node => 0,
            Self::Arc => 1,
        }
    }

    /// Trailing token of the `p min` problem line.
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Self::Node => 'n',
            Self::Arc => 'a',
        }
    }

    /// Parses the trailing problem-line token.
    #[must_use]
    pub const fn from_token(token: char) -> Option<Self> {
        match token {
            'n' => Some(Self::Node),
            'a' => Some(Self::Arc),
            _ => None,
        }
    }

    /// Label echoed in the output header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Node => "Sink Nodes",
            Self::Arc => "Arcs",
        }
    }
}

impl TryFrom<i64> for ParentMode {
    type Error = GeneratorError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Self::Node),
            1 => Ok(Self::Arc),
            _ => Err(Constraint::UnknownParentMode.into()),
        }
    }
}

impl fmt::Display for ParentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Node => "node",
            Self::Arc => "arc",
        })
    }
}

/// Hard ceilings on the size of a generated network.
///
/// Requests beyond these limits are rejected before any random draw.
///
/// # Examples
/// ```
/// use netgen_core::Limits;
///
/// let limits = Limits::default();
/// assert_eq!(limits.max_nodes, 5_000);
/// assert_eq!(limits.to_string(), "5000 nodes and 60000 arcs");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Maximum accepted `NODES`.
    pub max_nodes: i64,
    /// Maximum accepted `DENSITY`.
    pub max_arcs: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            max_arcs: DEFAULT_MAX_ARCS,
        }
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nodes and {} arcs", self.max_nodes, self.max_arcs)
    }
}

/// Structural parameters for one generation run.
///
/// Node ids `1..=sources` are sources and the last `sinks` ids are sinks;
/// everything in between is a transshipment node. The defaults mirror the
/// experiment settings the generator was tuned for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    /// Random seed; must be positive.
    pub seed: i64,
    /// Number of nodes (`NODES`).
    pub nodes: i64,
    /// Number of sources, transshipment sources included (`SOURCES`).
    pub sources: i64,
    /// Number of sinks, transshipment sinks included (`SINKS`).
    pub sinks: i64,
    /// Requested arc count (`DENSITY`).
    pub density: i64,
    /// Minimum arc cost (`MINCOST`).
    pub min_cost: i64,
    /// Maximum arc cost (`MAXCOST`).
    pub max_cost: i64,
    /// Total supply spread over the sources (`SUPPLY`).
    pub supply: i64,
    /// Sources that may also receive flow (`TSOURCES`).
    pub transshipment_sources: i64,
    /// Sinks that may also send flow (`TSINKS`).
    pub transshipment_sinks: i64,
    /// Percentage of skeleton arcs given the maximum cost (`HICOST`).
    pub hicost_percent: i64,
    /// Percentage of arcs that are capacitated (`CAPACITATED`).
    pub capacitated_percent: i64,
    /// Minimum capacity of a capacitated arc (`MINCAP`).
    pub min_capacity: i64,
    /// Maximum capacity of a capacitated arc (`MAXCAP`).
    pub max_capacity: i64,
    /// What interdependency parents refer to (`PARENT`).
    pub parent_mode: ParentMode,
    /// Number of interdependencies (`INTER`).
    pub interdependencies: i64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: 1,
            nodes: 256,
            sources: 52,
            sinks: 52,
            density: 1_024,
            min_cost: 1,
            max_cost: 100,
            supply: 10_000,
            transshipment_sources: 0,
            transshipment_sinks: 0,
            hicost_percent: 100,
            capacitated_percent: 100,
            min_capacity: 100,
            max_capacity: 500,
            parent_mode: ParentMode::Arc,
            interdependencies: 11,
        }
    }
}

impl GenerationParams {
    /// Number of pure transshipment nodes between the sources and sinks.
    #[must_use]
    pub const fn transshipment_nodes(&self) -> i64 {
        self.nodes - self.sources - self.sinks
    }

    /// Unit costs everywhere turn the instance into a maximum-flow problem.
    #[must_use]
    pub const fn is_max_flow(&self) -> bool {
        self.min_cost == 1 && self.max_cost == 1
    }

    /// Checks every structural rule, in the order the generator has always
    /// applied them.
    ///
    /// # Errors
    /// Returns [`GeneratorError::BadSeed`] for a non-positive seed,
    /// [`GeneratorError::TooBig`] when `limits` are exceeded, and
    /// [`GeneratorError::InvalidParameters`] naming the first violated
    /// [`Constraint`] otherwise.
    ///
    /// # Examples
    /// ```
    /// use netgen_core::{Constraint, GenerationParams, Limits};
    ///
    /// let params = GenerationParams {
    ///     min_capacity: 600,
    ///     ..GenerationParams::default()
    /// };
    /// let err = params.validate(Limits::default()).expect_err("capacities are inverted");
    /// assert_eq!(err.constraint(), Some(Constraint::CapacityRange));
    /// ```
    pub fn validate(&self, limits: Limits) -> Result<()> {
        if self.seed <= 0 {
            return Err(GeneratorError::BadSeed { seed: self.seed });
        }
        if self.nodes > limits.max_nodes || self.density > limits.max_arcs {
            return Err(GeneratorError::TooBig {
                nodes: self.nodes,
                arcs: self.density,
                limits,
            });
        }
        match self.first_violation() {
            Some(constraint) => Err(constraint.into()),
            None => Ok(()),
        }
    }

    fn first_violation(&self) -> Option<Constraint> {
        let percent = 0..=100;
        let node_parents = self.parent_mode == ParentMode::Node;
        [
            (self.nodes <= 0, Constraint::NodesPositive),
            (self.nodes > self.density, Constraint::NodesWithinDensity),
            (self.sources <= 0, Constraint::SourcesPositive),
            (self.sinks <= 0, Constraint::SinksPositive),
            (
                self.sources.saturating_add(self.sinks) > self.nodes,
                Constraint::TerminalsWithinNodes,
            ),
            (self.min_cost > self.max_cost, Constraint::CostRange),
            (self.supply < self.sources, Constraint::SupplyCoversSources),
            (
                self.transshipment_sources > self.sources,
                Constraint::TransshipmentSources,
            ),
            (
                self.transshipment_sinks > self.sinks,
                Constraint::TransshipmentSinks,
            ),
            (
                !percent.contains(&self.hicost_percent),
                Constraint::HiCostPercentage,
            ),
            (
                !percent.contains(&self.capacitated_percent),
                Constraint::CapacitatedPercentage,
            ),
            (self.min_capacity > self.max_capacity, Constraint::CapacityRange),
            (
                node_parents && self.interdependencies > self.sinks,
                Constraint::NodeParentsWithinSinks,
            ),
            (
                !node_parents && self.interdependencies > self.density / 2,
                Constraint::ArcParentsWithinDensity,
            ),
        ]
        .into_iter()
        .find_map(|(violated, constraint)| violated.then_some(constraint))
    }
}
