//! In-memory representation of a generated network.
//!
//! Node ids and arc ids are 1-based, matching the text format. Balances are
//! stored densely per node; arcs in creation order.

use crate::params::{GenerationParams, ParentMode};

/// Role an arc played during generation. Never serialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcKind {
    /// Part of a source-to-sink chain.
    Skeleton,
    /// Added to approach the requested density.
    Filler,
    /// Drains a parent sink node's demand (node-parent mode only).
    Delivery,
}

/// A directed, capacitated arc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arc {
    /// Origin node id.
    pub tail: i64,
    /// Destination node id; `0` for delivery arcs, whose head is unused.
    pub head: i64,
    /// Upper bound on flow.
    pub capacity: i64,
    /// Cost per unit of flow.
    pub cost: i64,
    /// Generation role.
    pub kind: ArcKind,
}

/// Couples the utilisation of a child arc to that of a parent arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interdependency {
    /// Parent arc id.
    pub parent: usize,
    /// Child arc id.
    pub child: usize,
}

/// Arc counts and flow totals of a [`Network`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkStats {
    /// Skeleton arcs emitted.
    pub skeleton_arcs: usize,
    /// Filler arcs emitted.
    pub filler_arcs: usize,
    /// Delivery arcs appended for node parents.
    pub delivery_arcs: usize,
    /// Sum of positive balances.
    pub total_supply: i64,
    /// Sum of negative balances, as a positive number.
    pub total_demand: i64,
    /// Capacity of the delivery arcs. Parent sinks hand their demand to these
    /// arcs, so `total_supply == total_demand + delivered_demand`.
    pub delivered_demand: i64,
}

/// A finished network together with its interdependencies.
///
/// # Examples
/// ```
/// use netgen_core::{GenerationParams, GeneratorBuilder};
///
/// let params = GenerationParams {
///     seed: 123,
///     nodes: 10,
///     sources: 2,
///     sinks: 2,
///     density: 20,
///     interdependencies: 2,
///     ..GenerationParams::default()
/// };
/// let network = GeneratorBuilder::new()
///     .with_params(params)
///     .build()
///     .expect("parameters are valid")
///     .generate()
///     .expect("generation succeeds");
/// let stats = network.stats();
/// assert_eq!(network.balances().iter().sum::<i64>(), stats.delivered_demand);
/// assert_eq!(stats.total_supply, stats.total_demand + stats.delivered_demand);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    params: GenerationParams,
    balances: Vec<i64>,
    arcs: Vec<Arc>,
    interdependencies: Vec<Interdependency>,
}

impl Network {
    pub(crate) const fn new(
        params: GenerationParams,
        balances: Vec<i64>,
        arcs: Vec<Arc>,
        interdependencies: Vec<Interdependency>,
    ) -> Self {
        Self {
            params,
            balances,
            arcs,
            interdependencies,
        }
    }

    /// Parameters the network was generated from.
    #[must_use]
    pub const fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Parent mode the interdependencies were drawn under.
    #[must_use]
    pub const fn parent_mode(&self) -> ParentMode {
        self.params.parent_mode
    }

    /// Number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.balances.len()
    }

    /// Per-node balances, indexed by `node id - 1`.
    #[must_use]
    pub fn balances(&self) -> &[i64] {
        &self.balances
    }

    /// Balance of a 1-based node id.
    #[must_use]
    pub fn balance(&self, node: usize) -> Option<i64> {
        node.checked_sub(1)
            .and_then(|index| self.balances.get(index))
            .copied()
    }

    /// Arcs in creation order; arc id `k` is at index `k - 1`.
    #[must_use]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Arc with the given 1-based id.
    #[must_use]
    pub fn arc(&self, id: usize) -> Option<&Arc> {
        id.checked_sub(1).and_then(|index| self.arcs.get(index))
    }

    /// Number of arcs actually generated.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Interdependencies in draw order.
    #[must_use]
    pub fn interdependencies(&self) -> &[Interdependency] {
        &self.interdependencies
    }

    /// Counts arcs by kind and totals the balances and delivered demand.
    #[must_use]
    pub fn stats(&self) -> NetworkStats {
        let mut stats = self
            .arcs
            .iter()
            .fold(NetworkStats::default(), |mut stats, arc| {
                match arc.kind {
                    ArcKind::Skeleton => stats.skeleton_arcs += 1,
                    ArcKind::Filler => stats.filler_arcs += 1,
                    ArcKind::Delivery => {
                        stats.delivery_arcs += 1;
                        stats.delivered_demand += arc.capacity;
                    }
                }
                stats
            });
        for &balance in &self.balances {
            if balance > 0 {
                stats.total_supply += balance;
            } else {
                stats.total_demand -= balance;
            }
        }
        stats
    }
}
