//! The network generation algorithm.
//!
//! A run proceeds in phases that all draw from one [`RandomStream`]:
//!
//! 1. supply is split across the sources;
//! 2. transshipment nodes are dealt onto per-source chains;
//! 3. each chain is hooked to sinks, its supply turned into sink demand, and
//!    its skeleton arcs emitted tail group by tail group, each group followed
//!    by filler arcs;
//! 4. transshipment sinks receive filler arcs of their own;
//! 5. interdependencies are drawn;
//! 6. in node-parent mode, parent sinks are rewritten into delivery arcs.
//!
//! Filler arcs stop at `DENSITY`, less the room kept for skeleton arcs still
//! to come and for delivery arcs. Skeleton arcs are always emitted so every
//! sink stays reachable; only when the skeleton alone outgrows `DENSITY`
//! does the network exceed it.
//!
//! The order of draws is part of the contract: the same seed and parameters
//! always produce the same network.
//!
//! [`RandomStream`]: crate::RandomStream

mod context;
mod filler;
mod interdependency;
mod skeleton;
mod supply;

use tracing::{debug, info, instrument};

use crate::{
    error::Result,
    network::Network,
    params::{GenerationParams, Limits, ParentMode},
};

use self::context::GenerationContext;

pub use self::interdependency::DELIVERY_COST;

/// A validated generator, ready to produce networks.
///
/// Obtain one from [`crate::GeneratorBuilder`]; construction is where every
/// parameter check happens, so [`Generator::generate`] never consumes a
/// random draw for an invalid request.
#[derive(Debug, Clone)]
pub struct Generator {
    params: GenerationParams,
    limits: Limits,
}

impl Generator {
    pub(crate) const fn new(params: GenerationParams, limits: Limits) -> Self {
        Self { params, limits }
    }

    /// Parameters this generator runs with.
    #[must_use]
    pub const fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Limits the parameters were validated against.
    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    /// Generates the network described by the parameters.
    ///
    /// Calling this repeatedly yields identical networks.
    ///
    /// # Errors
    /// Returns [`crate::GeneratorError::AllocationFailure`] when the node or
    /// arc arenas cannot be reserved.
    ///
    /// # Examples
    /// ```
    /// use netgen_core::{GenerationParams, GeneratorBuilder, ParentMode};
    ///
    /// let generator = GeneratorBuilder::new()
    ///     .with_params(GenerationParams {
    ///         seed: 42,
    ///         nodes: 30,
    ///         sources: 4,
    ///         sinks: 5,
    ///         density: 120,
    ///         parent_mode: ParentMode::Node,
    ///         interdependencies: 3,
    ///         ..GenerationParams::default()
    ///     })
    ///     .build()
    ///     .expect("parameters are valid");
    /// let first = generator.generate().expect("generation succeeds");
    /// let second = generator.generate().expect("generation succeeds");
    /// assert_eq!(first, second);
    /// assert_eq!(first.interdependencies().len(), 3);
    /// ```
    #[instrument(
        name = "netgen.generate",
        err,
        skip(self),
        fields(
            seed = self.params.seed,
            nodes = self.params.nodes,
            density = self.params.density,
            parent_mode = %self.params.parent_mode,
        ),
    )]
    pub fn generate(&self) -> Result<Network> {
        let mut context = GenerationContext::new(&self.params)?;

        supply::distribute(&mut context);
        skeleton::build_chains(&mut context);
        skeleton::attach_sources(&mut context);
        debug!(arcs = context.arc_count(), "skeleton and filler arcs emitted");

        filler::add_transshipment_sink_arcs(&mut context);
        debug!(arcs = context.arc_count(), "transshipment sink arcs emitted");
        report_budget_pressure(&context);

        let pairs = interdependency::select(&mut context);
        let interdependencies = match self.params.parent_mode {
            ParentMode::Node => interdependency::rewrite_node_parents(&mut context, pairs),
            ParentMode::Arc => interdependency::arc_pairs(pairs),
        };

        let network = context.into_network(interdependencies);
        let stats = network.stats();
        info!(
            arcs = network.arc_count(),
            skeleton_arcs = stats.skeleton_arcs,
            filler_arcs = stats.filler_arcs,
            delivery_arcs = stats.delivery_arcs,
            interdependencies = network.interdependencies().len(),
            supply = stats.total_supply,
            delivered = stats.delivered_demand,
            "network generated"
        );
        Ok(network)
    }
}

fn report_budget_pressure(context: &GenerationContext<'_>) {
    if context.over_budget_arcs > 0 {
        debug!(
            over_budget = context.over_budget_arcs,
            density = context.params.density,
            arcs = context.arc_count(),
            "skeleton arcs exceed the arc budget"
        );
    }
    if context.refused_arcs > 0 {
        debug!(
            refused = context.refused_arcs,
            density = context.params.density,
            "filler arcs refused by the arc budget"
        );
    }
}
