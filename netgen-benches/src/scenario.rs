//! Parameter scenarios shared by the benchmarks.
//!
//! The largest scenarios sit on the default hard limits, where a run is
//! expected to finish well under a second.

use std::fmt;

use netgen_core::{
    DEFAULT_MAX_ARCS, DEFAULT_MAX_NODES, GenerationParams, Generator, GeneratorBuilder,
    ParentMode, Result,
};

/// Named parameter set for one benchmark input.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Short identifier shown in Criterion reports.
    pub name: &'static str,
    /// Parameters the generator runs with.
    pub params: GenerationParams,
}

impl Scenario {
    /// Validates the scenario under the default limits.
    ///
    /// # Errors
    /// Returns the [`netgen_core::GeneratorError`] raised by validation.
    pub fn generator(&self) -> Result<Generator> {
        GeneratorBuilder::new()
            .with_params(self.params.clone())
            .build()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},n={},m={}",
            self.name, self.params.nodes, self.params.density
        )
    }
}

/// Ten-node instance with two arc-parent interdependencies.
#[must_use]
pub fn small() -> Scenario {
    Scenario {
        name: "small",
        params: GenerationParams {
            seed: 123,
            nodes: 10,
            sources: 2,
            sinks: 2,
            density: 20,
            interdependencies: 2,
            ..GenerationParams::default()
        },
    }
}

/// The default experiment parameters.
#[must_use]
pub fn experiment() -> Scenario {
    Scenario {
        name: "experiment",
        params: GenerationParams::default(),
    }
}

/// Largest accepted instance with arc parents.
#[must_use]
pub fn arc_limit() -> Scenario {
    Scenario {
        name: "arc-limit",
        params: GenerationParams {
            seed: 13_502_460,
            nodes: DEFAULT_MAX_NODES,
            sources: 500,
            sinks: 500,
            density: DEFAULT_MAX_ARCS,
            supply: 1_000_000,
            transshipment_sources: 50,
            transshipment_sinks: 50,
            hicost_percent: 30,
            capacitated_percent: 50,
            parent_mode: ParentMode::Arc,
            interdependencies: 5_000,
            ..GenerationParams::default()
        },
    }
}

/// Largest accepted instance with sink-node parents.
#[must_use]
pub fn node_limit() -> Scenario {
    let arc = arc_limit();
    Scenario {
        name: "node-limit",
        params: GenerationParams {
            parent_mode: ParentMode::Node,
            interdependencies: 400,
            ..arc.params
        },
    }
}

/// Every scenario, smallest first.
#[must_use]
pub fn all() -> Vec<Scenario> {
    vec![small(), experiment(), arc_limit(), node_limit()]
}
