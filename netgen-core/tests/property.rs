//! Property tests over randomly shaped, valid parameter sets.

mod common;

use std::collections::HashSet;

use common::{render, unreachable_demand};
use netgen_core::{
    ArcKind, GenerationParams, GeneratorBuilder, Network, ParentMode, ProblemKind, read_problem,
};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use test_strategy::Arbitrary;

/// Proportions from which a valid [`GenerationParams`] is derived.
#[derive(Clone, Debug, Arbitrary)]
struct Shape {
    #[strategy(1_i64..=2_000_000)]
    seed: i64,
    #[strategy(4_i64..=150)]
    nodes: i64,
    #[strategy(1_i64..=40)]
    source_percent: i64,
    #[strategy(1_i64..=40)]
    sink_percent: i64,
    #[strategy(1_i64..=8)]
    arcs_per_node: i64,
    #[strategy(0_i64..=20_000)]
    extra_supply: i64,
    #[strategy(0_i64..=100)]
    transshipment_source_percent: i64,
    #[strategy(0_i64..=100)]
    transshipment_sink_percent: i64,
    #[strategy(0_i64..=50)]
    min_cost: i64,
    #[strategy(0_i64..=100)]
    cost_span: i64,
    #[strategy(0_i64..=100)]
    hicost_percent: i64,
    #[strategy(0_i64..=100)]
    capacitated_percent: i64,
    #[strategy(0_i64..=200)]
    min_capacity: i64,
    #[strategy(0_i64..=500)]
    capacity_span: i64,
    parent_mode: Parents,
    #[strategy(0_i64..=100)]
    interdependency_percent: i64,
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum Parents {
    #[weight(1)]
    Node,
    #[weight(1)]
    Arc,
}

impl Shape {
    fn params(&self) -> GenerationParams {
        let sources = (self.nodes * self.source_percent / 100).max(1);
        let sinks = (self.nodes * self.sink_percent / 100).max(1);
        let density = self.nodes * self.arcs_per_node;
        let parent_mode = match self.parent_mode {
            Parents::Node => ParentMode::Node,
            Parents::Arc => ParentMode::Arc,
        };
        let parent_pool = match parent_mode {
            ParentMode::Node => sinks,
            ParentMode::Arc => density / 2,
        };
        GenerationParams {
            seed: self.seed,
            nodes: self.nodes,
            sources,
            sinks,
            density,
            min_cost: self.min_cost,
            max_cost: self.min_cost + self.cost_span,
            supply: sources + self.extra_supply,
            transshipment_sources: sources * self.transshipment_source_percent / 100,
            transshipment_sinks: sinks * self.transshipment_sink_percent / 100,
            hicost_percent: self.hicost_percent,
            capacitated_percent: self.capacitated_percent,
            min_capacity: self.min_capacity,
            max_capacity: self.min_capacity + self.capacity_span,
            parent_mode,
            interdependencies: parent_pool * self.interdependency_percent / 100,
        }
    }
}

fn generate(params: &GenerationParams) -> Result<Network, TestCaseError> {
    let generator = GeneratorBuilder::new()
        .with_params(params.clone())
        .build()
        .map_err(|err| TestCaseError::fail(format!("rejected {params:?}: {err}")))?;
    generator
        .generate()
        .map_err(|err| TestCaseError::fail(format!("generation failed: {err}")))
}

fn delivered(network: &Network) -> i64 {
    network
        .arcs()
        .iter()
        .filter(|arc| arc.kind == ArcKind::Delivery)
        .map(|arc| arc.capacity)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn supply_is_conserved(shape in any::<Shape>()) {
        let params = shape.params();
        let network = generate(&params)?;
        let stats = network.stats();
        prop_assert_eq!(stats.delivered_demand, delivered(&network));
        prop_assert_eq!(network.balances().iter().sum::<i64>(), stats.delivered_demand);
        prop_assert_eq!(stats.total_supply, params.supply);
        prop_assert_eq!(stats.total_demand + stats.delivered_demand, params.supply);
    }

    #[test]
    fn arc_count_is_bounded_by_density(shape in any::<Shape>()) {
        let params = shape.params();
        let network = generate(&params)?;
        let stats = network.stats();
        let density = usize::try_from(params.density).unwrap_or(usize::MAX);
        let skeleton = stats.skeleton_arcs + stats.delivery_arcs;
        prop_assert!(network.arc_count() <= density.max(skeleton));
        if network.arc_count() > density {
            prop_assert_eq!(stats.filler_arcs, 0);
        }
    }

    #[test]
    fn demand_is_reachable(shape in any::<Shape>()) {
        let params = shape.params();
        let network = generate(&params)?;
        let stranded = unreachable_demand(&network);
        prop_assert!(stranded.is_empty(), "stranded demand at {:?} for {:?}", stranded, params);
    }

    #[test]
    fn interdependencies_are_distinct(shape in any::<Shape>()) {
        let params = shape.params();
        let network = generate(&params)?;
        let pairs = network.interdependencies();
        prop_assert!(i64::try_from(pairs.len()).unwrap_or(i64::MAX) <= params.interdependencies);
        let children: HashSet<usize> = pairs.iter().map(|pair| pair.child).collect();
        let parents: HashSet<usize> = pairs.iter().map(|pair| pair.parent).collect();
        prop_assert_eq!(children.len(), pairs.len());
        prop_assert_eq!(parents.len(), pairs.len());
        prop_assert!(children.is_disjoint(&parents));
        for pair in pairs {
            prop_assert!(network.arc(pair.child).is_some());
            prop_assert!(network.arc(pair.parent).is_some());
        }
    }

    #[test]
    fn node_parents_are_drained(shape in any::<Shape>()) {
        let base = shape.params();
        let params = GenerationParams {
            parent_mode: ParentMode::Node,
            interdependencies: base.sinks,
            ..base
        };
        let network = generate(&params)?;
        for pair in network.interdependencies() {
            let parent = network.arc(pair.parent);
            prop_assert!(parent.is_some_and(|arc| arc.kind == ArcKind::Delivery));
            let sink = parent.and_then(|arc| usize::try_from(arc.tail).ok()).unwrap_or(0);
            prop_assert_eq!(network.balance(sink), Some(0));
        }
    }

    #[test]
    fn output_is_deterministic_and_parses_back(shape in any::<Shape>()) {
        let params = shape.params();
        let first = render(&generate(&params)?);
        let second = render(&generate(&params)?);
        prop_assert_eq!(&first, &second);
        let parsed = read_problem(first.as_bytes())
            .map_err(|err| TestCaseError::fail(format!("output did not parse: {err}")))?;
        prop_assert_eq!(parsed.nodes, usize::try_from(params.nodes).unwrap_or(0));
        if !params.is_max_flow() {
            prop_assert_eq!(parsed.kind, ProblemKind::MinCost { parent_mode: params.parent_mode });
            prop_assert_eq!(
                parsed.total_supply(),
                parsed.total_demand() + parsed.delivered_demand()
            );
        }
    }
}
