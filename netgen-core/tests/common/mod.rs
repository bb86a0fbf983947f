//! Parameter sets and helpers shared by the integration tests.

use std::collections::{HashSet, VecDeque};

use netgen_core::{
    ArcKind, GenerationParams, GeneratorBuilder, Network, ParentMode, write_network,
};

/// The small arc-parent instance used for round trips.
#[must_use]
pub fn small_arc_params() -> GenerationParams {
    GenerationParams {
        seed: 123,
        nodes: 10,
        sources: 2,
        sinks: 2,
        density: 20,
        parent_mode: ParentMode::Arc,
        interdependencies: 2,
        ..GenerationParams::default()
    }
}

/// A mid-sized node-parent instance with transshipment terminals.
#[must_use]
pub fn node_parent_params() -> GenerationParams {
    GenerationParams {
        seed: 2_024,
        nodes: 60,
        sources: 6,
        sinks: 10,
        density: 400,
        supply: 5_000,
        transshipment_sources: 2,
        transshipment_sinks: 3,
        hicost_percent: 30,
        capacitated_percent: 60,
        parent_mode: ParentMode::Node,
        interdependencies: 8,
        ..GenerationParams::default()
    }
}

/// Unit costs select the maximum-flow output form.
#[must_use]
pub fn max_flow_params() -> GenerationParams {
    GenerationParams {
        seed: 77,
        nodes: 40,
        sources: 4,
        sinks: 5,
        density: 200,
        min_cost: 1,
        max_cost: 1,
        interdependencies: 4,
        ..GenerationParams::default()
    }
}

/// Validates `params` and generates the network.
#[must_use]
pub fn generate(params: GenerationParams) -> Network {
    GeneratorBuilder::new()
        .with_params(params)
        .build()
        .expect("parameters must be valid")
        .generate()
        .expect("generation must succeed")
}

/// Renders `network` in the text format.
#[must_use]
pub fn render(network: &Network) -> String {
    let mut buffer = Vec::new();
    write_network(network, &mut buffer).expect("writing to memory must succeed");
    String::from_utf8(buffer).expect("output must be UTF-8")
}

/// Nodes with demand that no source reaches over skeleton and filler arcs.
#[must_use]
pub fn unreachable_demand(network: &Network) -> Vec<usize> {
    let mut reached: HashSet<i64> = (1..=network.params().sources).collect();
    let mut queue: VecDeque<i64> = reached.iter().copied().collect();
    while let Some(node) = queue.pop_front() {
        for arc in network.arcs() {
            if arc.kind != ArcKind::Delivery && arc.tail == node && reached.insert(arc.head) {
                queue.push_back(arc.head);
            }
        }
    }
    network
        .balances()
        .iter()
        .zip(1_usize..)
        .filter(|&(&balance, node)| {
            balance < 0 && !i64::try_from(node).is_ok_and(|id| reached.contains(&id))
        })
        .map(|(_, node)| node)
        .collect()
}
