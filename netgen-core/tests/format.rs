//! Integration tests for the text format: generated output parses back into
//! the network it came from.

mod common;

use common::{generate, max_flow_params, node_parent_params, render, small_arc_params};
use netgen_core::{
    GenerationParams, Network, NodeDesignation, ParentMode, ParsedProblem, ProblemKind,
    read_problem,
};
use rstest::rstest;

fn round_trip(params: GenerationParams) -> (Network, ParsedProblem) {
    let network = generate(params);
    let text = render(&network);
    let parsed = read_problem(text.as_bytes()).expect("generated output must parse");
    (network, parsed)
}

#[rstest]
#[case::small_arc(small_arc_params())]
#[case::node_parents(node_parent_params())]
#[case::defaults(GenerationParams::default())]
fn min_cost_output_round_trips(#[case] params: GenerationParams) {
    let (network, parsed) = round_trip(params);
    assert_eq!(
        parsed.kind,
        ProblemKind::MinCost {
            parent_mode: network.parent_mode()
        }
    );
    assert_eq!(parsed.nodes, network.node_count());
    assert_eq!(parsed.arcs.len(), network.arc_count());
    assert_eq!(parsed.interdependencies, network.interdependencies());

    let nonzero = network.balances().iter().filter(|&&b| b != 0).count();
    assert_eq!(parsed.node_lines.len(), nonzero);
    for node in &parsed.node_lines {
        let NodeDesignation::Balance(balance) = node.designation else {
            panic!("min-cost node lines carry balances");
        };
        assert_eq!(network.balance(node.id), Some(balance));
    }

    let stats = network.stats();
    assert_eq!(parsed.total_supply(), stats.total_supply);
    assert_eq!(parsed.total_demand(), stats.total_demand);
    assert_eq!(parsed.delivered_demand(), stats.delivered_demand);
    assert_eq!(
        parsed.total_supply(),
        parsed.total_demand() + parsed.delivered_demand()
    );

    for (parsed_arc, arc) in parsed.arcs.iter().zip(network.arcs()) {
        assert_eq!(parsed_arc.tail, arc.tail);
        assert_eq!(parsed_arc.head, arc.head);
        assert_eq!(parsed_arc.capacity, arc.capacity);
        assert_eq!(parsed_arc.cost, Some(arc.cost));
    }
}

#[rstest]
fn small_instance_has_the_expected_shape() {
    let (network, parsed) = round_trip(small_arc_params());
    assert_eq!(parsed.nodes, 10);
    assert!(parsed.arcs.len() <= 20);
    assert_eq!(parsed.interdependencies.len(), 2);
    assert_eq!(parsed.total_supply(), 10_000);
    assert_eq!(network.params().parent_mode, ParentMode::Arc);
}

#[rstest]
fn max_flow_output_round_trips() {
    let (network, parsed) = round_trip(max_flow_params());
    assert_eq!(parsed.kind, ProblemKind::MaxFlow);
    assert_eq!(parsed.arcs.len(), network.arc_count());
    assert!(parsed.interdependencies.is_empty());
    assert!(parsed.arcs.iter().all(|arc| arc.cost.is_none()));
    for node in &parsed.node_lines {
        let balance = network.balance(node.id).expect("node exists");
        match node.designation {
            NodeDesignation::Source => assert!(balance > 0),
            NodeDesignation::Sink => assert!(balance < 0),
            NodeDesignation::Balance(_) => panic!("max-flow node lines are tagged"),
        }
    }
}

#[rstest]
fn header_comments_precede_the_problem_line() {
    let text = render(&generate(node_parent_params()));
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("c NETGEN flow network generator"));
    let problem = text
        .lines()
        .find(|line| line.starts_with('p'))
        .expect("problem line present");
    assert!(problem.starts_with("p min 60 "));
    assert!(problem.ends_with(" 8 n"));
    assert!(text.contains("c   Random seed:          2024\n"));
    assert!(text.contains("c     Sources:            2\n"));
    assert!(text.contains("c     Parents:            Sink Nodes\n"));
}
