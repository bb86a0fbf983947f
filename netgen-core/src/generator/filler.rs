//! Filler ("rubbish") arcs that push the arc count towards `DENSITY`.

use crate::{
    network::{Arc, ArcKind},
    selection::SelectionSet,
};

use super::context::GenerationContext;

/// Adds random arcs out of `tail` to heads drawn from `pool`.
///
/// The number of arcs spreads the remaining budget over the tails still
/// expected to call in. Head draws are bounded by the pool's pseudo-size, so
/// some draws land past the end of the pool; those still consume their
/// capacity and cost draws but produce no arc.
pub(super) fn add_filler_arcs(
    context: &mut GenerationContext<'_>,
    pool: &mut SelectionSet,
    tail: i64,
) {
    let params = context.params;
    let non_sources = params.nodes - params.sources + params.transshipment_sources;
    let remaining = context.remaining_arcs();
    context.nodes_left -= 1;
    let nodes_left = context.nodes_left;
    if nodes_left < 0 || 2 * nodes_left >= remaining {
        return;
    }

    let limit = arc_limit(context, remaining, nodes_left, non_sources, pool.pseudo_size());
    for _ in 0..limit {
        let head = context.draw_within_pseudo_size(pool);
        let capacity = if context.rng.next_in(1, 100) <= params.capacitated_percent {
            context.rng.next_in(params.min_capacity, params.max_capacity)
        } else {
            params.supply
        };
        let cost = context.rng.next_in(params.min_cost, params.max_cost);
        // A refused push is counted by the context and reported once per run.
        if let Some(head) = head {
            context.push_arc(Arc {
                tail,
                head,
                capacity,
                cost,
                kind: ArcKind::Filler,
            });
        }
    }
}

/// Extra filler out of each transshipment sink, excluding the sink itself
/// from its own heads.
pub(super) fn add_transshipment_sink_arcs(context: &mut GenerationContext<'_>) {
    let params = context.params;
    let first = params.nodes - params.sinks + 1;
    for sink in first..first + params.transshipment_sinks {
        let mut pool = SelectionSet::new(
            params.sources - params.transshipment_sources + 1,
            params.nodes,
        );
        pool.remove_value(sink);
        add_filler_arcs(context, &mut pool, sink);
    }
}

/// Chooses how many filler arcs one tail receives.
///
/// When the budget per remaining tail already saturates the out-degree, every
/// non-source is a head. Otherwise a limit is rejection-sampled from
/// `[1, 2 * (remaining / (nodes_left + 1) - 1)]` until the tails still to come
/// can absorb the rest of the budget, i.e. until
/// `nodes_left * (non_sources - 1) >= remaining - limit`.
fn arc_limit(
    context: &mut GenerationContext<'_>,
    remaining: i64,
    nodes_left: i64,
    non_sources: i64,
    pseudo_size: i64,
) -> i64 {
    if (remaining + non_sources - pseudo_size - 1) / (nodes_left + 1) >= non_sources - 1 {
        return non_sources;
    }
    let upper = 2 * (remaining / (nodes_left + 1) - 1);
    if nodes_left == 0 {
        context.rng.next_in(1, upper);
        return remaining;
    }
    let capacity_after = nodes_left * (non_sources - 1);
    let shortfall = remaining - capacity_after;
    // Every draw is at most `upper`; without an acceptable value the loop
    // would never end, so take the smallest limit that satisfies the bound.
    if upper < shortfall {
        return shortfall;
    }
    loop {
        let limit = context.rng.next_in(1, upper);
        if capacity_after >= remaining - limit {
            return limit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::params::GenerationParams;

    fn params() -> GenerationParams {
        GenerationParams {
            seed: 77,
            nodes: 20,
            sources: 3,
            sinks: 3,
            density: 120,
            interdependencies: 2,
            ..GenerationParams::default()
        }
    }

    #[test]
    fn skips_when_budget_is_thin() {
        let params = GenerationParams {
            density: 20,
            ..params()
        };
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        let mut pool = SelectionSet::new(1, params.nodes);
        let before = context.rng.clone();
        add_filler_arcs(&mut context, &mut pool, 1);
        assert_eq!(context.arc_count(), 0);
        assert_eq!(context.rng, before);
        assert_eq!(context.nodes_left, params.nodes - params.sinks - 1);
    }

    #[test]
    fn arcs_leave_the_tail_towards_distinct_pool_members() {
        let params = params();
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        let mut pool = SelectionSet::new(params.sources + 1, params.nodes);
        pool.remove_value(5);
        add_filler_arcs(&mut context, &mut pool, 5);
        let network = context.into_network(Vec::new());
        let mut heads: Vec<i64> = network.arcs().iter().map(|arc| arc.head).collect();
        assert!(!heads.is_empty());
        assert!(network.arcs().iter().all(|arc| arc.tail == 5));
        assert!(network.arcs().iter().all(|arc| arc.kind == ArcKind::Filler));
        assert!(heads.iter().all(|&head| head > params.sources && head != 5));
        let before = heads.len();
        heads.sort_unstable();
        heads.dedup();
        assert_eq!(heads.len(), before);
    }

    #[test]
    fn filler_costs_and_capacities_respect_ranges() {
        let params = GenerationParams {
            capacitated_percent: 50,
            ..params()
        };
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        let mut pool = SelectionSet::new(params.sources + 1, params.nodes);
        add_filler_arcs(&mut context, &mut pool, 2);
        let network = context.into_network(Vec::new());
        for arc in network.arcs() {
            assert!((params.min_cost..=params.max_cost).contains(&arc.cost));
            assert!(
                arc.capacity == params.supply
                    || (params.min_capacity..=params.max_capacity).contains(&arc.capacity)
            );
        }
    }

    #[rstest]
    #[case(100, 0)]
    #[case(37, 0)]
    fn last_tail_takes_the_whole_remaining_budget(#[case] remaining: i64, #[case] nodes_left: i64) {
        let params = params();
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        let limit = arc_limit(&mut context, remaining, nodes_left, 1_000, 1_000);
        assert_eq!(limit, remaining);
    }

    #[test]
    fn saturated_budget_targets_every_non_source() {
        let params = params();
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        let before = context.rng.clone();
        let limit = arc_limit(&mut context, 500, 2, 17, 17);
        assert_eq!(limit, 17);
        assert_eq!(context.rng, before);
    }

    #[test]
    fn sampled_limit_leaves_an_absorbable_remainder() {
        let params = params();
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        for _ in 0..50 {
            let limit = arc_limit(&mut context, 60, 5, 17, 15);
            assert!((1..=2 * (60 / 6 - 1)).contains(&limit));
            assert!(5 * 16 >= 60 - limit);
        }
    }

    #[test]
    fn unreachable_bound_falls_back_to_the_shortfall() {
        let params = params();
        let mut context = GenerationContext::new(&params).expect("arenas fit in memory");
        // upper = 2 * (30 / 3 - 1) = 18; shortfall = 30 - 2 * 5 = 20.
        let limit = arc_limit(&mut context, 30, 2, 6, 100);
        assert_eq!(limit, 20);
    }
}
