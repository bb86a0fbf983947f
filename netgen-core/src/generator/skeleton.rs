//! Skeleton construction: transshipment chains, sink attachment, and the
//! capacitated skeleton arcs.
//!
//! Each source owns a chain of transshipment nodes. The chain is hooked to a
//! number of sinks proportional to its length, the source's supply is spread
//! over those sinks as demand, and every chain link and sink hook becomes an
//! arc. Arcs are emitted grouped by tail, and after each tail group the
//! filler step tops the network up towards the requested density.

use crate::{
    network::{Arc, ArcKind},
    selection::SelectionSet,
};

use super::{context::GenerationContext, filler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SkeletonPair {
    pub(super) tail: i64,
    pub(super) head: i64,
}

/// Deals the transshipment nodes onto the source chains: the first 60% round
/// robin, the rest to random sources.
pub(super) fn build_chains(context: &mut GenerationContext<'_>) {
    let params = context.params;
    for source in 1..=params.sources {
        context.set_pred(source, source);
    }

    let mut pool = SelectionSet::new(params.sources + 1, params.nodes - params.sinks);
    let transshipment = params.transshipment_nodes();
    let random_share = (4 * transshipment + 9) / 10;
    let mut remaining = transshipment;
    let mut source = 1;
    while remaining > random_share {
        if let Some(node) = context.draw(&mut pool) {
            context.link(source, node);
        }
        source = if source >= params.sources { 1 } else { source + 1 };
        remaining -= 1;
    }
    while remaining > 0 {
        let node = context.draw(&mut pool);
        let owner = context.rng.next_in(1, params.sources);
        if let Some(node) = node {
            context.link(owner, node);
        }
        remaining -= 1;
    }
}

/// Attaches sinks to every source chain and emits the skeleton arcs.
///
/// Room for every source's skeleton is set aside first, so filler emitted
/// for early sources never crowds out the chains of later ones.
pub(super) fn attach_sources(context: &mut GenerationContext<'_>) {
    let sources = context.params.sources;
    let bounds: Vec<i64> = (1..=sources)
        .map(|source| skeleton_bound(context, source))
        .collect();
    context.owe_skeleton_arcs(bounds.iter().sum());
    for (source, bound) in (1..=sources).zip(bounds) {
        attach_source(context, source, bound);
    }
}

fn attach_source(context: &mut GenerationContext<'_>, source: i64, bound: i64) {
    let mut pairs = chain_pairs(context, source);
    let chain_length = i64::try_from(pairs.len()).unwrap_or(i64::MAX);
    let sinks = choose_sinks(context, source, chain_length);
    hook_sinks(context, source, chain_length, &sinks, &mut pairs);
    let exact = i64::try_from(pairs.len()).unwrap_or(i64::MAX);
    context.owe_skeleton_arcs(exact - bound);
    sort_by_tail(&mut pairs);
    emit_skeleton(context, source, &pairs);
}

/// Most skeleton arcs `source` can produce: one per chain link plus one hook
/// per chosen sink. The last source may also claim every unfed sink.
fn skeleton_bound(context: &GenerationContext<'_>, source: i64) -> i64 {
    let params = context.params;
    let chain_length = i64::try_from(chain_pairs(context, source).len()).unwrap_or(i64::MAX);
    let hooks = if source == params.sources {
        params.sinks
    } else {
        sink_target(context, chain_length)
    };
    chain_length + hooks
}

/// Number of sinks a chain of `chain_length` nodes is hooked to.
fn sink_target(context: &GenerationContext<'_>, chain_length: i64) -> i64 {
    let params = context.params;
    let transshipment = params.transshipment_nodes();
    let wanted = if transshipment == 0 {
        params.sinks / params.sources + 1
    } else {
        2 * chain_length * params.sinks / transshipment
    };
    wanted.min(params.sinks).max(2)
}

/// Walks the chain from its far end back to the source.
fn chain_pairs(context: &GenerationContext<'_>, source: i64) -> Vec<SkeletonPair> {
    let mut pairs = Vec::new();
    let mut node = context.pred(source);
    // A chain never holds more nodes than the network.
    for _ in 0..context.params.nodes {
        if node == source {
            break;
        }
        let tail = context.pred(node);
        pairs.push(SkeletonPair { tail, head: node });
        node = tail;
    }
    pairs
}

/// Picks distinct sinks for one chain. The last source also claims every
/// sink nobody has fed yet so all sinks end up reachable.
fn choose_sinks(context: &mut GenerationContext<'_>, source: i64, chain_length: i64) -> Vec<i64> {
    let params = context.params;
    let wanted = sink_target(context, chain_length);

    let mut pool = SelectionSet::new(params.nodes - params.sinks + 1, params.nodes);
    let mut sinks = Vec::new();
    for _ in 0..wanted {
        if let Some(sink) = context.draw(&mut pool) {
            sinks.push(sink);
        }
    }
    if source == params.sources {
        while let Some(sink) = pool.choose_at(1) {
            if context.balance(sink) == 0 {
                sinks.push(sink);
            }
        }
    }
    sinks
}

/// Converts the source's supply into sink demand and records one hook arc
/// per sink, each leaving from a random point along the chain.
fn hook_sinks(
    context: &mut GenerationContext<'_>,
    source: i64,
    chain_length: i64,
    sinks: &[i64],
    pairs: &mut Vec<SkeletonPair>,
) {
    let Some(&first) = sinks.first() else {
        return;
    };
    let count = i64::try_from(sinks.len()).unwrap_or(i64::MAX);
    let source_supply = context.balance(source);
    let per_sink = source_supply / count;
    let mut cursor = context.pred(source);
    for &sink in sinks {
        let partial = context.rng.next_in(1, per_sink);
        let partner = context.rng.next_in(0, count - 1);
        pairs.push(SkeletonPair {
            tail: cursor,
            head: sink,
        });
        context.add_balance(sink, -partial);
        if let Some(&other) = usize::try_from(partner).ok().and_then(|index| sinks.get(index)) {
            context.add_balance(other, partial - per_sink);
        }
        cursor = source;
        for _ in 0..context.rng.next_in(1, chain_length) {
            cursor = context.pred(cursor);
        }
    }
    context.add_balance(first, -(source_supply % count));
}

/// Shell sort by ascending tail with the halving gap sequence. Equal tails
/// keep whatever order this sequence leaves them in, which fixes the order
/// the later random draws are consumed in.
pub(super) fn sort_by_tail(pairs: &mut [SkeletonPair]) {
    let len = pairs.len();
    let mut gap = len / 2;
    while gap != 0 {
        for start in 0..len - gap {
            let mut index = start;
            while let (Some(left), Some(right)) = (pairs.get(index), pairs.get(index + gap)) {
                if left.tail <= right.tail {
                    break;
                }
                pairs.swap(index, index + gap);
                if index < gap {
                    break;
                }
                index -= gap;
            }
        }
        gap /= 2;
    }
}

fn emit_skeleton(context: &mut GenerationContext<'_>, source: i64, pairs: &[SkeletonPair]) {
    let params = context.params;
    let source_supply = context.balance(source);
    let mut index = 0;
    while let Some(&SkeletonPair { tail, .. }) = pairs.get(index) {
        let mut pool = SelectionSet::new(
            params.sources - params.transshipment_sources + 1,
            params.nodes,
        );
        pool.remove_value(tail);
        while let Some(&pair) = pairs.get(index).filter(|pair| pair.tail == tail) {
            pool.remove_value(pair.head);
            let capacity = if context.rng.next_in(1, 100) <= params.capacitated_percent {
                source_supply.max(params.min_capacity)
            } else {
                params.supply
            };
            let cost = if context.rng.next_in(1, 100) > params.hicost_percent {
                context.rng.next_in(params.min_cost, params.max_cost)
            } else {
                params.max_cost
            };
            context.push_skeleton_arc(Arc {
                tail,
                head: pair.head,
                capacity,
                cost,
                kind: ArcKind::Skeleton,
            });
            index += 1;
        }
        filler::add_filler_arcs(context, &mut pool, tail);
    }
}
