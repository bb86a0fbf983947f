//! Interdependency selection and the node-parent rewrite.

use tracing::debug;

use crate::{
    network::{Arc, ArcKind, Interdependency},
    params::ParentMode,
    selection::SelectionSet,
};

use super::context::GenerationContext;

/// Cost of a delivery arc: a reward for satisfying a parent sink's demand.
pub const DELIVERY_COST: i64 = -100;

/// Parent/child pair before node parents are rewritten into arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct DraftPair {
    pub(super) parent: i64,
    pub(super) child: i64,
}

/// Draws `INTER` distinct child arcs, then `INTER` distinct parents: sink
/// nodes in node mode, or further arcs from the same pool in arc mode, so
/// no arc is both a parent and a child.
///
/// A pair is dropped when either draw comes up empty, which only happens
/// when the realised arc count is too small for the request.
pub(super) fn select(context: &mut GenerationContext<'_>) -> Vec<DraftPair> {
    let params = context.params;
    let count = params.interdependencies.max(0);
    let mut arc_pool = SelectionSet::new(1, context.arc_count());
    let children: Vec<Option<i64>> = (0..count).map(|_| context.draw(&mut arc_pool)).collect();
    let parents: Vec<Option<i64>> = match params.parent_mode {
        ParentMode::Node => {
            let mut sink_pool = SelectionSet::new(params.nodes - params.sinks + 1, params.nodes);
            (0..count).map(|_| context.draw(&mut sink_pool)).collect()
        }
        ParentMode::Arc => (0..count).map(|_| context.draw(&mut arc_pool)).collect(),
    };

    let pairs: Vec<DraftPair> = parents
        .into_iter()
        .zip(children)
        .filter_map(|(parent, child)| Some(DraftPair {
            parent: parent?,
            child: child?,
        }))
        .collect();
    if i64::try_from(pairs.len()).unwrap_or(i64::MAX) < count {
        debug!(
            requested = count,
            selected = pairs.len(),
            arcs = context.arc_count(),
            "arc pool exhausted before every interdependency was drawn"
        );
    }
    pairs
}

/// Replaces every parent sink with a delivery arc that carries the sink's
/// demand, then zeroes the sink's balance.
pub(super) fn rewrite_node_parents(
    context: &mut GenerationContext<'_>,
    pairs: Vec<DraftPair>,
) -> Vec<Interdependency> {
    pairs
        .into_iter()
        .filter_map(|DraftPair { parent, child }| {
            let demand = context.balance(parent);
            let arc = context.push_delivery_arc(Arc {
                tail: parent,
                head: 0,
                capacity: -demand,
                cost: DELIVERY_COST,
                kind: ArcKind::Delivery,
            });
            context.set_balance(parent, 0);
            Some(Interdependency {
                parent: arc,
                child: usize::try_from(child).ok()?,
            })
        })
        .collect()
}

/// Arc-mode pairs already reference arcs on both ends.
pub(super) fn arc_pairs(pairs: Vec<DraftPair>) -> Vec<Interdependency> {
    pairs
        .into_iter()
        .filter_map(|DraftPair { parent, child }| {
            Some(Interdependency {
                parent: usize::try_from(parent).ok()?,
                child: usize::try_from(child).ok()?,
            })
        })
        .collect()
}
