//! Mutable state owned by one generation run.

use crate::{
    error::{GeneratorError, Result},
    network::{Arc, Interdependency, Network},
    params::{GenerationParams, ParentMode},
    random::RandomStream,
    selection::SelectionSet,
};

/// Arenas and counters threaded through every generation phase.
///
/// Node-indexed arenas use 1-based node ids; lookups outside the node range
/// read as zero and writes are dropped, which validated parameters never
/// trigger.
pub(super) struct GenerationContext<'a> {
    pub(super) params: &'a GenerationParams,
    pub(super) rng: RandomStream,
    /// Filler-arc calls still expected; decremented once per call.
    pub(super) nodes_left: i64,
    balances: Vec<i64>,
    // Chain links: a source points at the far end of its chain, every chain
    // node at its predecessor. Slot 0 is unused.
    pred: Vec<i64>,
    arcs: Vec<Arc>,
    arc_budget: i64,
    /// Upper bound on skeleton arcs not yet emitted; filler may not use it.
    skeleton_owed: i64,
    /// Filler arcs turned away because the budget was spent.
    pub(super) refused_arcs: usize,
    /// Skeleton arcs emitted past the budget.
    pub(super) over_budget_arcs: usize,
}

impl<'a> GenerationContext<'a> {
    pub(super) fn new(params: &'a GenerationParams) -> Result<Self> {
        let node_slots = slot_count(params.nodes);
        let arc_slots = slot_count(params.density);
        let reserved_for_delivery = match params.parent_mode {
            ParentMode::Node => params.interdependencies,
            ParentMode::Arc => 0,
        };
        let mut context = Self {
            params,
            rng: RandomStream::new(params.seed),
            nodes_left: params.nodes - params.sinks + params.transshipment_sinks,
            balances: Vec::new(),
            pred: Vec::new(),
            arcs: Vec::new(),
            arc_budget: params.density - reserved_for_delivery,
            skeleton_owed: 0,
            refused_arcs: 0,
            over_budget_arcs: 0,
        };
        reserve(&mut context.balances, node_slots)?;
        reserve(&mut context.pred, node_slots + 1)?;
        reserve(&mut context.arcs, arc_slots)?;
        context.balances.resize(node_slots, 0);
        context.pred.resize(node_slots + 1, 0);
        Ok(context)
    }

    pub(super) fn balance(&self, node: i64) -> i64 {
        balance_slot(node)
            .and_then(|slot| self.balances.get(slot))
            .copied()
            .unwrap_or(0)
    }

    pub(super) fn add_balance(&mut self, node: i64, delta: i64) {
        if let Some(balance) = balance_slot(node).and_then(|slot| self.balances.get_mut(slot)) {
            *balance += delta;
        }
    }

    pub(super) fn set_balance(&mut self, node: i64, value: i64) {
        if let Some(balance) = balance_slot(node).and_then(|slot| self.balances.get_mut(slot)) {
            *balance = value;
        }
    }

    pub(super) fn pred(&self, node: i64) -> i64 {
        usize::try_from(node)
            .ok()
            .and_then(|slot| self.pred.get(slot))
            .copied()
            .unwrap_or(0)
    }

    pub(super) fn set_pred(&mut self, node: i64, value: i64) {
        if let Some(link) = usize::try_from(node)
            .ok()
            .and_then(|slot| self.pred.get_mut(slot))
        {
            *link = value;
        }
    }

    /// Splices `node` onto the far end of `source`'s chain.
    pub(super) fn link(&mut self, source: i64, node: i64) {
        let end = self.pred(source);
        self.set_pred(node, end);
        self.set_pred(source, node);
    }

    pub(super) fn arc_count(&self) -> i64 {
        i64::try_from(self.arcs.len()).unwrap_or(i64::MAX)
    }

    /// Arcs still available to filler, after the skeleton arcs still owed.
    pub(super) fn remaining_arcs(&self) -> i64 {
        (self.arc_budget - self.arc_count() - self.skeleton_owed).max(0)
    }

    /// Sets aside room for skeleton arcs that will be emitted later.
    pub(super) fn owe_skeleton_arcs(&mut self, arcs: i64) {
        self.skeleton_owed = (self.skeleton_owed + arcs).max(0);
    }

    /// Appends a filler arc, returning its 1-based id, or `None` once the
    /// budget is spent.
    pub(super) fn push_arc(&mut self, arc: Arc) -> Option<usize> {
        if self.remaining_arcs() == 0 {
            self.refused_arcs += 1;
            return None;
        }
        Some(self.push_unbudgeted(arc))
    }

    /// Appends a skeleton arc and settles one owed slot. Skeleton arcs are
    /// never refused; one that lands past the budget is counted.
    pub(super) fn push_skeleton_arc(&mut self, arc: Arc) -> usize {
        self.owe_skeleton_arcs(-1);
        if self.arc_count() >= self.arc_budget {
            self.over_budget_arcs += 1;
        }
        self.push_unbudgeted(arc)
    }

    /// Appends a delivery arc from the slots reserved for node parents.
    pub(super) fn push_delivery_arc(&mut self, arc: Arc) -> usize {
        self.push_unbudgeted(arc)
    }

    fn push_unbudgeted(&mut self, arc: Arc) -> usize {
        self.arcs.push(arc);
        self.arcs.len()
    }

    /// Draws a uniformly random remaining element of `pool`.
    pub(super) fn draw(&mut self, pool: &mut SelectionSet) -> Option<i64> {
        let position = self.rng.next_in(1, pool.size());
        pool.choose_at(position)
    }

    /// Draws a position bounded by the pool's pseudo-size, which may fall
    /// past the end of the pool and yield nothing.
    pub(super) fn draw_within_pseudo_size(&mut self, pool: &mut SelectionSet) -> Option<i64> {
        let position = self.rng.next_in(1, pool.pseudo_size());
        pool.choose_at(position)
    }

    pub(super) fn into_network(self, interdependencies: Vec<Interdependency>) -> Network {
        Network::new(
            self.params.clone(),
            self.balances,
            self.arcs,
            interdependencies,
        )
    }
}

fn slot_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

fn balance_slot(node: i64) -> Option<usize> {
    usize::try_from(node - 1).ok()
}

fn reserve<T>(buffer: &mut Vec<T>, slots: usize) -> Result<()> {
    buffer
        .try_reserve_exact(slots)
        .map_err(|_| GeneratorError::AllocationFailure { requested: slots })
}
