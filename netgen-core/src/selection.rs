//! Positional sampling without replacement over a contiguous integer range.
//!
//! A [`SelectionSet`] starts as every integer in `[from, to]` and shrinks as
//! values are chosen or removed. Positional lookups ("the k-th smallest
//! remaining value") run in `O(log n)` against a Fenwick tree of presence
//! counts.
//!
//! Besides its exact size the set tracks a *pseudo-size*: a counter that drops
//! on every removal request, including requests for values that are no longer
//! present. Some generator phases bound their draws by the pseudo-size rather
//! than the exact size, so a draw may land past the end of the set and yield
//! nothing. That under-count is part of the generator's observable behaviour
//! and must not be corrected here.

/// Ordered set of remaining integers supporting "remove the k-th smallest".
///
/// # Examples
/// ```
/// use netgen_core::SelectionSet;
///
/// let mut set = SelectionSet::new(10, 14);
/// assert_eq!(set.choose_at(2), Some(11));
/// set.remove_value(13);
/// set.remove_value(99);
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.pseudo_size(), 2);
/// assert_eq!(set.choose_at(3), Some(14));
/// ```
#[derive(Debug, Clone)]
pub struct SelectionSet {
    from: i64,
    present: Vec<bool>,
    // 1-based Fenwick tree over `present`; slot 0 is unused.
    tree: Vec<u32>,
    len: usize,
    pseudo_size: i64,
}

impl SelectionSet {
    /// Creates a set holding every integer in `[from, to]`.
    ///
    /// An inverted range yields an empty set whose pseudo-size is clamped to
    /// zero when queried.
    #[must_use]
    pub fn new(from: i64, to: i64) -> Self {
        let span = to - from + 1;
        let len = usize::try_from(span).unwrap_or(0);
        // With every slot occupied, node `i` covers exactly `lowbit(i)` values.
        let tree = (0..=len)
            .map(|slot| if slot == 0 { 0 } else { lowbit(slot) })
            .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
            .collect();
        Self {
            from,
            present: vec![true; len],
            tree,
            len,
            pseudo_size: span,
        }
    }

    /// Removes and returns the `position`-th smallest remaining value
    /// (1-based).
    ///
    /// Positions outside `[1, len()]` return `None` and leave the set
    /// untouched, pseudo-size included.
    pub fn choose_at(&mut self, position: i64) -> Option<i64> {
        let rank = usize::try_from(position).ok()?;
        if rank == 0 || rank > self.len {
            return None;
        }
        let slot = self.find_rank(rank);
        self.take(slot);
        self.pseudo_size -= 1;
        self.value_of(slot)
    }

    /// Removes `value` if it is still present.
    ///
    /// The pseudo-size drops regardless of whether the value was found.
    pub fn remove_value(&mut self, value: i64) {
        self.pseudo_size -= 1;
        if let Some(slot) = self.slot_of(value) {
            self.take(slot);
        }
    }

    /// Reports whether `value` is still present.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.slot_of(value).is_some()
    }

    /// Exact number of remaining values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no values remain.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exact number of remaining values as a draw bound.
    #[must_use]
    pub fn size(&self) -> i64 {
        i64::try_from(self.len).unwrap_or(i64::MAX)
    }

    /// Conservative remaining count: the initial size less every removal
    /// request, never negative.
    #[must_use]
    pub const fn pseudo_size(&self) -> i64 {
        if self.pseudo_size > 0 {
            self.pseudo_size
        } else {
            0
        }
    }

    fn slot_of(&self, value: i64) -> Option<usize> {
        let slot = usize::try_from(value - self.from).ok()?;
        match self.present.get(slot) {
            Some(true) => Some(slot),
            _ => None,
        }
    }

    fn value_of(&self, slot: usize) -> Option<i64> {
        i64::try_from(slot).ok().map(|offset| self.from + offset)
    }

    fn take(&mut self, slot: usize) {
        if let Some(flag) = self.present.get_mut(slot) {
            *flag = false;
        }
        self.len -= 1;
        let mut node = slot + 1;
        while let Some(count) = self.tree.get_mut(node) {
            *count -= 1;
            node += lowbit(node);
        }
    }

    /// Descends the Fenwick tree to the 0-based slot holding the `rank`-th
    /// present value. `rank` must lie in `[1, len]`.
    fn find_rank(&self, rank: usize) -> usize {
        let capacity = self.present.len();
        let mut step = if capacity == 0 {
            0
        } else {
            1 << capacity.ilog2()
        };
        let mut node = 0;
        let mut remaining = rank;
        while step > 0 {
            let next = node + step;
            if let Some(&count) = self.tree.get(next) {
                let count = count as usize;
                if count < remaining {
                    node = next;
                    remaining -= count;
                }
            }
            step >>= 1;
        }
        node
    }
}

const fn lowbit(index: usize) -> usize {
    index & index.wrapping_neg()
}
