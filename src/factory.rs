use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::{
    combination::CombinationStore,
    daemon::DaemonSet,
    hex_code::from_compact,
    overlap::OverlapCache,
    sequence::{collect_parts, Sequence},
};

/// Lazily produces candidate sequences, best first.
///
/// Combinations are visited in descending strength. Every ordering of a
/// combination's daemons is merged; orderings which outgrow the buffer are cut
/// off as soon as they do. Within one combination shorter results come first,
/// and a merged value is only ever produced once.
///
/// Dropping the iterator part way through is always fine.
#[derive(Debug)]
pub struct SequenceFactory<'a> {
    daemons: &'a DaemonSet,
    store: CombinationStore,
    buffer_size: usize,
    cache: OverlapCache,
    seen: HashSet<String>,
    /// Next strength to expand; `0` once every combination is done.
    strength: u64,
    pending: VecDeque<Sequence>,
}

impl<'a> SequenceFactory<'a> {
    pub fn new(daemons: &'a DaemonSet, store: CombinationStore, buffer_size: usize) -> Self {
        Self::with_cache(daemons, store, buffer_size, OverlapCache::new())
    }

    /// Like [`new`][Self::new], reusing merges memoized by an earlier run.
    pub fn with_cache(
        daemons: &'a DaemonSet,
        store: CombinationStore,
        buffer_size: usize,
        cache: OverlapCache,
    ) -> Self {
        let strength = store.max();
        Self {
            daemons,
            store,
            buffer_size,
            cache,
            seen: HashSet::new(),
            strength,
            pending: VecDeque::new(),
        }
    }

    /// Give back the memo table so another factory can reuse it.
    pub fn into_cache(self) -> OverlapCache {
        self.cache
    }

    fn expand(&mut self, strength: u64) {
        let combination = self.store.get_combination(strength);

        // a daemon whose ancestor is present is already credited through that ancestor
        let mut members: Vec<usize> = combination
            .iter()
            .copied()
            .filter(|&idx| !self.daemons.has_ancestor_in(idx, &combination))
            .collect();
        members.sort_unstable();
        trace!(strength, ?combination, ?members, "expanding combination");

        let mut candidates = Vec::new();
        let mut order = Vec::with_capacity(members.len());
        let mut used = vec![false; members.len()];
        self.permute(&members, &mut used, &mut order, String::new(), &mut candidates);

        // stable: equal lengths keep permutation order
        candidates.sort_by_key(|(merged, _): &(String, Vec<usize>)| merged.len());

        for (merged, order) in candidates {
            if !self.seen.insert(merged.clone()) {
                continue;
            }
            let parts = collect_parts(order, self.daemons);
            self.pending
                .push_back(Sequence::new(from_compact(&merged), parts));
        }
    }

    /// Depth-first over orderings of `members` in lexicographic order, merging
    /// as it goes and abandoning every ordering which shares an oversized prefix.
    fn permute(
        &mut self,
        members: &[usize],
        used: &mut [bool],
        order: &mut Vec<usize>,
        merged: String,
        out: &mut Vec<(String, Vec<usize>)>,
    ) {
        if order.len() == members.len() {
            if !order.is_empty() {
                out.push((merged, order.clone()));
            }
            return;
        }
        for position in 0..members.len() {
            if used[position] {
                continue;
            }
            let idx = members[position];
            let next = self.cache.merge(&merged, self.daemons[idx].compact());
            if next.len() > self.buffer_size {
                continue;
            }
            used[position] = true;
            order.push(idx);
            self.permute(members, used, order, next, out);
            order.pop();
            used[position] = false;
        }
    }
}

impl<'a> Iterator for SequenceFactory<'a> {
    type Item = Sequence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(sequence) = self.pending.pop_front() {
                debug!(
                    length = sequence.len(),
                    parts = ?sequence.indexes(),
                    "candidate sequence"
                );
                return Some(sequence);
            }
            if self.strength == 0 {
                return None;
            }
            let strength = self.strength;
            self.strength -= 1;
            self.expand(strength);
        }
    }
}
