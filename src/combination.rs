use crate::hierarchy::Weight;

/// Enumerates subsets of daemons from most to least valuable.
///
/// Each daemon is given a power of two according to its rank: the weakest gets
/// `1`, the next `2`, and so on. A subset's "strength" is the sum of its members'
/// slots, so every subset has a unique strength, and a subset containing a
/// stronger daemon always outranks any subset made only of weaker ones. Walking
/// strengths from [`max`][Self::max] down to `1` therefore visits every
/// non-empty subset in descending priority without ever materializing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationStore {
    /// `by_slot[k]` is the daemon index which owns slot `2^k`.
    by_slot: Vec<usize>,
    max: u64,
}

impl CombinationStore {
    /// Build a store from one weight per daemon index.
    ///
    /// Ties keep index order: among equal weights the lower index is weaker.
    ///
    /// # Panics
    ///
    /// If there are more than 63 daemons.
    pub fn new(hierarchy: &[Weight]) -> Self {
        assert!(
            hierarchy.len() < u64::BITS as usize,
            "too many daemons to enumerate: {}",
            hierarchy.len()
        );
        let mut by_slot: Vec<usize> = (0..hierarchy.len()).collect();
        by_slot.sort_by_key(|&idx| hierarchy[idx]);
        let max = (1_u64 << by_slot.len()) - 1;
        Self { by_slot, max }
    }

    /// Strength of the combination containing every daemon.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Slot value owned by a daemon index.
    pub fn slot(&self, index: usize) -> Option<u64> {
        self.by_slot
            .iter()
            .position(|&idx| idx == index)
            .map(|bit| 1 << bit)
    }

    /// The daemon indices whose slots sum to `strength`, strongest first.
    pub fn get_combination(&self, strength: u64) -> Vec<usize> {
        let mut remaining = strength & self.max;
        let mut combination = Vec::with_capacity(remaining.count_ones() as usize);
        while remaining != 0 {
            let bit = u64::BITS - 1 - remaining.leading_zeros();
            combination.push(self.by_slot[bit as usize]);
            remaining &= !(1 << bit);
        }
        combination
    }

    /// Every non-empty combination, strongest first.
    pub fn combinations(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (1..=self.max).rev().map(|strength| self.get_combination(strength))
    }
}
