use crate::{
    daemon::{Daemon, DaemonSet},
    hex_code::{from_compact, to_compact, HexCode},
    overlap::OverlapCache,
};

/// A concrete run of codes which, once entered into the buffer, solves every
/// daemon in `parts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    value: Vec<HexCode>,
    compact: String,
    parts: Vec<Daemon>,
    breaks: Vec<usize>,
}

impl Sequence {
    /// Create a sequence from its codes and the daemons it solves.
    ///
    /// Every part's codes must appear contiguously within `value`.
    pub fn new(value: Vec<HexCode>, parts: Vec<Daemon>) -> Self {
        let compact = to_compact(&value);
        let breaks = find_breaks(&compact, &parts);
        Self {
            value,
            compact,
            parts,
            breaks,
        }
    }

    /// Merge the daemons in order, sharing as much of each neighbour as possible.
    ///
    /// Parts are every daemon's [`DaemonSet::parts`], in order, without repeats.
    pub fn from_daemons(daemons: &[&Daemon], set: &DaemonSet, cache: &mut OverlapCache) -> Self {
        let compact = daemons
            .iter()
            .fold(String::new(), |merged, daemon| cache.merge(&merged, daemon.compact()));
        let parts = collect_parts(daemons.iter().map(|daemon| daemon.index()), set);
        Self::new(from_compact(&compact), parts)
    }

    pub fn value(&self) -> &[HexCode] {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub(crate) fn compact(&self) -> &str {
        &self.compact
    }

    pub fn parts(&self) -> &[Daemon] {
        &self.parts
    }

    /// Original indices of the daemons this sequence solves.
    pub fn indexes(&self) -> Vec<usize> {
        self.parts.iter().map(Daemon::index).collect()
    }

    /// Positions at which a part begins without overlapping any earlier part.
    ///
    /// Any number of unrelated codes may be entered before the code at a break
    /// without invalidating the parts already completed.
    pub fn breaks(&self) -> &[usize] {
        &self.breaks
    }

    pub fn is_break(&self, position: usize) -> bool {
        self.breaks.binary_search(&position).is_ok()
    }
}

/// Flatten the parts of each daemon, keeping the first occurrence of each index.
pub(crate) fn collect_parts(
    indices: impl IntoIterator<Item = usize>,
    set: &DaemonSet,
) -> Vec<Daemon> {
    let mut parts: Vec<Daemon> = Vec::new();
    for index in indices {
        for part in set.parts(index) {
            if !parts.iter().any(|known| known.index() == part.index()) {
                parts.push(part.clone());
            }
        }
    }
    parts
}

fn find_breaks(compact: &str, parts: &[Daemon]) -> Vec<usize> {
    // (start, inclusive end) of each part's first occurrence
    let mut spans: Vec<(usize, usize)> = parts
        .iter()
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            compact
                .find(part.compact())
                .map(|start| (start, start + part.len() - 1))
        })
        .collect();
    spans.sort_unstable();

    let mut breaks = Vec::new();
    let mut covered: Option<usize> = None;
    for (start, end) in spans {
        if let Some(covered_end) = covered {
            if start > covered_end {
                breaks.push(start);
            }
        }
        covered = Some(covered.map_or(end, |covered_end| covered_end.max(end)));
    }
    breaks.dedup();
    breaks
}
