use std::collections::HashMap;

/// Return the shortest string which starts with `left` and ends with `right`,
/// reusing the longest proper suffix of `left` which is also a prefix of `right`.
///
/// The shared part is always strictly shorter than both inputs, so two equal
/// strings are never collapsed into one.
///
/// Inputs are compact strings, which are pure ASCII.
pub fn find_overlap(left: &str, right: &str) -> String {
    let longest = left.len().min(right.len()).saturating_sub(1);
    let shared = (1..=longest)
        .rev()
        .find(|&len| left.as_bytes()[left.len() - len..] == right.as_bytes()[..len])
        .unwrap_or(0);

    let mut merged = String::with_capacity(left.len() + right.len() - shared);
    merged.push_str(left);
    merged.push_str(&right[shared..]);
    merged
}

/// Memoizing front end to [`find_overlap`].
///
/// Entries are never evicted; the alphabet is tiny and the strings never exceed
/// a buffer's length, so the table stays small. The cache is plain owned state:
/// share it between threads only behind a lock, or give each thread its own.
#[derive(Debug, Default, Clone)]
pub struct OverlapCache {
    // keyed by left string, then right string, so lookups borrow `&str`
    memo: HashMap<String, HashMap<String, String>>,
}

impl OverlapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, left: &str, right: &str) -> String {
        if let Some(merged) = self.memo.get(left).and_then(|rights| rights.get(right)) {
            return merged.clone();
        }
        let merged = find_overlap(left, right);
        self.memo
            .entry(left.to_owned())
            .or_default()
            .insert(right.to_owned(), merged.clone());
        merged
    }

    /// Number of memoized pairs.
    pub fn len(&self) -> usize {
        self.memo.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
