use crate::hex_code::{to_compact, HexCode};

/// A required sub-sequence of codes.
///
/// `index` is the daemon's position in the list it was parsed from; it is the
/// daemon's identity for scoring and priority purposes. Parent and child links
/// are indices into the owning [`DaemonSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Daemon {
    index: usize,
    value: Vec<HexCode>,
    compact: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Daemon {
    pub fn new(index: usize, value: Vec<HexCode>) -> Self {
        let compact = to_compact(&value);
        Self {
            index,
            value,
            compact,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
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

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    pub fn is_parent(&self) -> bool {
        !self.children.is_empty()
    }

    /// `true` when `other` is a different daemon whose codes appear contiguously in this one.
    pub fn contains(&self, other: &Daemon) -> bool {
        self.index != other.index && self.compact.contains(other.compact.as_str())
    }
}

/// Arena of every daemon in a puzzle, with the containment forest resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaemonSet {
    daemons: Vec<Daemon>,
}

impl DaemonSet {
    /// Build the arena, assigning each daemon its list position as index.
    ///
    /// Containment is resolved in enumeration order. A daemon which is already
    /// somebody's child never claims children of its own, and a child keeps the
    /// first parent which claimed it; together these keep the graph a forest.
    pub fn parse<V>(raw: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Vec<HexCode>>,
    {
        let mut daemons: Vec<Daemon> = raw
            .into_iter()
            .enumerate()
            .map(|(index, value)| Daemon::new(index, value.into()))
            .collect();

        for i in 0..daemons.len() {
            for j in 0..daemons.len() {
                if daemons[i].is_child() {
                    break;
                }
                if i == j || daemons[j].is_child() || !daemons[i].contains(&daemons[j]) {
                    continue;
                }
                daemons[j].parent = Some(i);
                daemons[i].children.push(j);
            }
        }

        Self { daemons }
    }

    pub fn len(&self) -> usize {
        self.daemons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daemons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Daemon> {
        self.daemons.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Daemon> {
        self.daemons.iter()
    }

    /// The daemons credited as solved when `index`'s value is present in a
    /// sequence: the daemon itself followed by everything it contains, depth first.
    pub fn parts(&self, index: usize) -> Vec<&Daemon> {
        let mut parts = Vec::new();
        let mut stack = vec![index];
        while let Some(idx) = stack.pop() {
            let Some(daemon) = self.daemons.get(idx) else {
                continue;
            };
            parts.push(daemon);
            stack.extend(daemon.children.iter().rev().copied());
        }
        parts
    }

    /// `true` when some ancestor of `index` is a member of `among`.
    pub fn has_ancestor_in(&self, index: usize, among: &[usize]) -> bool {
        let mut current = self.daemons.get(index).and_then(Daemon::parent);
        while let Some(parent) = current {
            if among.contains(&parent) {
                return true;
            }
            current = self.daemons[parent].parent;
        }
        false
    }
}

impl std::ops::Index<usize> for DaemonSet {
    type Output = Daemon;

    fn index(&self, index: usize) -> &Self::Output {
        &self.daemons[index]
    }
}
