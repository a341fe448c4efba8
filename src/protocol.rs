use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    combination::CombinationStore,
    daemon::DaemonSet,
    factory::SequenceFactory,
    grid::{Grid, Point},
    hex_code::HexCode,
    hierarchy::{HierarchyProvider, Weight},
    matrix::{Active, Matrix},
    options::{SearchStrategy, SolverOptions},
    raw_data::{BreachProtocolRawData, MAX_BUFFER_SIZE},
    result::BreachProtocolResult,
    sequence::Sequence,
};

/// Breadth-first queue length past which the trimming heuristic kicks in.
pub const BFS_QUEUE_LIMIT: usize = 2000;

/// One puzzle: the code matrix, its daemons and the buffer to fit them in.
#[derive(Debug, Clone)]
pub struct BreachProtocol {
    grid: Grid<HexCode>,
    daemons: DaemonSet,
    buffer_size: usize,
    hierarchy: Vec<Weight>,
    options: SolverOptions,
}

/// Search state: the cells picked so far and how much of the target they have matched.
#[derive(Debug, Clone)]
struct Node {
    path: Vec<Point>,
    active: Active,
    position: usize,
}

impl BreachProtocol {
    /// Set up a puzzle, ranking daemons with `options.hierarchy`.
    ///
    /// # Panics
    ///
    /// If `data.grid` does not hold a square number of codes.
    pub fn new(data: &BreachProtocolRawData, options: SolverOptions) -> Self {
        let hierarchy = options.hierarchy.provide(data);
        Self::with_hierarchy(data, hierarchy, options)
    }

    /// Set up a puzzle, ranking daemons with an arbitrary provider.
    ///
    /// # Panics
    ///
    /// If `data.grid` does not hold a square number of codes.
    pub fn with_provider(
        data: &BreachProtocolRawData,
        provider: &dyn HierarchyProvider,
        options: SolverOptions,
    ) -> Self {
        let hierarchy = provider.provide(data);
        Self::with_hierarchy(data, hierarchy, options)
    }

    fn with_hierarchy(
        data: &BreachProtocolRawData,
        hierarchy: Vec<Weight>,
        options: SolverOptions,
    ) -> Self {
        let grid = Grid::from_cells(data.size(), data.grid.clone())
            .expect("breach protocol grid must be square");
        let daemons = DaemonSet::parse(data.daemons.iter().cloned());
        Self {
            grid,
            daemons,
            buffer_size: data.buffer_size,
            hierarchy,
            options,
        }
    }

    pub fn grid(&self) -> &Grid<HexCode> {
        &self.grid
    }

    pub fn daemons(&self) -> &DaemonSet {
        &self.daemons
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Every candidate sequence which fits the buffer, best first.
    pub fn sequences(&self) -> SequenceFactory<'_> {
        SequenceFactory::new(
            &self.daemons,
            CombinationStore::new(&self.hierarchy),
            self.buffer_size,
        )
    }

    /// Solved results for every candidate sequence which has a path, best first.
    pub fn solve_all(&self) -> SolveAll<'_> {
        SolveAll {
            protocol: self,
            sequences: self.sequences(),
        }
    }

    /// The best solvable sequence, if any.
    pub fn solve(&self) -> Option<BreachProtocolResult> {
        self.solve_all().next()
    }

    /// Find a path which enters `sequence` into the buffer, or `None` if there is none.
    pub fn solve_for_sequence(&self, sequence: &Sequence) -> Option<BreachProtocolResult> {
        self.solve_owned(sequence.clone())
    }

    fn solve_owned(&self, sequence: Sequence) -> Option<BreachProtocolResult> {
        let raw_path = match self.options.strategy {
            SearchStrategy::Bfs => self.find_path_bfs(&sequence),
            SearchStrategy::Dfs => self.find_path_dfs(&sequence),
        };
        debug!(
            strategy = %self.options.strategy,
            parts = ?sequence.indexes(),
            length = sequence.len(),
            solved = raw_path.is_some(),
            "searched for sequence"
        );
        let raw_path = raw_path?;
        Some(BreachProtocolResult::new(
            sequence,
            raw_path,
            &self.grid,
            &self.daemons,
            self.buffer_size,
        ))
    }

    /// Position in `sequence` reached after picking `code` at `position`.
    fn find_new_tail(sequence: &Sequence, position: usize, code: HexCode) -> usize {
        let value = sequence.value();
        if value.get(position) == Some(&code) {
            position + 1
        } else if sequence.is_break(position) {
            // a miss between two independent parts loses nothing
            position
        } else if value.first() == Some(&code) {
            1
        } else {
            0
        }
    }

    /// `true` while the rest of the sequence can still fit after `depth` picks.
    fn can_finish(&self, depth: usize, sequence: &Sequence, position: usize) -> bool {
        depth + (sequence.len() - position) <= self.buffer_size
    }

    fn find_path_bfs(&self, sequence: &Sequence) -> Option<Vec<Point>> {
        if sequence.is_empty() {
            return Some(Vec::new());
        }
        let trim = self.trims_queue();

        let mut queue = VecDeque::from([Node {
            path: Vec::new(),
            active: Active::default(),
            position: 0,
        }]);

        while let Some(node) = queue.pop_front() {
            for point in node.active.points(&self.grid) {
                if node.path.contains(&point) {
                    continue;
                }
                let position = Self::find_new_tail(sequence, node.position, self.grid[point]);
                let depth = node.path.len() + 1;
                if !self.can_finish(depth, sequence, position) {
                    continue;
                }

                let mut path = Vec::with_capacity(depth);
                path.extend_from_slice(&node.path);
                path.push(point);
                if position == sequence.len() {
                    return Some(path);
                }
                queue.push_back(Node {
                    path,
                    active: node.active.advance(point),
                    position,
                });
            }

            if trim && queue.len() > BFS_QUEUE_LIMIT {
                trim_queue(&mut queue, sequence);
            }
        }

        None
    }

    /// Only oversized buffers have queues big enough to need trimming.
    fn trims_queue(&self) -> bool {
        self.options.bfs_queue_trim && self.buffer_size > MAX_BUFFER_SIZE
    }

    fn find_path_dfs(&self, sequence: &Sequence) -> Option<Vec<Point>> {
        let mut matrix = Matrix::new(&self.grid);
        self.dfs(&mut matrix, sequence, 0)
    }

    fn dfs(
        &self,
        matrix: &mut Matrix<'_>,
        sequence: &Sequence,
        position: usize,
    ) -> Option<Vec<Point>> {
        if position == sequence.len() {
            return Some(matrix.selections().to_vec());
        }
        let depth = matrix.selections().len() + 1;
        for (x, y) in matrix.available() {
            let next = Self::find_new_tail(sequence, position, self.grid[(x, y)]);
            if !self.can_finish(depth, sequence, next) {
                continue;
            }
            matrix
                .select(x, y)
                .expect("available points are always selectable");
            if let Some(path) = self.dfs(matrix, sequence, next) {
                return Some(path);
            }
            matrix.deselect();
        }
        None
    }
}

/// Keep the half of `queue` closest to matching `sequence`.
///
/// The sort is stable, so nodes with equal tails stay in queue order.
fn trim_queue(queue: &mut VecDeque<Node>, sequence: &Sequence) {
    let before = queue.len();
    let mut nodes: Vec<Node> = queue.drain(..).collect();
    nodes.sort_by_key(|node| sequence.len() - node.position);
    nodes.truncate(before / 2);
    queue.extend(nodes);
    trace!(before, after = queue.len(), "trimmed breadth-first queue");
}

/// Lazy stream of solved results, best first.
///
/// Sequences are only searched for as the iterator is advanced; stop polling
/// it to cancel.
#[derive(Debug)]
pub struct SolveAll<'a> {
    protocol: &'a BreachProtocol,
    sequences: SequenceFactory<'a>,
}

impl<'a> Iterator for SolveAll<'a> {
    type Item = BreachProtocolResult;

    fn next(&mut self) -> Option<Self::Item> {
        for sequence in self.sequences.by_ref() {
            if let Some(result) = self.protocol.solve_owned(sequence) {
                return Some(result);
            }
        }
        None
    }
}
