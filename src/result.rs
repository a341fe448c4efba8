use serde::{Deserialize, Serialize};

use crate::{
    daemon::DaemonSet,
    grid::{Grid, Point},
    hex_code::{to_compact, HexCode},
    matrix::Matrix,
    overlap::find_overlap,
    sequence::Sequence,
};

/// What happens once the path has been entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitStrategy {
    /// The buffer is exactly full, so the game closes the breach on its own.
    pub will_exit: bool,
    /// Some unsolved daemon could still fit, so the game keeps the breach open
    /// and it has to be closed by hand.
    pub should_force_close: bool,
}

/// A solved sequence, and the moves which solve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachProtocolResult {
    sequence: Sequence,
    raw_path: Vec<Point>,
    path: Vec<Point>,
    resolved_sequence: Sequence,
    exit_strategy: ExitStrategy,
}

impl BreachProtocolResult {
    pub(crate) fn new(
        sequence: Sequence,
        raw_path: Vec<Point>,
        grid: &Grid<HexCode>,
        daemons: &DaemonSet,
        buffer_size: usize,
    ) -> Self {
        debug_assert!(
            Matrix::replay(grid, &raw_path).is_ok(),
            "search produced an illegal path"
        );
        let entered: Vec<HexCode> = raw_path.iter().map(|&point| grid[point]).collect();
        let end = find_end_index(&sequence, &to_compact(&entered));

        let path = raw_path[..end].to_vec();
        let resolved_sequence = resolve(entered[..end].to_vec(), daemons);
        let exit_strategy = exit_strategy(&resolved_sequence, daemons, buffer_size);

        Self {
            sequence,
            raw_path,
            path,
            resolved_sequence,
            exit_strategy,
        }
    }

    /// The sequence which was searched for.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Every cell picked by the search, in order.
    pub fn raw_path(&self) -> &[Point] {
        &self.raw_path
    }

    /// The picks which actually need to be made: the raw path, cut after the
    /// last cell any daemon needs.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// What the buffer holds after [`path`][Self::path], and every daemon that solves.
    ///
    /// This can credit daemons the searched sequence never aimed for.
    pub fn resolved_sequence(&self) -> &Sequence {
        &self.resolved_sequence
    }

    pub fn exit_strategy(&self) -> ExitStrategy {
        self.exit_strategy
    }

    pub fn to_json(&self) -> BreachProtocolResultJson {
        BreachProtocolResultJson {
            path: self.path.clone(),
            raw_path: self.raw_path.clone(),
            sequence: SequenceJson::from(&self.sequence),
            resolved_sequence: SequenceJson::from(&self.resolved_sequence),
            exit_strategy: self.exit_strategy,
        }
    }
}

impl Serialize for BreachProtocolResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Length of the shortest prefix of the entered codes that still holds the
/// final occurrence of every part.
fn find_end_index(sequence: &Sequence, entered: &str) -> usize {
    sequence
        .parts()
        .iter()
        .filter_map(|part| {
            entered
                .rfind(part.compact())
                .map(|start| start + part.len())
        })
        .max()
        .unwrap_or(0)
}

fn resolve(value: Vec<HexCode>, daemons: &DaemonSet) -> Sequence {
    let compact = to_compact(&value);
    let parts = daemons
        .iter()
        .filter(|daemon| !daemon.is_empty() && compact.contains(daemon.compact()))
        .cloned()
        .collect();
    Sequence::new(value, parts)
}

fn exit_strategy(resolved: &Sequence, daemons: &DaemonSet, buffer_size: usize) -> ExitStrategy {
    let will_exit = resolved.len() == buffer_size;
    let solved = resolved.indexes();
    let should_force_close = !will_exit
        && daemons
            .iter()
            .filter(|daemon| !solved.contains(&daemon.index()))
            .any(|daemon| find_overlap(resolved.compact(), daemon.compact()).len() <= buffer_size);
    ExitStrategy {
        will_exit,
        should_force_close,
    }
}

/// Wire shape of a [`BreachProtocolResult`] for the input automation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachProtocolResultJson {
    pub path: Vec<Point>,
    pub raw_path: Vec<Point>,
    pub sequence: SequenceJson,
    pub resolved_sequence: SequenceJson,
    pub exit_strategy: ExitStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceJson {
    pub value: Vec<HexCode>,
    /// Original daemon indices.
    pub parts: Vec<usize>,
}

impl From<&Sequence> for SequenceJson {
    fn from(sequence: &Sequence) -> Self {
        Self {
            value: sequence.value().to_vec(),
            parts: sequence.indexes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{daemon::Daemon, hex_code::parse_codes, overlap::OverlapCache};

    fn codes(s: &str) -> Vec<HexCode> {
        parse_codes(s).unwrap()
    }

    fn setup(grid: &str, daemons: &[&str]) -> (Grid<HexCode>, DaemonSet) {
        let cells = codes(grid);
        let size = (cells.len() as f64).sqrt() as usize;
        (
            Grid::from_cells(size, cells).unwrap(),
            DaemonSet::parse(daemons.iter().map(|d| codes(d))),
        )
    }

    fn sequence(daemons: &DaemonSet, order: &[usize]) -> Sequence {
        let order: Vec<&Daemon> = order.iter().map(|&idx| &daemons[idx]).collect();
        Sequence::from_daemons(&order, daemons, &mut OverlapCache::new())
    }

    const GRID: &str = "55 55 1C \
                        55 1C E9 \
                        55 55 1C";

    #[test]
    fn path_is_cut_after_last_needed_cell() {
        let (grid, daemons) = setup(GRID, &["55 55"]);
        // 55 55 1C 55: the daemon is done after two picks
        let raw_path = vec![(0, 0), (0, 1), (1, 1), (1, 0)];
        let result =
            BreachProtocolResult::new(sequence(&daemons, &[0]), raw_path, &grid, &daemons, 5);
        assert_eq!(result.path(), &[(0, 0), (0, 1)]);
        assert_eq!(result.raw_path().len(), 4);
        assert_eq!(result.resolved_sequence().value(), codes("55 55"));
    }

    #[test]
    fn last_occurrence_decides_the_cut() {
        let (grid, daemons) = setup(GRID, &["55"]);
        // 55 55 1C 55
        let raw_path = vec![(0, 0), (0, 1), (1, 1), (1, 2)];
        let result =
            BreachProtocolResult::new(sequence(&daemons, &[0]), raw_path, &grid, &daemons, 5);
        assert_eq!(result.path().len(), 4);
    }

    #[test]
    fn accidental_daemons_are_credited() {
        let (grid, daemons) = setup(GRID, &["55 1C", "1C E9", "55 55 1C"]);
        // 55 55 1C E9, searched for 1C E9 only
        let raw_path = vec![(0, 0), (0, 2), (2, 2), (2, 1)];
        let result =
            BreachProtocolResult::new(sequence(&daemons, &[1]), raw_path, &grid, &daemons, 6);
        assert_eq!(result.sequence().indexes(), vec![1]);
        assert_eq!(result.resolved_sequence().indexes(), vec![0, 1, 2]);
        for part in result.resolved_sequence().parts() {
            assert!(result.resolved_sequence().compact().contains(part.compact()));
        }
    }

    #[test]
    fn full_buffer_exits_by_itself() {
        let (grid, daemons) = setup(GRID, &["55 55 1C E9", "BD"]);
        let raw_path = vec![(0, 0), (0, 2), (2, 2), (2, 1)];
        let result =
            BreachProtocolResult::new(sequence(&daemons, &[0]), raw_path, &grid, &daemons, 4);
        assert_eq!(
            result.exit_strategy(),
            ExitStrategy {
                will_exit: true,
                should_force_close: false
            }
        );
    }

    #[test]
    fn room_for_another_daemon_needs_force_close() {
        let (grid, daemons) = setup(GRID, &["55 55", "BD 7A"]);
        let raw_path = vec![(0, 0), (0, 1)];
        let result =
            BreachProtocolResult::new(sequence(&daemons, &[0]), raw_path, &grid, &daemons, 4);
        assert_eq!(
            result.exit_strategy(),
            ExitStrategy {
                will_exit: false,
                should_force_close: true
            }
        );

        // 55 55 + BD 7A is 4 codes, too many for a buffer of 3
        let raw_path = vec![(0, 0), (0, 1)];
        let result =
            BreachProtocolResult::new(sequence(&daemons, &[0]), raw_path, &grid, &daemons, 3);
        assert_eq!(
            result.exit_strategy(),
            ExitStrategy {
                will_exit: false,
                should_force_close: false
            }
        );
    }

    #[test]
    fn serializes_for_automation() {
        let (grid, daemons) = setup(GRID, &["55 55 E9"]);
        let raw_path = vec![(0, 0), (0, 1), (2, 1)];
        let result =
            BreachProtocolResult::new(sequence(&daemons, &[0]), raw_path, &grid, &daemons, 5);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": [[0, 0], [0, 1], [2, 1]],
                "rawPath": [[0, 0], [0, 1], [2, 1]],
                "sequence": { "value": ["55", "55", "E9"], "parts": [0] },
                "resolvedSequence": { "value": ["55", "55", "E9"], "parts": [0] },
                "exitStrategy": { "willExit": false, "shouldForceClose": false },
            })
        );
    }
}
