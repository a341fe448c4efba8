//! Solver for the breach protocol hacking minigame.
//!
//! Given a square matrix of codes, a list of daemons (code sequences which
//! must appear in the buffer) and a buffer size, find the most valuable set of
//! daemons which can be entered together, and the picks which enter them.
//!
//! Picks alternate between the active row and the active column, starting on
//! the top row, and no cell may be picked twice.
//!
//! ```
//! use breach_solver::{parse_codes, BreachProtocol, BreachProtocolRawData, SolverOptions};
//!
//! let data = BreachProtocolRawData::new(
//!     parse_codes("55 55 1C 55 1C E9 55 55 1C").unwrap(),
//!     vec![parse_codes("55 55 E9").unwrap()],
//!     5,
//! );
//! let protocol = BreachProtocol::new(&data, SolverOptions::default());
//! let result = protocol.solve().unwrap();
//! assert_eq!(result.path(), &[(0, 0), (0, 1), (2, 1)]);
//! ```

mod combination;
mod daemon;
mod factory;
mod grid;
mod hex_code;
mod hierarchy;
mod matrix;
mod options;
mod overlap;
mod protocol;
mod raw_data;
mod result;
mod sequence;

pub use combination::CombinationStore;
pub use daemon::{Daemon, DaemonSet};
pub use factory::SequenceFactory;
pub use grid::{Grid, Point};
pub use hex_code::{parse_codes, Error as HexCodeError, HexCode};
pub use hierarchy::{
    FocusHierarchyProvider, HierarchyConfig, HierarchyProvider, IndexHierarchyProvider,
    TypesHierarchyProvider, Weight,
};
pub use matrix::{Active, Error as MatrixError, Matrix};
pub use options::{Error as OptionsError, SearchStrategy, SolverOptions};
pub use overlap::{find_overlap, OverlapCache};
pub use protocol::{BreachProtocol, SolveAll, BFS_QUEUE_LIMIT};
pub use raw_data::{BreachProtocolRawData, Error as RawDataError, MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};
pub use result::{BreachProtocolResult, BreachProtocolResultJson, ExitStrategy, SequenceJson};
pub use sequence::Sequence;
