use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::hierarchy::HierarchyConfig;

/// How the grid is searched for a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Level by level; the first path found is a shortest one.
    #[default]
    Bfs,
    /// Recursive backtracking in grid order.
    Dfs,
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(SearchStrategy::Bfs),
            "dfs" => Ok(SearchStrategy::Dfs),
            _ => Err(Error::UnknownStrategy(s.to_owned())),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Bfs => f.write_str("bfs"),
            SearchStrategy::Dfs => f.write_str("dfs"),
        }
    }
}

/// Knobs for a [`BreachProtocol`][crate::BreachProtocol].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverOptions {
    pub strategy: SearchStrategy,
    pub hierarchy: HierarchyConfig,
    /// Heuristic: once the buffer is larger than the game ever offers, halve an
    /// overgrown breadth-first queue by dropping the entries furthest from done.
    /// Trades the shortest-path guarantee for bounded memory and time.
    pub bfs_queue_trim: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Bfs,
            hierarchy: HierarchyConfig::Index,
            bfs_queue_trim: true,
        }
    }
}

impl SolverOptions {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: HierarchyConfig) -> Self {
        self.hierarchy = hierarchy;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown search strategy \"{0}\", expected \"bfs\" or \"dfs\"")]
    UnknownStrategy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bfs", SearchStrategy::Bfs)]
    #[case("DFS", SearchStrategy::Dfs)]
    #[case(" dfs", SearchStrategy::Dfs)]
    fn parses_strategy(#[case] input: &str, #[case] expect: SearchStrategy) {
        assert_eq!(input.parse::<SearchStrategy>().unwrap(), expect);
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!("astar".parse::<SearchStrategy>().is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let options: SolverOptions = serde_json::from_str(r#"{"strategy":"dfs"}"#).unwrap();
        assert_eq!(options.strategy, SearchStrategy::Dfs);
        assert_eq!(options.hierarchy, HierarchyConfig::Index);
        assert!(options.bfs_queue_trim);

        let options: SolverOptions = serde_json::from_str(
            r#"{"hierarchy":{"kind":"focus","index":2},"bfsQueueTrim":false}"#,
        )
        .unwrap();
        assert_eq!(options.strategy, SearchStrategy::Bfs);
        assert!(!options.bfs_queue_trim);
        assert!(matches!(options.hierarchy, HierarchyConfig::Focus { index: 2, .. }));
    }
}
