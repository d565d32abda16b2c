//! The step protocol: [`Step`], the resumable [`SearchRun`] abstraction,
//! the [`Algorithm`] registry, and [`SearchError`].

use std::str::FromStr;

use stepgrid_core::Point;
use thiserror::Error;

use crate::astar::AstarRun;
use crate::bfs::BfsRun;
use crate::dfs::DfsRun;
use crate::graph::PassGrid;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// One discrete, renderable unit of algorithmic progress.
///
/// A run emits a finite sequence of steps. The two terminal variants,
/// [`Step::Found`] and [`Step::Exhausted`], each appear at most once and
/// always last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell moved from the frontier to the visited set.
    Explored(Point),
    /// A cell was newly discovered and enqueued.
    Frontier(Point),
    /// Terminal success: the shortest path, ordered start → end, both
    /// endpoints included.
    Found(Vec<Point>),
    /// Terminal failure: the frontier emptied without reaching the end.
    Exhausted,
}

impl Step {
    /// Whether this step ends the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Found(_) | Step::Exhausted)
    }
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

/// A resumable search execution.
///
/// Implementations hold their frontier, visited store, and predecessor map
/// across calls, performing at most one frontier-expansion unit of work per
/// produced step. After a terminal step, `next_step` returns `None`.
pub trait SearchRun {
    fn next_step(&mut self) -> Option<Step>;
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Errors from run construction and algorithm selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// A run was requested without both endpoints placed. Recoverable: the
    /// run simply does not start.
    #[error("start and end must both be placed before a run")]
    MissingEndpoints,
    /// Configuration named an algorithm that is not registered. Fatal at
    /// session start.
    #[error("unknown algorithm {0:?} (expected one of: bfs, dfs, astar)")]
    UnknownAlgorithm(String),
}

// ---------------------------------------------------------------------------
// Algorithm registry
// ---------------------------------------------------------------------------

/// The registered search algorithms.
///
/// Adding an algorithm means adding a variant here (and its run type); the
/// scheduler only ever sees `Box<dyn SearchRun>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    /// Depth-first search; finds a path, not necessarily a shortest one.
    Dfs,
    AStar,
}

impl Algorithm {
    /// All registered algorithms.
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    /// Canonical configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
        }
    }

    /// Construct a run of this algorithm over a frozen snapshot.
    ///
    /// Fails with [`SearchError::MissingEndpoints`] when either endpoint is
    /// absent; no work is performed in that case.
    pub fn run(
        self,
        graph: PassGrid,
        start: Option<Point>,
        end: Option<Point>,
    ) -> Result<Box<dyn SearchRun>, SearchError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(SearchError::MissingEndpoints);
        };
        log::debug!("starting {} run {start} -> {end}", self.name());
        Ok(match self {
            Algorithm::Bfs => Box::new(BfsRun::new(graph, start, end)),
            Algorithm::Dfs => Box::new(DfsRun::new(graph, start, end)),
            Algorithm::AStar => Box::new(AstarRun::new(graph, start, end)),
        })
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            other => Err(SearchError::UnknownAlgorithm(other.to_string())),
        }
    }
}
