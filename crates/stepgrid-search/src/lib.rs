//! **stepgrid-search** — Stepwise graph-search algorithms on 2D grids.
//!
//! Unlike a run-to-completion pathfinder, every algorithm here is an
//! explicit, resumable state machine: each call to
//! [`SearchRun::next_step`] performs at most one frontier-expansion unit of
//! work and yields one renderable [`Step`]. A scheduler can therefore
//! interleave rendering between individual cell transitions.
//!
//! - **BFS** ([`bfs::BfsRun`]) — FIFO frontier, shortest path by edge count.
//! - **DFS** ([`dfs::DfsRun`]) — LIFO frontier; finds a path, not
//!   necessarily a shortest one.
//! - **A\*** ([`astar::AstarRun`]) — `f = g + h` heap frontier with the
//!   Manhattan heuristic; same path length as BFS on a uniform-cost grid.
//!
//! Runs operate on a frozen [`PassGrid`] snapshot (or any [`SearchGraph`])
//! and are selected through the [`Algorithm`] registry.

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod distance;
pub mod graph;
pub mod step;

pub use astar::AstarRun;
pub use bfs::BfsRun;
pub use dfs::DfsRun;
pub use distance::manhattan;
pub use graph::{PassGrid, SearchGraph};
pub use step::{Algorithm, SearchError, SearchRun, Step};
