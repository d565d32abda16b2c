//! Wayviz — an interactive grid pathfinding visualizer built on stepgrid.

pub mod board;
pub mod colors;
pub mod config;
pub mod model;
pub mod scheduler;

pub use board::{Board, CellState, PlacementError};
pub use config::Config;
pub use model::VizModel;
pub use scheduler::{Phase, Scheduler};
