//! Command-line configuration.

use clap::Parser;

/// Interactive grid pathfinding visualizer.
#[derive(Parser, Debug)]
#[command(name = "wayviz", version, about)]
pub struct Config {
    /// Board side length in cells.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i32).range(2..=512))]
    pub size: i32,

    /// Search algorithm: "bfs", "dfs", or "astar".
    #[arg(long, default_value = "bfs")]
    pub algorithm: String,

    /// Animation cadence in steps per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Disable mouse capture (keyboard only).
    #[arg(long)]
    pub no_mouse: bool,
}
