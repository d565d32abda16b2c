//! Terminal entry point.

use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;

use stepgrid_core::app::{App, AppConfig};
use stepgrid_crossterm::CrosstermDriver;
use stepgrid_search::Algorithm;

use wayviz::{Config, VizModel};

/// Minimum screen width so the status line stays readable on small boards.
const MIN_WIDTH: i32 = 44;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let algorithm: Algorithm = config.algorithm.parse()?;

    let model = VizModel::new(config.size, algorithm);
    let driver = CrosstermDriver::new().with_mouse(!config.no_mouse);

    let mut app = App::new(AppConfig {
        model,
        driver,
        width: config.size.max(MIN_WIDTH),
        // One extra row for the status line below the board.
        height: config.size + 1,
        tick_interval: Duration::from_secs_f64(1.0 / f64::from(config.fps)),
    });
    app.run().map_err(|e| anyhow!("{e}"))?;
    Ok(())
}
