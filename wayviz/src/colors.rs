//! Color palette and glyphs for the board display.

use stepgrid_core::Cell;
use stepgrid_core::style::{Color, Style};

use crate::board::CellState;

/// Dim grid dots for empty cells.
pub const EMPTY_FG: Color = Color::rgb(90, 92, 100);
/// Barrier blocks.
pub const BARRIER_FG: Color = Color::rgb(160, 165, 180);
/// Start marker — light blue.
pub const START_FG: Color = Color::rgb(102, 204, 255);
/// End marker — light purple.
pub const END_FG: Color = Color::rgb(150, 130, 255);
/// Finalized cells — red.
pub const VISITED_FG: Color = Color::rgb(220, 90, 90);
/// Discovered-but-open cells — green.
pub const FRONTIER_FG: Color = Color::rgb(90, 200, 90);
/// The reconstructed path — pink.
pub const PATH_FG: Color = Color::rgb(255, 150, 190);
/// Status line text.
pub const STATUS_FG: Color = Color::rgb(200, 200, 200);

/// Render cell for a board cell state.
pub fn cell_for(state: CellState) -> Cell {
    let (ch, style) = match state {
        CellState::Empty => ('·', Style::default().with_fg(EMPTY_FG).dim()),
        CellState::Barrier => ('#', Style::default().with_fg(BARRIER_FG)),
        CellState::Start => ('S', Style::default().with_fg(START_FG).bold()),
        CellState::End => ('E', Style::default().with_fg(END_FG).bold()),
        CellState::Visited => ('○', Style::default().with_fg(VISITED_FG)),
        CellState::Frontier => ('◆', Style::default().with_fg(FRONTIER_FG)),
        CellState::Path => ('●', Style::default().with_fg(PATH_FG).bold()),
    };
    Cell { ch, style }
}
