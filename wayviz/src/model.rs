//! The interaction model: raw input events in, board mutations and
//! scheduler transitions out.

use stepgrid_core::{
    Cell, Point,
    app::{Effect, Model},
    grid::Grid,
    messages::{Key, Mods, MouseAction, Msg},
    style::Style,
};
use stepgrid_search::Algorithm;

use crate::board::Board;
use crate::colors;
use crate::scheduler::{Phase, Scheduler};

/// The visualizer model.
///
/// Pointer gestures place content in order: the first painted cell becomes
/// Start, the second End, and every later one a Barrier. Shift (or the
/// secondary button) erases instead. Gestures are rejected while a run is
/// in flight so the frozen snapshot stays authoritative.
pub struct VizModel {
    board: Board,
    scheduler: Scheduler,
    algorithm: Algorithm,
    /// Primary button held: Move events paint.
    painting: bool,
    /// Current gesture erases instead of placing.
    erasing: bool,
}

impl VizModel {
    pub fn new(size: i32, algorithm: Algorithm) -> Self {
        Self {
            board: Board::new(size, size),
            scheduler: Scheduler::new(),
            algorithm,
            painting: false,
            erasing: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('q') | Key::Escape => Some(Effect::End),
            Key::Char('c') => {
                self.board.reset();
                self.scheduler.reset();
                None
            }
            Key::Char('r') | Key::Enter | Key::Space => {
                self.trigger_run();
                None
            }
            _ => None,
        }
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point, modifiers: Mods) {
        match action {
            MouseAction::Main => {
                self.painting = true;
                self.erasing = modifiers.shift;
                self.paint(pos);
            }
            MouseAction::Secondary => {
                self.painting = true;
                self.erasing = true;
                self.paint(pos);
            }
            MouseAction::Move => {
                if self.painting {
                    self.paint(pos);
                }
            }
            MouseAction::Release => {
                self.painting = false;
                self.erasing = false;
            }
        }
    }

    /// Apply one painted cell of the current gesture.
    fn paint(&mut self, p: Point) {
        if !self.board.contains(p) {
            return;
        }
        if self.scheduler.is_running() {
            // The in-flight snapshot must not be edited out from under the
            // run; the gesture is rejected, not queued.
            log::debug!("gesture at {p} rejected: run in progress");
            return;
        }
        if self.scheduler.finished() {
            self.board.clear_search();
            self.scheduler.acknowledge();
        }
        if self.erasing {
            self.board.erase(p);
            return;
        }
        if self.board.start().is_none() {
            if let Err(e) = self.board.set_start(p) {
                log::debug!("start placement rejected: {e}");
            }
        } else if self.board.end().is_none() && self.board.start() != Some(p) {
            if let Err(e) = self.board.set_end(p) {
                log::debug!("end placement rejected: {e}");
            }
        } else {
            self.board.set_barrier(p);
        }
    }

    fn trigger_run(&mut self) {
        if self.scheduler.is_running() {
            return;
        }
        if self.scheduler.finished() {
            self.board.clear_search();
            self.scheduler.acknowledge();
        }
        self.scheduler.start(&self.board, self.algorithm);
    }

    // -------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------

    fn draw_status(&self, grid: &mut Grid) {
        let phase = match self.phase() {
            Phase::Idle => {
                if self.board.start().is_none() || self.board.end().is_none() {
                    "place start, end, barriers"
                } else {
                    "ready"
                }
            }
            Phase::Running => "searching...",
            Phase::Succeeded => "path found",
            Phase::Failed => "no path",
        };
        let text = format!(
            "{} | {}  [r]un [c]lear [q]uit",
            self.algorithm.name(),
            phase
        );
        let style = Style::default().with_fg(colors::STATUS_FG);
        let y = self.board.height();
        for (i, ch) in text.chars().enumerate() {
            let p = Point::new(i as i32, y);
            if !grid.contains(p) {
                break;
            }
            grid.set(p, Cell { ch, style });
        }
    }
}

impl Model for VizModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Tick { .. } => {
                self.scheduler.tick(&mut self.board);
                None
            }
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse {
                action,
                pos,
                modifiers,
                ..
            } => {
                self.handle_mouse(action, pos, modifiers);
                None
            }
            Msg::Screen { .. } => None,
            Msg::Quit => Some(Effect::End),
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        for (p, state) in self.board.iter() {
            grid.set(p, colors::cell_for(state));
        }
        self.draw_status(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;

    fn click(model: &mut VizModel, p: Point) {
        model.update(Msg::mouse(MouseAction::Main, p, Mods::NONE));
        model.update(Msg::mouse(MouseAction::Release, p, Mods::NONE));
    }

    fn shift_click(model: &mut VizModel, p: Point) {
        model.update(Msg::mouse(MouseAction::Main, p, Mods::SHIFT));
        model.update(Msg::mouse(MouseAction::Release, p, Mods::SHIFT));
    }

    fn tick_until_done(model: &mut VizModel) {
        let mut guard = 0;
        while model.phase() == Phase::Running {
            model.update(Msg::tick());
            guard += 1;
            assert!(guard < 10_000, "run did not terminate");
        }
    }

    #[test]
    fn gestures_place_start_end_then_barriers() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(0, 0));
        click(&mut m, Point::new(4, 4));
        click(&mut m, Point::new(2, 2));
        assert_eq!(m.board().state(Point::new(0, 0)), CellState::Start);
        assert_eq!(m.board().state(Point::new(4, 4)), CellState::End);
        assert_eq!(m.board().state(Point::new(2, 2)), CellState::Barrier);
    }

    #[test]
    fn drag_paints_a_barrier_line() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(0, 0));
        click(&mut m, Point::new(4, 4));
        m.update(Msg::mouse(MouseAction::Main, Point::new(1, 1), Mods::NONE));
        for x in 2..4 {
            m.update(Msg::mouse(MouseAction::Move, Point::new(x, 1), Mods::NONE));
        }
        m.update(Msg::mouse(
            MouseAction::Release,
            Point::new(3, 1),
            Mods::NONE,
        ));
        for x in 1..4 {
            assert_eq!(m.board().state(Point::new(x, 1)), CellState::Barrier);
        }
        // Moves after release do not paint.
        m.update(Msg::mouse(MouseAction::Move, Point::new(0, 2), Mods::NONE));
        assert_eq!(m.board().state(Point::new(0, 2)), CellState::Empty);
    }

    #[test]
    fn shift_click_erases_any_cell() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(1, 1));
        assert_eq!(m.board().state(Point::new(1, 1)), CellState::Start);
        shift_click(&mut m, Point::new(1, 1));
        assert_eq!(m.board().state(Point::new(1, 1)), CellState::Empty);
        assert_eq!(m.board().start(), None);
    }

    #[test]
    fn secondary_button_erases() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(0, 0));
        click(&mut m, Point::new(1, 0));
        click(&mut m, Point::new(2, 2));
        m.update(Msg::mouse(
            MouseAction::Secondary,
            Point::new(2, 2),
            Mods::NONE,
        ));
        assert_eq!(m.board().state(Point::new(2, 2)), CellState::Empty);
    }

    #[test]
    fn run_key_without_endpoints_is_a_noop() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        assert!(m.update(Msg::key(Key::Char('r'))).is_none());
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn run_completes_and_marks_path() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(0, 0));
        click(&mut m, Point::new(4, 4));
        m.update(Msg::key(Key::Char('r')));
        assert_eq!(m.phase(), Phase::Running);
        tick_until_done(&mut m);
        assert_eq!(m.phase(), Phase::Succeeded);
        let path_cells = m
            .board()
            .iter()
            .filter(|&(_, c)| c == CellState::Path)
            .count();
        assert_eq!(path_cells, 7);
    }

    #[test]
    fn edits_are_rejected_mid_run() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(0, 0));
        click(&mut m, Point::new(4, 4));
        m.update(Msg::key(Key::Space));
        assert_eq!(m.phase(), Phase::Running);
        click(&mut m, Point::new(2, 2));
        assert_eq!(m.board().state(Point::new(2, 2)), CellState::Empty);
    }

    #[test]
    fn rerun_clears_previous_marks_first() {
        let mut m = VizModel::new(5, Algorithm::AStar);
        click(&mut m, Point::new(0, 0));
        click(&mut m, Point::new(4, 4));
        m.update(Msg::key(Key::Enter));
        tick_until_done(&mut m);
        assert_eq!(m.phase(), Phase::Succeeded);
        m.update(Msg::key(Key::Enter));
        assert_eq!(m.phase(), Phase::Running);
        tick_until_done(&mut m);
        assert_eq!(m.phase(), Phase::Succeeded);
    }

    #[test]
    fn clear_key_resets_everything() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(0, 0));
        click(&mut m, Point::new(4, 4));
        m.update(Msg::key(Key::Char('r')));
        tick_until_done(&mut m);
        m.update(Msg::key(Key::Char('c')));
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.board().iter().all(|(_, c)| c == CellState::Empty));
        assert_eq!(m.board().start(), None);
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        assert!(matches!(
            m.update(Msg::key(Key::Char('q'))),
            Some(Effect::End)
        ));
        assert!(matches!(m.update(Msg::key(Key::Escape)), Some(Effect::End)));
        assert!(matches!(m.update(Msg::Quit), Some(Effect::End)));
    }

    #[test]
    fn draw_renders_board_and_status() {
        let mut m = VizModel::new(5, Algorithm::Bfs);
        click(&mut m, Point::new(0, 0));
        let mut grid = Grid::new(40, 6);
        m.draw(&mut grid);
        assert_eq!(grid.at(Point::new(0, 0)).ch, 'S');
        assert_eq!(grid.at(Point::new(1, 0)).ch, '·');
        // Status line starts with the algorithm name.
        assert_eq!(grid.at(Point::new(0, 5)).ch, 'b');
        assert_eq!(grid.at(Point::new(1, 5)).ch, 'f');
        assert_eq!(grid.at(Point::new(2, 5)).ch, 's');
    }
}
