//! The domain board: cell states and placement rules.

use stepgrid_core::Point;
use stepgrid_search::PassGrid;
use thiserror::Error;

/// The state of a single board cell. Exactly one state holds at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    /// Finalized by the current/last run.
    Visited,
    /// Discovered but not yet finalized by the current/last run.
    Frontier,
    /// On the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Whether this is one of the transient search marks (as opposed to
    /// user-placed content).
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Visited | CellState::Frontier | CellState::Path)
    }
}

/// A rejected start/end placement. The board is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cannot place an endpoint on a barrier cell")]
    OnBarrier,
    #[error("start and end cannot share a cell")]
    EndpointClash,
    #[error("position {0} is outside the board")]
    OutOfBounds(Point),
}

/// A fixed-size grid of [`CellState`]s with at most one start and one end.
///
/// The board is pure data: it knows nothing about algorithms. Runs receive
/// a frozen [`PassGrid`] snapshot via [`Board::snapshot`] and the scheduler
/// writes search marks back through the `mark_*` methods.
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<CellState>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Board {
    /// Create an all-empty board.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(1);
        let h = height.max(1);
        Self {
            width: w,
            height: h,
            cells: vec![CellState::Empty; (w as usize) * (h as usize)],
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// The state at `p`, or `Empty` outside the board.
    pub fn state(&self, p: Point) -> CellState {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// The start cell, if placed.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The end cell, if placed.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    /// Turn an `Empty` cell into a `Barrier`. Start/End cells (and search
    /// marks) are left untouched.
    pub fn set_barrier(&mut self, p: Point) {
        if let Some(i) = self.index(p) {
            if self.cells[i] == CellState::Empty {
                self.cells[i] = CellState::Barrier;
            }
        }
    }

    /// Turn a `Barrier` cell back into `Empty`.
    pub fn clear_barrier(&mut self, p: Point) {
        if let Some(i) = self.index(p) {
            if self.cells[i] == CellState::Barrier {
                self.cells[i] = CellState::Empty;
            }
        }
    }

    /// Force a cell back to `Empty` regardless of its state, releasing the
    /// start/end reference if it held one.
    pub fn erase(&mut self, p: Point) {
        if let Some(i) = self.index(p) {
            self.cells[i] = CellState::Empty;
            if self.start == Some(p) {
                self.start = None;
            }
            if self.end == Some(p) {
                self.end = None;
            }
        }
    }

    /// Place the start cell. Any previous start reverts to `Empty`.
    pub fn set_start(&mut self, p: Point) -> Result<(), PlacementError> {
        let i = self.index(p).ok_or(PlacementError::OutOfBounds(p))?;
        if self.cells[i] == CellState::Barrier {
            return Err(PlacementError::OnBarrier);
        }
        if self.end == Some(p) {
            return Err(PlacementError::EndpointClash);
        }
        if let Some(prev) = self.start.take() {
            let pi = self.index(prev).expect("start was in bounds");
            self.cells[pi] = CellState::Empty;
        }
        self.cells[i] = CellState::Start;
        self.start = Some(p);
        Ok(())
    }

    /// Place the end cell. Any previous end reverts to `Empty`.
    pub fn set_end(&mut self, p: Point) -> Result<(), PlacementError> {
        let i = self.index(p).ok_or(PlacementError::OutOfBounds(p))?;
        if self.cells[i] == CellState::Barrier {
            return Err(PlacementError::OnBarrier);
        }
        if self.start == Some(p) {
            return Err(PlacementError::EndpointClash);
        }
        if let Some(prev) = self.end.take() {
            let pi = self.index(prev).expect("end was in bounds");
            self.cells[pi] = CellState::Empty;
        }
        self.cells[i] = CellState::End;
        self.end = Some(p);
        Ok(())
    }

    /// Reset every cell to `Empty` and clear the endpoints. Idempotent.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
        self.start = None;
        self.end = None;
    }

    /// Demote search marks (`Visited`/`Frontier`/`Path`) back to `Empty`,
    /// keeping barriers and endpoints, so the board can be re-run.
    pub fn clear_search(&mut self) {
        for c in &mut self.cells {
            if c.is_search_mark() {
                *c = CellState::Empty;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search-mark application (scheduler-driven)
    // -----------------------------------------------------------------------

    /// Mark `p` as visited. Start/End keep their own state for display.
    pub fn mark_visited(&mut self, p: Point) {
        self.mark(p, CellState::Visited);
    }

    /// Mark `p` as frontier. Start/End keep their own state for display.
    pub fn mark_frontier(&mut self, p: Point) {
        self.mark(p, CellState::Frontier);
    }

    /// Mark `p` as on the final path, overwriting visited/frontier marks
    /// but never Start/End.
    pub fn mark_path(&mut self, p: Point) {
        self.mark(p, CellState::Path);
    }

    fn mark(&mut self, p: Point, state: CellState) {
        if let Some(i) = self.index(p) {
            match self.cells[i] {
                CellState::Start | CellState::End | CellState::Barrier => {}
                _ => self.cells[i] = state,
            }
        }
    }

    // -----------------------------------------------------------------------
    // Graph access
    // -----------------------------------------------------------------------

    /// Append the traversable orthogonal neighbours of `p`, in the canonical
    /// up/down/left/right order. Barrier cells are never returned.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.cardinal_neighbors() {
            if self.contains(n) && self.state(n) != CellState::Barrier {
                buf.push(n);
            }
        }
    }

    /// Freeze the current barrier set into an owned passability snapshot.
    pub fn snapshot(&self) -> PassGrid {
        let mut grid = PassGrid::open(self.width, self.height);
        for (i, &c) in self.cells.iter().enumerate() {
            if c == CellState::Barrier {
                let w = self.width as usize;
                grid.block(Point::new((i % w) as i32, (i / w) as i32));
            }
        }
        grid
    }

    /// Row-major iterator over `(Point, CellState)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (Point::new((i % w) as i32, (i / w) as i32), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let b = Board::new(4, 4);
        assert!(b.iter().all(|(_, c)| c == CellState::Empty));
        assert_eq!(b.start(), None);
        assert_eq!(b.end(), None);
    }

    #[test]
    fn moving_start_relocates_it() {
        let mut b = Board::new(5, 5);
        b.set_start(Point::new(2, 2)).unwrap();
        b.set_start(Point::new(3, 3)).unwrap();
        assert_eq!(b.state(Point::new(2, 2)), CellState::Empty);
        assert_eq!(b.state(Point::new(3, 3)), CellState::Start);
        assert_eq!(b.start(), Some(Point::new(3, 3)));
        let starts = b.iter().filter(|&(_, c)| c == CellState::Start).count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn start_on_barrier_is_rejected() {
        let mut b = Board::new(3, 3);
        b.set_barrier(Point::new(1, 1));
        let before = b.clone();
        let err = b.set_start(Point::new(1, 1)).unwrap_err();
        assert_eq!(err, PlacementError::OnBarrier);
        assert_eq!(b.state(Point::new(1, 1)), before.state(Point::new(1, 1)));
        assert_eq!(b.start(), None);
    }

    #[test]
    fn endpoints_cannot_collide() {
        let mut b = Board::new(3, 3);
        b.set_start(Point::new(0, 0)).unwrap();
        assert_eq!(
            b.set_end(Point::new(0, 0)),
            Err(PlacementError::EndpointClash)
        );
        b.set_end(Point::new(2, 2)).unwrap();
        assert_eq!(
            b.set_start(Point::new(2, 2)),
            Err(PlacementError::EndpointClash)
        );
    }

    #[test]
    fn barrier_toggles() {
        let mut b = Board::new(3, 3);
        b.set_barrier(Point::new(1, 1));
        assert_eq!(b.state(Point::new(1, 1)), CellState::Barrier);
        b.clear_barrier(Point::new(1, 1));
        assert_eq!(b.state(Point::new(1, 1)), CellState::Empty);
        // clearing a non-barrier cell is a no-op
        b.set_start(Point::new(0, 0)).unwrap();
        b.clear_barrier(Point::new(0, 0));
        assert_eq!(b.state(Point::new(0, 0)), CellState::Start);
    }

    #[test]
    fn barrier_skips_endpoints() {
        let mut b = Board::new(3, 3);
        b.set_start(Point::new(0, 0)).unwrap();
        b.set_barrier(Point::new(0, 0));
        assert_eq!(b.state(Point::new(0, 0)), CellState::Start);
    }

    #[test]
    fn erase_releases_endpoint() {
        let mut b = Board::new(3, 3);
        b.set_start(Point::new(1, 1)).unwrap();
        b.erase(Point::new(1, 1));
        assert_eq!(b.state(Point::new(1, 1)), CellState::Empty);
        assert_eq!(b.start(), None);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut b = Board::new(4, 4);
        b.set_start(Point::new(0, 0)).unwrap();
        b.set_end(Point::new(3, 3)).unwrap();
        b.set_barrier(Point::new(1, 1));
        b.reset();
        let once = b.clone();
        b.reset();
        assert!(b.iter().eq(once.iter()));
        assert_eq!(b.start(), None);
        assert_eq!(b.end(), None);
    }

    #[test]
    fn neighbors_exclude_barriers_in_order() {
        let mut b = Board::new(3, 3);
        b.set_barrier(Point::new(1, 0));
        let mut buf = Vec::new();
        b.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![Point::new(1, 2), Point::new(0, 1), Point::new(2, 1)]
        );
    }

    #[test]
    fn clear_search_keeps_user_content() {
        let mut b = Board::new(3, 3);
        b.set_start(Point::new(0, 0)).unwrap();
        b.set_end(Point::new(2, 2)).unwrap();
        b.set_barrier(Point::new(1, 0));
        b.mark_visited(Point::new(0, 1));
        b.mark_frontier(Point::new(0, 2));
        b.mark_path(Point::new(1, 1));
        b.clear_search();
        assert_eq!(b.state(Point::new(0, 1)), CellState::Empty);
        assert_eq!(b.state(Point::new(0, 2)), CellState::Empty);
        assert_eq!(b.state(Point::new(1, 1)), CellState::Empty);
        assert_eq!(b.state(Point::new(0, 0)), CellState::Start);
        assert_eq!(b.state(Point::new(2, 2)), CellState::End);
        assert_eq!(b.state(Point::new(1, 0)), CellState::Barrier);
    }

    #[test]
    fn marks_never_overwrite_endpoints() {
        let mut b = Board::new(3, 3);
        b.set_start(Point::new(0, 0)).unwrap();
        b.set_end(Point::new(2, 2)).unwrap();
        b.mark_visited(Point::new(0, 0));
        b.mark_path(Point::new(2, 2));
        assert_eq!(b.state(Point::new(0, 0)), CellState::Start);
        assert_eq!(b.state(Point::new(2, 2)), CellState::End);
    }

    #[test]
    fn snapshot_freezes_barriers() {
        let mut b = Board::new(3, 3);
        b.set_barrier(Point::new(1, 1));
        let snap = b.snapshot();
        assert!(snap.is_blocked(Point::new(1, 1)));
        // Later edits do not affect the snapshot.
        b.set_barrier(Point::new(0, 1));
        assert!(!snap.is_blocked(Point::new(0, 1)));
    }
}
