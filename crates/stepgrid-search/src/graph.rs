//! Graph access for the search runs: the [`SearchGraph`] trait and the
//! [`PassGrid`] passability snapshot.

use stepgrid_core::Point;

/// Grid-shaped graph interface for the search algorithms.
///
/// Implementations enumerate traversable neighbours in the canonical
/// up/down/left/right order so that runs are reproducible.
pub trait SearchGraph {
    /// Width of the grid.
    fn width(&self) -> i32;

    /// Height of the grid.
    fn height(&self) -> i32;

    /// Append the traversable neighbours of `p` into `buf`. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Number of cells.
    #[inline]
    fn len(&self) -> usize {
        (self.width().max(0) as usize) * (self.height().max(0) as usize)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert a point to a flat row-major index. `None` if out of bounds.
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width() || p.y >= self.height() {
            return None;
        }
        Some((p.y as usize) * (self.width() as usize) + (p.x as usize))
    }

    /// Convert a flat index back to a point.
    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }
}

/// An owned, frozen passability map.
///
/// A run receives one of these at launch instead of reading the live board,
/// so barrier edits made while the run is in flight can never corrupt it.
#[derive(Debug, Clone)]
pub struct PassGrid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl PassGrid {
    /// Create a fully open grid of the given dimensions.
    pub fn open(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            width: w,
            height: h,
            blocked: vec![false; (w as usize) * (h as usize)],
        }
    }

    /// Mark `p` as blocked. No-op outside the grid.
    pub fn block(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.blocked[i] = true;
        }
    }

    /// Whether `p` is blocked. Out-of-bounds points count as blocked.
    pub fn is_blocked(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }
}

impl SearchGraph for PassGrid {
    #[inline]
    fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    fn height(&self) -> i32 {
        self.height
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.cardinal_neighbors() {
            if !self.is_blocked(n) {
                buf.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_has_four_inner_neighbors() {
        let g = PassGrid::open(3, 3);
        let mut buf = Vec::new();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(0, 1),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn corners_are_clipped() {
        let g = PassGrid::open(3, 3);
        let mut buf = Vec::new();
        g.neighbors(Point::ZERO, &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1), Point::new(1, 0)]);
    }

    #[test]
    fn blocked_cells_are_not_neighbors() {
        let mut g = PassGrid::open(3, 3);
        g.block(Point::new(1, 0));
        g.block(Point::new(0, 1));
        let mut buf = Vec::new();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 2), Point::new(2, 1)]);
        assert!(g.is_blocked(Point::new(1, 0)));
        assert!(g.is_blocked(Point::new(-1, 0)));
    }

    #[test]
    fn idx_point_round_trip() {
        let g = PassGrid::open(4, 3);
        for i in 0..g.len() {
            assert_eq!(g.idx(g.point(i)), Some(i));
        }
        assert_eq!(g.idx(Point::new(4, 0)), None);
        assert_eq!(g.idx(Point::new(0, 3)), None);
    }
}
