use stepgrid_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent on a uniform-cost grid with orthogonal moves,
/// which is what makes it the A* heuristic here.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Point::ZERO, Point::new(4, 4)), 8);
        assert_eq!(manhattan(Point::new(2, 5), Point::new(5, 2)), 6);
        assert_eq!(manhattan(Point::new(1, 1), Point::new(1, 1)), 0);
    }
}
