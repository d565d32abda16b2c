//! Breadth-first search as a resumable step sequence.

use std::collections::VecDeque;

use stepgrid_core::Point;

use crate::graph::SearchGraph;
use crate::step::{SearchRun, Step};

/// A breadth-first search run.
///
/// The frontier is a FIFO queue of flat cell indices; visited/enqueued
/// stores and the predecessor map are flat arrays over the snapshot.
/// Shortest path by edge count on the unweighted grid.
pub struct BfsRun<G: SearchGraph> {
    graph: G,
    goal: Point,
    queue: VecDeque<usize>,
    visited: Vec<bool>,
    enqueued: Vec<bool>,
    parent: Vec<usize>,
    /// Frontier notifications from the last expansion, drained one per step.
    pending: VecDeque<Step>,
    done: bool,
    nbuf: Vec<Point>,
}

impl<G: SearchGraph> BfsRun<G> {
    /// Create a run from `start` to `goal` over a frozen snapshot.
    pub fn new(graph: G, start: Point, goal: Point) -> Self {
        let len = graph.len();
        let mut run = Self {
            goal,
            queue: VecDeque::new(),
            visited: vec![false; len],
            enqueued: vec![false; len],
            parent: vec![usize::MAX; len],
            pending: VecDeque::new(),
            done: false,
            nbuf: Vec::with_capacity(4),
            graph,
        };
        if let Some(si) = run.graph.idx(start) {
            run.enqueued[si] = true;
            run.queue.push_back(si);
        }
        run
    }

    /// Follow the predecessor chain from `goal_idx` back to the start.
    fn reconstruct(&self, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.graph.point(ci));
            ci = self.parent[ci];
        }
        path.reverse();
        path
    }
}

impl<G: SearchGraph> SearchRun for BfsRun<G> {
    fn next_step(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }
        if let Some(step) = self.pending.pop_front() {
            return Some(step);
        }

        // Dequeue until a step can be emitted; skipped entries never stall
        // the caller.
        loop {
            let Some(ci) = self.queue.pop_front() else {
                self.done = true;
                return Some(Step::Exhausted);
            };
            if self.visited[ci] {
                continue;
            }
            self.visited[ci] = true;
            let cp = self.graph.point(ci);

            if cp == self.goal {
                self.done = true;
                return Some(Step::Found(self.reconstruct(ci)));
            }

            let mut nbuf = std::mem::take(&mut self.nbuf);
            nbuf.clear();
            self.graph.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.graph.idx(np) else {
                    continue;
                };
                if self.visited[ni] || self.enqueued[ni] {
                    continue;
                }
                self.enqueued[ni] = true;
                self.parent[ni] = ci;
                self.queue.push_back(ni);
                self.pending.push_back(Step::Frontier(np));
            }
            self.nbuf = nbuf;

            return Some(Step::Explored(cp));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PassGrid;

    fn drain(mut run: impl SearchRun) -> Vec<Step> {
        let mut steps = Vec::new();
        while let Some(s) = run.next_step() {
            steps.push(s);
        }
        steps
    }

    #[test]
    fn empty_5x5_finds_manhattan_path() {
        let g = PassGrid::open(5, 5);
        let run = BfsRun::new(g, Point::ZERO, Point::new(4, 4));
        let steps = drain(run);
        let Some(Step::Found(path)) = steps.last() else {
            panic!("expected Found, got {:?}", steps.last());
        };
        assert_eq!(path.first(), Some(&Point::ZERO));
        assert_eq!(path.last(), Some(&Point::new(4, 4)));
        // 8 edges = Manhattan distance on the empty board.
        assert_eq!(path.len() - 1, 8);
    }

    #[test]
    fn walled_off_goal_exhausts() {
        // Middle row fully barred on a 3×3 board.
        let mut g = PassGrid::open(3, 3);
        for x in 0..3 {
            g.block(Point::new(x, 1));
        }
        let run = BfsRun::new(g, Point::ZERO, Point::new(2, 2));
        let steps = drain(run);
        assert_eq!(steps.last(), Some(&Step::Exhausted));
        assert_eq!(steps.iter().filter(|s| s.is_terminal()).count(), 1);
    }

    #[test]
    fn terminal_step_is_last_and_run_stops() {
        let g = PassGrid::open(2, 2);
        let mut run = BfsRun::new(g, Point::ZERO, Point::new(1, 1));
        let mut saw_terminal = false;
        while let Some(s) = run.next_step() {
            assert!(!saw_terminal, "steps after a terminal step");
            saw_terminal = s.is_terminal();
        }
        assert!(saw_terminal);
        assert!(run.next_step().is_none());
    }

    #[test]
    fn first_step_explores_the_start() {
        let g = PassGrid::open(3, 3);
        let mut run = BfsRun::new(g, Point::new(1, 1), Point::new(2, 2));
        assert_eq!(run.next_step(), Some(Step::Explored(Point::new(1, 1))));
        // Frontier notifications follow in canonical neighbor order.
        assert_eq!(run.next_step(), Some(Step::Frontier(Point::new(1, 0))));
        assert_eq!(run.next_step(), Some(Step::Frontier(Point::new(1, 2))));
        assert_eq!(run.next_step(), Some(Step::Frontier(Point::new(0, 1))));
        assert_eq!(run.next_step(), Some(Step::Frontier(Point::new(2, 1))));
    }

    #[test]
    fn barrier_cells_never_appear_in_steps() {
        let mut g = PassGrid::open(4, 4);
        let walls = [Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)];
        for w in walls {
            g.block(w);
        }
        let run = BfsRun::new(g, Point::ZERO, Point::new(3, 3));
        for step in drain(run) {
            match step {
                Step::Explored(p) | Step::Frontier(p) => {
                    assert!(!walls.contains(&p), "barrier {p} appeared in a step");
                }
                Step::Found(path) => {
                    for p in path {
                        assert!(!walls.contains(&p));
                    }
                }
                Step::Exhausted => panic!("a path around the wall exists"),
            }
        }
    }

    #[test]
    fn detour_path_is_longer_than_manhattan() {
        // A vertical wall with a gap at the bottom forces a detour.
        let mut g = PassGrid::open(5, 5);
        for y in 0..4 {
            g.block(Point::new(2, y));
        }
        let run = BfsRun::new(g, Point::ZERO, Point::new(4, 0));
        let steps = drain(run);
        let Some(Step::Found(path)) = steps.last() else {
            panic!("expected Found");
        };
        assert!(path.len() as i32 - 1 > 4);
        // Still the shortest detour: down to the gap, across, back up.
        assert_eq!(path.len() - 1, 12);
    }

    #[test]
    fn start_equals_goal_is_found_immediately() {
        let g = PassGrid::open(3, 3);
        let mut run = BfsRun::new(g, Point::new(1, 1), Point::new(1, 1));
        assert_eq!(
            run.next_step(),
            Some(Step::Found(vec![Point::new(1, 1)]))
        );
        assert!(run.next_step().is_none());
    }
}
