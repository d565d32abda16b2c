//! Depth-first search as a resumable step sequence.

use std::collections::VecDeque;

use stepgrid_core::Point;

use crate::graph::SearchGraph;
use crate::step::{SearchRun, Step};

/// A depth-first search run.
///
/// The frontier is a LIFO stack, so the run commits to one branch and
/// backtracks only at dead ends. The found path is valid (orthogonal,
/// barrier-free) but not necessarily shortest; the deep, winding
/// exploration is the characteristic being visualized.
pub struct DfsRun<G: SearchGraph> {
    graph: G,
    goal: Point,
    stack: Vec<usize>,
    visited: Vec<bool>,
    discovered: Vec<bool>,
    parent: Vec<usize>,
    /// Frontier notifications from the last expansion, drained one per step.
    pending: VecDeque<Step>,
    done: bool,
    nbuf: Vec<Point>,
}

impl<G: SearchGraph> DfsRun<G> {
    /// Create a run from `start` to `goal` over a frozen snapshot.
    pub fn new(graph: G, start: Point, goal: Point) -> Self {
        let len = graph.len();
        let mut run = Self {
            goal,
            stack: Vec::new(),
            visited: vec![false; len],
            discovered: vec![false; len],
            parent: vec![usize::MAX; len],
            pending: VecDeque::new(),
            done: false,
            nbuf: Vec::with_capacity(4),
            graph,
        };
        if let Some(si) = run.graph.idx(start) {
            run.discovered[si] = true;
            run.stack.push(si);
        }
        run
    }

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

impl<G: SearchGraph> SearchRun for DfsRun<G> {
    fn next_step(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }
        if let Some(step) = self.pending.pop_front() {
            return Some(step);
        }

        // A cell can sit on the stack more than once; stale entries are
        // skipped without stalling the caller.
        loop {
            let Some(ci) = self.stack.pop() else {
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
                if self.visited[ni] || self.discovered[ni] {
                    continue;
                }
                self.discovered[ni] = true;
                self.parent[ni] = ci;
                self.pending.push_back(Step::Frontier(np));
            }
            // Pushed in reverse so the first canonical neighbour is popped
            // (and therefore descended into) next.
            for &np in nbuf.iter().rev() {
                if let Some(ni) = self.graph.idx(np) {
                    if !self.visited[ni] {
                        self.stack.push(ni);
                    }
                }
            }
            self.nbuf = nbuf;

            return Some(Step::Explored(cp));
        }
    }
}
