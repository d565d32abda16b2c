//! A* search as a resumable step sequence.

use std::collections::{BinaryHeap, VecDeque};

use stepgrid_core::Point;

use crate::distance::manhattan;
use crate::graph::SearchGraph;
use crate::step::{SearchRun, Step};

/// Sentinel g-score meaning "not yet reached".
const UNREACHABLE: i32 = i32::MAX;

/// Reference into the node arrays, ordered for the open heap.
///
/// Ordering is reversed so the max-heap pops the entry with the lowest `f`
/// first; ties prefer the lower `g` (cells closer to the start), then the
/// earlier insertion (which encodes the canonical neighbor order), keeping
/// expansion deterministic.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenRef {
    f: i32,
    g: i32,
    seq: u64,
    idx: usize,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then(other.g.cmp(&self.g))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// An A* run with uniform edge cost 1 and the Manhattan heuristic.
///
/// `f = g + h` ordering over a binary heap; stale heap entries are skipped
/// on pop. The heuristic is admissible and consistent on this grid, so the
/// reported path length always matches BFS.
pub struct AstarRun<G: SearchGraph> {
    graph: G,
    goal: Point,
    open: BinaryHeap<OpenRef>,
    g: Vec<i32>,
    closed: Vec<bool>,
    parent: Vec<usize>,
    discovered: Vec<bool>,
    pending: VecDeque<Step>,
    seq: u64,
    done: bool,
    nbuf: Vec<Point>,
}

impl<G: SearchGraph> AstarRun<G> {
    /// Create a run from `start` to `goal` over a frozen snapshot.
    pub fn new(graph: G, start: Point, goal: Point) -> Self {
        let len = graph.len();
        let mut run = Self {
            goal,
            open: BinaryHeap::new(),
            g: vec![UNREACHABLE; len],
            closed: vec![false; len],
            parent: vec![usize::MAX; len],
            discovered: vec![false; len],
            pending: VecDeque::new(),
            seq: 0,
            done: false,
            nbuf: Vec::with_capacity(4),
            graph,
        };
        if let Some(si) = run.graph.idx(start) {
            run.g[si] = 0;
            run.discovered[si] = true;
            run.push_open(si, 0, manhattan(start, goal));
        }
        run
    }

    fn push_open(&mut self, idx: usize, g: i32, h: i32) {
        self.open.push(OpenRef {
            f: g + h,
            g,
            seq: self.seq,
            idx,
        });
        self.seq += 1;
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

impl<G: SearchGraph> SearchRun for AstarRun<G> {
    fn next_step(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }
        if let Some(step) = self.pending.pop_front() {
            return Some(step);
        }

        loop {
            let Some(current) = self.open.pop() else {
                self.done = true;
                return Some(Step::Exhausted);
            };
            let ci = current.idx;

            // Stale entry: the cell was finalized through a better-or-equal
            // g already. Skipping must not stall the caller, so keep popping.
            if self.closed[ci] || current.g > self.g[ci] {
                continue;
            }
            self.closed[ci] = true;
            let cp = self.graph.point(ci);

            if cp == self.goal {
                self.done = true;
                return Some(Step::Found(self.reconstruct(ci)));
            }

            let current_g = self.g[ci];
            let mut nbuf = std::mem::take(&mut self.nbuf);
            nbuf.clear();
            self.graph.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.graph.idx(np) else {
                    continue;
                };
                if self.closed[ni] {
                    continue;
                }
                let tentative = current_g + 1;
                if tentative >= self.g[ni] {
                    continue;
                }
                self.g[ni] = tentative;
                self.parent[ni] = ci;
                self.push_open(ni, tentative, manhattan(np, self.goal));
                if !self.discovered[ni] {
                    self.discovered[ni] = true;
                    self.pending.push_back(Step::Frontier(np));
                }
            }
            self.nbuf = nbuf;

            return Some(Step::Explored(cp));
        }
    }
}
