//! The step scheduler: drives one algorithm run, one step per tick.

use stepgrid_search::{Algorithm, SearchRun, Step};

use crate::board::Board;

/// The scheduler phase machine: `Idle → Running → {Succeeded, Failed} → Idle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Drives exactly one [`SearchRun`] at the frame cadence, translating steps
/// into board cell-state updates.
#[derive(Default)]
pub struct Scheduler {
    phase: Phase,
    run: Option<Box<dyn SearchRun>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether the last run reached a terminal outcome that has not been
    /// acknowledged yet.
    #[inline]
    pub fn finished(&self) -> bool {
        matches!(self.phase, Phase::Succeeded | Phase::Failed)
    }

    /// Try to begin a run over a frozen snapshot of `board`.
    ///
    /// A re-trigger while a run is in flight is a no-op, and a board without
    /// both endpoints leaves the scheduler idle; neither is an error.
    /// Returns whether a run actually began.
    pub fn start(&mut self, board: &Board, algorithm: Algorithm) -> bool {
        if self.is_running() {
            return false;
        }
        match algorithm.run(board.snapshot(), board.start(), board.end()) {
            Ok(run) => {
                self.run = Some(run);
                self.phase = Phase::Running;
                log::info!("{algorithm} run started");
                true
            }
            Err(e) => {
                log::debug!("run not started: {e}");
                false
            }
        }
    }

    /// Advance the active run by one step and apply it to `board`.
    /// No-op outside `Running`.
    pub fn tick(&mut self, board: &mut Board) {
        if !self.is_running() {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        match run.next_step() {
            Some(Step::Explored(p)) => board.mark_visited(p),
            Some(Step::Frontier(p)) => board.mark_frontier(p),
            Some(Step::Found(path)) => {
                let edges = path.len().saturating_sub(1);
                for p in path {
                    board.mark_path(p);
                }
                self.run = None;
                self.phase = Phase::Succeeded;
                log::info!("path found, {edges} edges");
            }
            Some(Step::Exhausted) | None => {
                self.run = None;
                self.phase = Phase::Failed;
                log::info!("frontier exhausted, no path");
            }
        }
    }

    /// Discard any run and return to `Idle`. Always safe: a run holds only
    /// in-memory state.
    pub fn reset(&mut self) {
        self.run = None;
        self.phase = Phase::Idle;
    }

    /// Acknowledge a terminal outcome, re-arming the scheduler.
    pub fn acknowledge(&mut self) {
        if self.finished() {
            self.phase = Phase::Idle;
        }
    }
}
