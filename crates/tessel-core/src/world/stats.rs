//! Per-step simulation statistics

use serde::{Deserialize, Serialize};

/// What happened during one level step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Step number that was just simulated
    pub step: u64,
    /// Cells whose tick asked for a redraw
    pub redraw_cells: u32,
    /// Movement requests that reached the resolver
    pub moves_attempted: u32,
    /// Movement requests where at least one axis moved
    pub moves_succeeded: u32,
    /// Entities detached during the step
    pub entities_removed: u32,
}

impl StepReport {
    pub fn new(step: u64) -> Self {
        Self {
            step,
            ..Default::default()
        }
    }

    pub fn record_move(&mut self, succeeded: bool) {
        self.moves_attempted += 1;
        if succeeded {
            self.moves_succeeded += 1;
        }
    }

    /// Fold another report into a running total
    pub fn accumulate(&mut self, other: &StepReport) {
        self.step = self.step.max(other.step);
        self.redraw_cells += other.redraw_cells;
        self.moves_attempted += other.moves_attempted;
        self.moves_succeeded += other.moves_succeeded;
        self.entities_removed += other.entities_removed;
    }
}
