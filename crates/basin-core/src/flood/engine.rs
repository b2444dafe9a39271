use num_traits::AsPrimitive;
use tracing::{debug, warn};

use crate::compact::Compactness;
use crate::consts::PROGRESS_STEPS;
use crate::error::{BasinError, Result};
use crate::grid::{CellState, FloodGrid};
use crate::queue::{Candidate, FloodQueue};
use crate::topology::{Coord, Neighborhood};

use super::types::{CancelToken, FloodReport, ProgressReporter};

/// Priority-ordered flooding over a seeded state grid.
pub(super) struct FloodEngine<'a, T> {
    pub grid: FloodGrid<'a, T>,
    pub neighborhood: Neighborhood,
    pub compactness: Compactness,
    pub compute_dams: bool,
    pub queue: FloodQueue,
}

/// Maps the current flood level onto [0, 1] for progress reporting.
pub(super) struct LevelProgress {
    min: f64,
    span: f64,
    last_step: u32,
}

impl LevelProgress {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            span: max - min,
            last_step: 0,
        }
    }

    /// Returns the fraction when it has advanced by at least one step.
    fn advance(&mut self, level: f64) -> Option<f32> {
        if self.span.is_nan() || self.span <= 0.0 {
            return None;
        }
        let fraction = ((level - self.min) / self.span).clamp(0.0, 1.0);
        let step = (fraction * PROGRESS_STEPS as f64) as u32;
        if step > self.last_step {
            self.last_step = step;
            Some(fraction as f32)
        } else {
            None
        }
    }
}

impl<'a, T> FloodEngine<'a, T>
where
    T: AsPrimitive<f64>,
{
    /// Enqueue seeding candidates in order and mark them `Queued`.
    pub fn enqueue_seeds(&mut self, candidates: Vec<Candidate>) -> Result<()> {
        for candidate in candidates {
            self.grid.mark_queued(candidate.coord)?;
            self.queue.push(candidate);
        }
        Ok(())
    }

    /// Pop candidates until the queue is empty, checking `cancel` once per pop.
    pub fn run(
        &mut self,
        cancel: &CancelToken,
        reporter: &dyn ProgressReporter,
        progress: &mut LevelProgress,
        report: &mut FloodReport,
    ) -> Result<()> {
        let mut labels: Vec<u32> = Vec::with_capacity(self.neighborhood.max_neighbors());
        let mut pending: Vec<Coord> = Vec::with_capacity(self.neighborhood.max_neighbors());
        let mut level = f64::NEG_INFINITY;

        while let Some(candidate) = self.queue.pop_min() {
            if cancel.is_cancelled() {
                warn!(pops = report.pops, "Flooding cancelled");
                return Err(BasinError::Cancelled);
            }
            report.pops += 1;
            if candidate.priority < level {
                return Err(BasinError::InvariantViolation(format!(
                    "priority {} popped after {}",
                    candidate.priority, level
                )));
            }
            level = candidate.priority;
            if let Some(fraction) = progress.advance(candidate.priority) {
                reporter.progress(fraction);
            }

            labels.clear();
            pending.clear();
            for n in self.neighborhood.neighbors(candidate.coord) {
                match self.grid.state_at(n)? {
                    CellState::Labeled(id) => {
                        if !labels.contains(&id) {
                            labels.push(id);
                        }
                    }
                    CellState::Unvisited => {
                        if self.grid.in_mask(n)? {
                            pending.push(n);
                        }
                    }
                    CellState::Queued | CellState::Watershed => {}
                }
            }

            // Every queued cell was queued by a labeled neighbor, and labels
            // never change afterwards.
            if !labels.contains(&candidate.label) {
                return Err(BasinError::InvariantViolation(format!(
                    "cell {:?} popped with neighbor labels {:?}, expected {}",
                    candidate.coord, labels, candidate.label
                )));
            }

            if self.compute_dams && labels.len() > 1 {
                self.grid.set_watershed(candidate.coord)?;
                report.dams += 1;
                continue;
            }

            self.grid.set_label(candidate.coord, candidate.label)?;
            report.labeled += 1;

            for &n in &pending {
                let raw = self.grid.value_at(n)?;
                let increment = self
                    .compactness
                    .increment(candidate.increment, candidate.origin, n);
                // The flood level never drops below the level of the cell
                // that reached the neighbor. The floor is not carried into
                // the increment.
                let priority = (raw + increment).max(candidate.priority);
                self.grid.mark_queued(n)?;
                self.queue.push(Candidate::new(
                    n,
                    priority,
                    raw,
                    increment,
                    candidate.label,
                    candidate.origin,
                ));
            }
        }

        debug!(
            pops = report.pops,
            pushed = self.queue.pushed(),
            "Queue drained"
        );
        Ok(())
    }
}
