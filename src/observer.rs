//! Progress observation hooks.
//!
//! Algorithmic code reports progress through an injectable observer
//! instead of logging directly, so embedders can route progress to
//! their own channels or drop it entirely.

use log::{debug, info};

use crate::optimizer::TracePoint;

/// Pipeline stages reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Matchup generation.
    Generation,
    /// Home/away role assignment.
    RoleAssignment,
    /// Weekly calendar placement.
    WeeklyPlacement,
    /// Constraint filtering.
    ConstraintFiltering,
    /// Constraint relaxation.
    Relaxation,
    /// Simulated-annealing optimization.
    Optimization,
    /// Schedule analysis.
    Analysis,
}

/// Receives progress callbacks during a scheduling run.
///
/// Every method defaults to a no-op; implement only what you need.
pub trait ProgressObserver {
    /// A pipeline stage finished, with a stage-specific item count
    /// (fixtures generated, placed, displaced, and so on).
    fn stage_completed(&mut self, _stage: PipelineStage, _count: usize) {}

    /// The optimizer sampled its trace.
    fn annealing_sample(&mut self, _sample: &TracePoint) {}
}

/// Observer that drops all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {}

/// Observer that forwards progress to the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn stage_completed(&mut self, stage: PipelineStage, count: usize) {
        info!("{stage:?} completed: {count} items");
    }

    fn annealing_sample(&mut self, sample: &TracePoint) {
        debug!(
            "iteration {}: temperature {:.3}, current {:.2}, best {:.2}",
            sample.iteration, sample.temperature, sample.current_score, sample.best_score
        );
    }
}
