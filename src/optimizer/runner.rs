//! The annealing loop.
//!
//! Strictly sequential: each iteration's acceptance depends on the
//! previously accepted state, so the loop is never parallelized.
//! Callers embedding the optimizer in a long-lived service can pass a
//! cancellation flag, checked at iteration granularity; a cancelled
//! run returns the best schedule found so far.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::neighbor;
use super::{AnnealingConfig, Objective};
use crate::models::Schedule;
use crate::observer::{NullObserver, ProgressObserver};

/// Iterations between trace samples.
const TRACE_INTERVAL: usize = 100;

/// One sampled point of the annealing trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    /// Iteration the sample was taken at.
    pub iteration: usize,
    /// Temperature at that iteration.
    pub temperature: f64,
    /// Score of the currently walked schedule.
    pub current_score: f64,
    /// Score of the best schedule seen so far.
    pub best_score: f64,
}

/// Outcome of one annealing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    /// Score of the input schedule.
    pub initial_score: f64,
    /// Score of the returned schedule.
    pub final_score: f64,
    /// Relative improvement over the initial score, in percent.
    pub improvement_percent: f64,
    /// Iterations actually executed (lower than the budget only when
    /// cancelled).
    pub iterations_run: usize,
    /// Trace sampled every 100 iterations.
    pub trace: Vec<TracePoint>,
}

impl OptimizationMetrics {
    fn new(
        initial_score: f64,
        final_score: f64,
        iterations_run: usize,
        trace: Vec<TracePoint>,
    ) -> Self {
        let improvement_percent = if initial_score.abs() < f64::EPSILON {
            0.0
        } else {
            100.0 * (final_score - initial_score) / initial_score
        };
        Self {
            initial_score,
            final_score,
            improvement_percent,
            iterations_run,
            trace,
        }
    }
}

/// Simulated-annealing optimizer over placed schedules.
#[derive(Debug, Clone)]
pub struct Annealer {
    config: AnnealingConfig,
    objective: Objective,
}

impl Annealer {
    /// Creates an annealer with the given parameters and objective.
    pub fn new(config: AnnealingConfig, objective: Objective) -> Self {
        Self { config, objective }
    }

    /// Runs the annealing loop and returns the best schedule found.
    pub fn optimize<R: Rng>(&self, schedule: Schedule, rng: &mut R) -> (Schedule, OptimizationMetrics) {
        self.optimize_observed(schedule, rng, &mut NullObserver, None)
    }

    /// Runs the annealing loop, reporting trace samples to `observer`
    /// and honoring an optional cancellation flag.
    pub fn optimize_observed<R: Rng>(
        &self,
        schedule: Schedule,
        rng: &mut R,
        observer: &mut dyn ProgressObserver,
        cancel: Option<&AtomicBool>,
    ) -> (Schedule, OptimizationMetrics) {
        let initial_score = self.objective.score(&schedule);
        let mut current = schedule;
        let mut current_score = initial_score;
        let mut best = current.clone();
        let mut best_score = current_score;
        let mut temperature = self.config.initial_temperature;
        let mut trace = Vec::new();
        let mut iterations_run = 0usize;

        for iteration in 0..self.config.iterations {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!("annealing cancelled at iteration {iteration}");
                    break;
                }
            }

            let mut candidate = current.clone();
            let moved = match rng.random_range(0..3) {
                0 => neighbor::swap_dates(&mut candidate, rng),
                1 => neighbor::flip_home_away(&mut candidate, rng),
                _ => neighbor::shift_within_week(&mut candidate, rng),
            };

            if moved {
                let candidate_score = self.objective.score(&candidate);
                let delta = candidate_score - current_score;
                let accept = delta >= 0.0 || rng.random::<f64>() < (delta / temperature).exp();
                if accept {
                    current = candidate;
                    current_score = candidate_score;
                    if current_score > best_score {
                        best = current.clone();
                        best_score = current_score;
                    }
                }
            }

            if iteration % TRACE_INTERVAL == 0 {
                let point = TracePoint {
                    iteration,
                    temperature,
                    current_score,
                    best_score,
                };
                observer.annealing_sample(&point);
                trace.push(point);
            }

            temperature *= self.config.cooling_rate;
            iterations_run += 1;
        }

        debug!(
            "annealing finished: {initial_score:.2} -> {best_score:.2} after {iterations_run} iterations"
        );
        let metrics = OptimizationMetrics::new(initial_score, best_score, iterations_run, trace);
        (best, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::build_weeks;
    use crate::models::{
        CompetitionFormat, Matchup, MatchupKind, OptimizationFactors, Sport, Team,
    };
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_schedule() -> Schedule {
        let mut schedule = Schedule::new(
            Sport::Basketball,
            CompetitionFormat::SingleRoundRobin,
            date(2026, 11, 2),
            date(2026, 11, 22),
        );
        schedule.weeks = build_weeks(schedule.season_start, schedule.season_end);
        let fixtures = [
            ("a", "b", date(2026, 11, 3)),
            ("c", "d", date(2026, 11, 5)),
            ("a", "c", date(2026, 11, 10)),
            ("b", "d", date(2026, 11, 12)),
            ("a", "d", date(2026, 11, 17)),
            ("b", "c", date(2026, 11, 19)),
        ];
        for (home, away, d) in fixtures {
            let week = schedule.week_containing(d).unwrap();
            let mut m = Matchup::new(home, away, MatchupKind::Regular);
            m.week = Some(week);
            m.date = Some(d);
            m.kickoff_hour = Some(15);
            schedule.weeks[week].matchups.push(m);
        }
        schedule
    }

    fn sample_teams() -> Vec<Team> {
        vec![
            Team::new("a").with_coordinates(40.0, -88.0),
            Team::new("b").with_coordinates(40.5, -87.5),
            Team::new("c").with_coordinates(41.0, -88.5),
            Team::new("d").with_coordinates(39.5, -88.2),
        ]
    }

    fn annealer(iterations: usize) -> Annealer {
        let objective = Objective::new(
            OptimizationFactors::default(),
            &sample_teams(),
            vec![("a".to_string(), "b".to_string())],
        );
        Annealer::new(
            AnnealingConfig::default().with_iterations(iterations),
            objective,
        )
    }

    #[test]
    fn test_zero_iterations_returns_input_unchanged() {
        let schedule = sample_schedule();
        let before = serde_json::to_string(&schedule).unwrap();

        let mut rng = SmallRng::seed_from_u64(42);
        let (result, metrics) = annealer(0).optimize(schedule, &mut rng);

        assert_eq!(serde_json::to_string(&result).unwrap(), before);
        assert_eq!(metrics.iterations_run, 0);
        assert!(metrics.trace.is_empty());
        assert!((metrics.final_score - metrics.initial_score).abs() < 1e-12);
        assert!((metrics.improvement_percent).abs() < 1e-12);
    }

    #[test]
    fn test_best_trace_is_monotone() {
        let mut rng = SmallRng::seed_from_u64(42);
        let (_, metrics) = annealer(1000).optimize(sample_schedule(), &mut rng);

        assert_eq!(metrics.trace.len(), 10);
        for pair in metrics.trace.windows(2) {
            assert!(pair[1].best_score >= pair[0].best_score);
        }
    }

    #[test]
    fn test_final_score_never_below_initial() {
        let mut rng = SmallRng::seed_from_u64(7);
        let (_, metrics) = annealer(300).optimize(sample_schedule(), &mut rng);
        assert!(metrics.final_score >= metrics.initial_score);
        assert_eq!(metrics.iterations_run, 300);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let mut rng = SmallRng::seed_from_u64(9);
        let (_, first) = annealer(200).optimize(sample_schedule(), &mut rng);

        let mut rng = SmallRng::seed_from_u64(9);
        let (_, second) = annealer(200).optimize(sample_schedule(), &mut rng);

        assert_eq!(first.final_score, second.final_score);
        assert_eq!(first.trace, second.trace);
    }

    #[test]
    fn test_cancelled_run_stops_immediately() {
        let schedule = sample_schedule();
        let before = serde_json::to_string(&schedule).unwrap();
        let cancel = AtomicBool::new(true);

        let mut rng = SmallRng::seed_from_u64(1);
        let (result, metrics) = annealer(500).optimize_observed(
            schedule,
            &mut rng,
            &mut NullObserver,
            Some(&cancel),
        );

        assert_eq!(metrics.iterations_run, 0);
        assert_eq!(serde_json::to_string(&result).unwrap(), before);
    }

    #[test]
    fn test_trace_reaches_observer() {
        struct Counting(usize);
        impl ProgressObserver for Counting {
            fn annealing_sample(&mut self, _sample: &TracePoint) {
                self.0 += 1;
            }
        }

        let mut observer = Counting(0);
        let mut rng = SmallRng::seed_from_u64(5);
        annealer(250).optimize_observed(sample_schedule(), &mut rng, &mut observer, None);

        // Samples at iterations 0, 100, 200.
        assert_eq!(observer.0, 3);
    }
}
