//! End-to-end scheduling pipeline.
//!
//! Runs the full sequence on one configuration: validation, matchup
//! generation, role assignment, weekly placement, constraint
//! filtering, feasibility-gated relaxation, annealing, analysis. The
//! pipeline owns the run's RNG (seeded from the config or OS entropy)
//! and threads one [`Schedule`] through every stage.
//!
//! External collaborators are optional. A weight advisor may replace
//! the configured objective weights and a ranking feed may contribute
//! priority-tier constraints; either failing or absent, the run
//! proceeds on configured defaults and records the outcome per
//! collaborator in the result.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::analyzer::ScheduleMetrics;
use crate::assign::{build_weeks, HomeAwayAssigner, WeeklyAssigner};
use crate::engine::ConstraintEngine;
use crate::error::ScheduleError;
use crate::external::{constraints_from_tiers, CollaboratorReport, PriorityTier, WeightAdvisor};
use crate::generator::MatchupGenerator;
use crate::models::{OptimizationFactors, Schedule, ScheduleConfig, Team};
use crate::observer::{NullObserver, PipelineStage, ProgressObserver};
use crate::optimizer::{Annealer, Objective};
use crate::validation::validate_config;

/// Result of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The optimized schedule with metrics attached.
    pub schedule: Schedule,
    /// One report per collaborator consulted during the run.
    pub collaborators: Vec<CollaboratorReport>,
}

/// The full scheduling pipeline.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use season_schedule::models::{CompetitionFormat, ScheduleConfig, Sport, Team};
/// use season_schedule::pipeline::SchedulePipeline;
///
/// let config = ScheduleConfig::new(
///     Sport::Football,
///     CompetitionFormat::SingleRoundRobin,
///     NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 11, 29).unwrap(),
/// )
/// .with_team(Team::new("tigers"))
/// .with_team(Team::new("bears"))
/// .with_team(Team::new("eagles"))
/// .with_seed(7);
///
/// let outcome = SchedulePipeline::new().run(&config).unwrap();
/// assert_eq!(outcome.schedule.total_fixtures(), 3);
/// assert!(outcome.schedule.metrics.is_some());
/// ```
pub struct SchedulePipeline {
    advisor: Option<Box<dyn WeightAdvisor>>,
    tiers: Vec<PriorityTier>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SchedulePipeline {
    /// Creates a pipeline with no collaborators.
    pub fn new() -> Self {
        Self {
            advisor: None,
            tiers: Vec::new(),
            cancel: None,
        }
    }

    /// Attaches a weight advisor consulted before optimization.
    pub fn with_advisor<A: WeightAdvisor + 'static>(mut self, advisor: A) -> Self {
        self.advisor = Some(Box::new(advisor));
        self
    }

    /// Attaches priority tiers from a program-ranking feed.
    pub fn with_priority_tiers(mut self, tiers: Vec<PriorityTier>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Attaches a cancellation flag checked between annealing
    /// iterations. Setting it ends optimization early; the run still
    /// finishes and returns the best schedule found so far.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Runs the pipeline on the given configuration.
    pub fn run(&self, config: &ScheduleConfig) -> Result<PipelineOutcome, ScheduleError> {
        self.run_with_observer(config, &mut NullObserver)
    }

    /// Runs the pipeline, reporting stage progress to `observer`.
    pub fn run_with_observer(
        &self,
        config: &ScheduleConfig,
        observer: &mut dyn ProgressObserver,
    ) -> Result<PipelineOutcome, ScheduleError> {
        validate_config(config).map_err(ScheduleError::InvalidConfiguration)?;

        let mut collaborators = Vec::new();
        let factors = self.advised_factors(config, &mut collaborators);

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let pairings = MatchupGenerator::from_config(config)
            .generate(&config.teams, &config.affiliates);
        observer.stage_completed(PipelineStage::Generation, pairings.len());

        let matchups = HomeAwayAssigner::new(config.format).assign(pairings, &mut rng);
        observer.stage_completed(PipelineStage::RoleAssignment, matchups.len());

        let mut schedule = Schedule::new(
            config.sport.clone(),
            config.format,
            config.season_start,
            config.season_end,
        );
        schedule.weeks = build_weeks(config.season_start, config.season_end);

        let assigner = WeeklyAssigner::new(config.sport.clone())
            .with_break_weeks(config.break_weeks.clone());
        let leftovers = assigner.assign(matchups, &mut schedule.weeks);
        schedule.unscheduled = leftovers;
        observer.stage_completed(PipelineStage::WeeklyPlacement, schedule.scheduled_count());

        // Affiliates count as real teams from here on: their venues
        // conflict and their constraints bind like anyone else's.
        let mut pool: Vec<Team> = config.teams.clone();
        pool.extend(config.affiliates.iter().cloned());

        let mut constraints = config.constraints.clone();
        if !self.tiers.is_empty() {
            constraints.extend(constraints_from_tiers(&self.tiers));
            collaborators.push(CollaboratorReport::success("ranking-feed"));
        }

        let engine = ConstraintEngine::new(constraints, &pool);
        engine.apply(&mut schedule);
        observer.stage_completed(PipelineStage::ConstraintFiltering, schedule.unscheduled.len());

        let violations = engine.verify_feasibility(&schedule);
        if !violations.is_empty() {
            engine.relax(&mut schedule);
            observer.stage_completed(PipelineStage::Relaxation, schedule.unscheduled.len());
        }

        let objective = Objective::new(factors, &pool, config.rivalries.clone());
        let annealer = Annealer::new(config.annealing, objective);
        let (mut optimized, metrics) =
            annealer.optimize_observed(schedule, &mut rng, observer, self.cancel.as_deref());
        observer.stage_completed(PipelineStage::Optimization, metrics.iterations_run);
        optimized.optimization = Some(metrics);

        let analysis = ScheduleMetrics::calculate(&optimized);
        observer.stage_completed(PipelineStage::Analysis, analysis.general.total_games);
        optimized.metrics = Some(analysis);

        info!(
            "run complete: {} placed, {} unscheduled across {} weeks",
            optimized.scheduled_count(),
            optimized.unscheduled.len(),
            optimized.weeks.len()
        );

        Ok(PipelineOutcome {
            schedule: optimized,
            collaborators,
        })
    }

    /// Objective weights for this run: the advisor's when it returns
    /// valid ones, the configured defaults otherwise.
    fn advised_factors(
        &self,
        config: &ScheduleConfig,
        reports: &mut Vec<CollaboratorReport>,
    ) -> OptimizationFactors {
        let advisor = match &self.advisor {
            Some(advisor) => advisor,
            None => return config.factors,
        };
        match advisor.advise(config) {
            Ok(factors) if factors.is_valid() => {
                reports.push(CollaboratorReport::success("weight-advisor"));
                factors
            }
            Ok(_) => {
                warn!("weight advisor returned invalid weights, using configured defaults");
                reports.push(CollaboratorReport::failure("weight-advisor", "invalid weights"));
                config.factors
            }
            Err(e) => {
                warn!("weight advisor failed: {e}, using configured defaults");
                reports.push(CollaboratorReport::failure("weight-advisor", e.to_string()));
                config.factors
            }
        }
    }
}

impl Default for SchedulePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{CollaboratorError, StaticWeightAdvisor};
    use crate::models::{CompetitionFormat, Constraint, Sport};
    use crate::optimizer::AnnealingConfig;
    use crate::validation::ValidationErrorKind;
    use chrono::{NaiveDate, Weekday};
    use std::sync::atomic::Ordering;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Four football teams, single round robin, three playable weeks.
    fn football_config() -> ScheduleConfig {
        ScheduleConfig::new(
            Sport::Football,
            CompetitionFormat::SingleRoundRobin,
            date(2026, 9, 7),
            date(2026, 9, 27),
        )
        .with_team(Team::new("tigers"))
        .with_team(Team::new("bears"))
        .with_team(Team::new("eagles"))
        .with_team(Team::new("wolves"))
        .with_seed(42)
    }

    #[test]
    fn test_full_run_places_every_fixture() {
        let outcome = SchedulePipeline::new().run(&football_config()).unwrap();
        let schedule = outcome.schedule;

        // Six pairings among four teams, all placed.
        assert_eq!(schedule.total_fixtures(), 6);
        assert_eq!(schedule.scheduled_count(), 6);
        assert!(schedule.unscheduled.is_empty());

        // Four teams support at most two disjoint fixtures per week,
        // and annealing moves never break the quota invariant here
        // because swaps exchange whole fixtures between weeks.
        for week in &schedule.weeks {
            assert!(week.matchups.len() <= 2);
            for m in &week.matchups {
                let d = m.date.unwrap();
                assert!(week.contains(d));
            }
        }

        let metrics = schedule.metrics.unwrap();
        assert_eq!(metrics.general.total_games, 6);
        assert_eq!(metrics.team_schedules.len(), 4);

        let optimization = schedule.optimization.unwrap();
        assert_eq!(optimization.iterations_run, 1000);
        assert!(!optimization.trace.is_empty());
        assert!(outcome.collaborators.is_empty());
    }

    #[test]
    fn test_infeasible_fixture_rescued_by_relaxation() {
        // Two teams, one fixture, one week. Football wants Saturday
        // but the host bans it, so filtering displaces the fixture and
        // relaxation re-places it on the first free day. Annealing is
        // disabled so the rescued date stays put for the assertion.
        let config = ScheduleConfig::new(
            Sport::Football,
            CompetitionFormat::SingleRoundRobin,
            date(2026, 9, 7),
            date(2026, 9, 13),
        )
        .with_team(Team::new("a"))
        .with_team(Team::new("b"))
        .with_constraint(Constraint::no_play_weekday("a", Weekday::Sat))
        .with_annealing(AnnealingConfig::new().with_iterations(0))
        .with_seed(1);

        let outcome = SchedulePipeline::new().run(&config).unwrap();
        let schedule = outcome.schedule;

        assert_eq!(schedule.scheduled_count(), 1);
        let rescued = schedule.matchups().next().unwrap();
        assert!(rescued.relaxed_constraint);
        assert_eq!(rescued.date, Some(date(2026, 9, 7)));
    }

    #[test]
    fn test_advisor_weights_used_when_valid() {
        let mut factors = OptimizationFactors::default();
        factors.travel_efficiency = 2.5;
        let pipeline = SchedulePipeline::new().with_advisor(StaticWeightAdvisor::new(factors));

        let outcome = pipeline.run(&football_config()).unwrap();
        assert_eq!(outcome.collaborators.len(), 1);
        let report = &outcome.collaborators[0];
        assert_eq!(report.collaborator, "weight-advisor");
        assert!(report.success);
    }

    #[test]
    fn test_advisor_failure_falls_back_to_defaults() {
        struct OfflineAdvisor;
        impl WeightAdvisor for OfflineAdvisor {
            fn advise(
                &self,
                _config: &ScheduleConfig,
            ) -> Result<OptimizationFactors, CollaboratorError> {
                Err(CollaboratorError::Unavailable("feed offline".into()))
            }
        }

        let pipeline = SchedulePipeline::new().with_advisor(OfflineAdvisor);
        let outcome = pipeline.run(&football_config()).unwrap();

        // The run completes on configured defaults.
        assert_eq!(outcome.schedule.scheduled_count(), 6);
        let report = &outcome.collaborators[0];
        assert!(!report.success);
        assert_eq!(report.detail.as_deref(), Some("no data available: feed offline"));
    }

    #[test]
    fn test_invalid_advisor_weights_rejected() {
        let mut factors = OptimizationFactors::default();
        factors.tv_revenue = -1.0;
        let pipeline = SchedulePipeline::new().with_advisor(StaticWeightAdvisor::new(factors));

        let outcome = pipeline.run(&football_config()).unwrap();
        let report = &outcome.collaborators[0];
        assert!(!report.success);
        assert_eq!(report.detail.as_deref(), Some("invalid weights"));
    }

    #[test]
    fn test_priority_tiers_reported() {
        let pipeline = SchedulePipeline::new()
            .with_priority_tiers(vec![PriorityTier::new("tigers", 1)]);

        let outcome = pipeline.run(&football_config()).unwrap();
        assert!(outcome
            .collaborators
            .iter()
            .any(|r| r.collaborator == "ranking-feed" && r.success));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = ScheduleConfig::new(
            Sport::Football,
            CompetitionFormat::SingleRoundRobin,
            date(2026, 9, 7),
            date(2026, 9, 27),
        )
        .with_team(Team::new("lonely"));

        let err = SchedulePipeline::new().run(&config).unwrap_err();
        assert!(err
            .issues()
            .iter()
            .any(|e| e.kind == ValidationErrorKind::TooFewTeams));
    }

    #[test]
    fn test_cancellation_skips_optimization_only() {
        let flag = Arc::new(AtomicBool::new(false));
        flag.store(true, Ordering::Relaxed);

        let pipeline = SchedulePipeline::new().with_cancel_flag(Arc::clone(&flag));
        let outcome = pipeline.run(&football_config()).unwrap();
        let schedule = outcome.schedule;

        // Everything before and after annealing still ran.
        assert_eq!(schedule.scheduled_count(), 6);
        assert!(schedule.metrics.is_some());
        assert_eq!(schedule.optimization.unwrap().iterations_run, 0);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let first = SchedulePipeline::new().run(&football_config()).unwrap();
        let second = SchedulePipeline::new().run(&football_config()).unwrap();

        let triples = |s: &Schedule| -> Vec<(String, String, Option<NaiveDate>)> {
            let mut v: Vec<_> = s
                .matchups()
                .map(|m| (m.home_team.clone(), m.away_team.clone(), m.date))
                .collect();
            v.sort();
            v
        };
        assert_eq!(triples(&first.schedule), triples(&second.schedule));

        let score = |s: &Schedule| s.optimization.as_ref().map(|o| o.final_score);
        assert_eq!(score(&first.schedule), score(&second.schedule));
    }

    #[test]
    fn test_observer_sees_stages_in_order() {
        #[derive(Default)]
        struct Recorder {
            stages: Vec<PipelineStage>,
            samples: usize,
        }
        impl ProgressObserver for Recorder {
            fn stage_completed(&mut self, stage: PipelineStage, _count: usize) {
                self.stages.push(stage);
            }
            fn annealing_sample(&mut self, _sample: &crate::optimizer::TracePoint) {
                self.samples += 1;
            }
        }

        let mut recorder = Recorder::default();
        SchedulePipeline::new()
            .run_with_observer(&football_config(), &mut recorder)
            .unwrap();

        // A feasible run never reports the relaxation stage.
        assert_eq!(
            recorder.stages,
            vec![
                PipelineStage::Generation,
                PipelineStage::RoleAssignment,
                PipelineStage::WeeklyPlacement,
                PipelineStage::ConstraintFiltering,
                PipelineStage::Optimization,
                PipelineStage::Analysis,
            ]
        );
        // 1000 iterations sample at 0, 100, ..., 900.
        assert_eq!(recorder.samples, 10);
    }
}
