//! Season schedule (solution) model.
//!
//! The schedule is the single unit of ownership threaded through the
//! pipeline: generation fills it, the constraint engine prunes it, the
//! optimizer permutes it, and analysis attaches metrics. Fixtures that
//! cannot be placed live in `unscheduled`; the fixture population is
//! conserved — nothing is ever dropped outright.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CompetitionFormat, Matchup, Sport, Week};
use crate::analyzer::ScheduleMetrics;
use crate::optimizer::OptimizationMetrics;

/// A complete season schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Sport being scheduled.
    pub sport: Sport,
    /// First day of the season.
    pub season_start: NaiveDate,
    /// Last day of the season (inclusive).
    pub season_end: NaiveDate,
    /// Pairing format the fixtures were generated under.
    pub format: CompetitionFormat,
    /// Season weeks in order, each owning its placed fixtures.
    pub weeks: Vec<Week>,
    /// Fixtures that could not be placed or were filtered out.
    pub unscheduled: Vec<Matchup>,
    /// Analysis results, attached after the pipeline completes.
    pub metrics: Option<ScheduleMetrics>,
    /// Annealing results, attached after optimization.
    pub optimization: Option<OptimizationMetrics>,
}

impl Schedule {
    /// Creates an empty schedule shell for the given season.
    pub fn new(
        sport: Sport,
        format: CompetitionFormat,
        season_start: NaiveDate,
        season_end: NaiveDate,
    ) -> Self {
        Self {
            sport,
            season_start,
            season_end,
            format,
            weeks: Vec::new(),
            unscheduled: Vec::new(),
            metrics: None,
            optimization: None,
        }
    }

    /// Iterates over every placed fixture, week by week.
    pub fn matchups(&self) -> impl Iterator<Item = &Matchup> {
        self.weeks.iter().flat_map(|w| w.matchups.iter())
    }

    /// Number of placed fixtures.
    pub fn scheduled_count(&self) -> usize {
        self.weeks.iter().map(|w| w.matchups.len()).sum()
    }

    /// Placed plus unscheduled fixtures.
    pub fn total_fixtures(&self) -> usize {
        self.scheduled_count() + self.unscheduled.len()
    }

    /// Index of the week containing the given date, if any.
    pub fn week_containing(&self, date: NaiveDate) -> Option<usize> {
        self.weeks.iter().position(|w| w.contains(date))
    }

    /// The team's placed fixtures in chronological order.
    ///
    /// Fixtures without a date are skipped.
    pub fn matchups_for_team(&self, team_id: &str) -> Vec<&Matchup> {
        let mut fixtures: Vec<&Matchup> = self
            .matchups()
            .filter(|m| m.involves(team_id) && m.date.is_some())
            .collect();
        fixtures.sort_by_key(|m| m.date);
        fixtures
    }

    /// Every team appearing in a placed fixture, in sorted order.
    pub fn team_ids(&self) -> BTreeSet<&str> {
        self.matchups()
            .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()])
            .collect()
    }

    /// Longest run of consecutive away fixtures for the team.
    pub fn longest_away_run(&self, team_id: &str) -> usize {
        let mut longest = 0usize;
        let mut run = 0usize;
        for m in self.matchups_for_team(team_id) {
            if m.is_away_for(team_id) {
                run += 1;
                longest = longest.max(run);
            } else {
                run = 0;
            }
        }
        longest
    }
}

/// A schedule-quality violation found by verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (team, venue, or the schedule itself).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Fixtures remain in the unscheduled list.
    UnscheduledFixtures,
    /// A team has more than one fixture on the same day.
    DoubleBooking,
    /// A team has one rest day or fewer between consecutive away games.
    ShortRest,
    /// A team's home/away split differs by more than the allowed margin.
    HomeAwayImbalance,
    /// A team fell short of its required premium-window count.
    PremiumShortfall,
    /// A team's consecutive-away run exceeds its allowed maximum.
    ExcessiveAwayRun,
    /// Domain-specific violation.
    Custom(String),
}

impl Violation {
    /// Creates an unscheduled-fixtures violation.
    pub fn unscheduled_fixtures(count: usize) -> Self {
        Self {
            violation_type: ViolationType::UnscheduledFixtures,
            entity_id: "schedule".into(),
            message: format!("{count} fixtures could not be placed"),
            severity: 70,
        }
    }

    /// Creates a same-day double-booking violation.
    pub fn double_booking(team_id: impl Into<String>, date: NaiveDate, games: usize) -> Self {
        let entity_id = team_id.into();
        Self {
            message: format!("{entity_id} has {games} fixtures on {date}"),
            violation_type: ViolationType::DoubleBooking,
            entity_id,
            severity: 90,
        }
    }

    /// Creates a short-rest violation between two away dates.
    pub fn short_rest(team_id: impl Into<String>, first: NaiveDate, second: NaiveDate) -> Self {
        let entity_id = team_id.into();
        Self {
            message: format!("{entity_id} plays away on {first} and again on {second}"),
            violation_type: ViolationType::ShortRest,
            entity_id,
            severity: 40,
        }
    }

    /// Creates a home/away imbalance violation.
    pub fn home_away_imbalance(team_id: impl Into<String>, difference: i64) -> Self {
        let entity_id = team_id.into();
        Self {
            message: format!("{entity_id} home/away counts differ by {difference}"),
            violation_type: ViolationType::HomeAwayImbalance,
            entity_id,
            severity: 50,
        }
    }

    /// Creates a premium-window shortfall violation.
    pub fn premium_shortfall(team_id: impl Into<String>, have: usize, want: usize) -> Self {
        let entity_id = team_id.into();
        Self {
            message: format!("{entity_id} has {have} premium-window fixtures, needs {want}"),
            violation_type: ViolationType::PremiumShortfall,
            entity_id,
            severity: 30,
        }
    }

    /// Creates an excessive consecutive-away violation.
    pub fn excessive_away_run(team_id: impl Into<String>, run: usize, max: usize) -> Self {
        let entity_id = team_id.into();
        Self {
            message: format!("{entity_id} has {run} consecutive away fixtures, limit {max}"),
            violation_type: ViolationType::ExcessiveAwayRun,
            entity_id,
            severity: 60,
        }
    }
}
