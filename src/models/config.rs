//! Run configuration: sport, format, season window, and inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Constraint, Team};
use crate::optimizer::AnnealingConfig;

/// Sport being scheduled.
///
/// The sport drives weekly game quotas, eligible playing days, and
/// default kickoff slots during weekly assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Football,
    Basketball,
    Volleyball,
    Baseball,
    Softball,
    /// Any other sport; scheduled with the generic weekly policy.
    Custom(String),
}

impl Sport {
    /// Target fixtures per team per week.
    pub fn target_games_per_week(&self) -> usize {
        match self {
            Sport::Football => 1,
            Sport::Basketball | Sport::Volleyball => 2,
            Sport::Baseball | Sport::Softball => 3,
            Sport::Custom(_) => 2,
        }
    }

    /// Whether the sport's weekly quota is placed as one atomic series.
    pub fn plays_series(&self) -> bool {
        matches!(self, Sport::Baseball | Sport::Softball)
    }

    /// Default kickoff hour stamped onto placed fixtures.
    pub fn default_kickoff_hour(&self) -> u32 {
        match self {
            Sport::Football => 14,
            Sport::Basketball | Sport::Volleyball => 19,
            Sport::Baseball | Sport::Softball => 18,
            Sport::Custom(_) => 19,
        }
    }
}

/// Pairing format for matchup generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionFormat {
    /// Every pair meets exactly once.
    SingleRoundRobin,
    /// Every pair meets exactly twice with reversed roles.
    DoubleRoundRobin,
    /// Each team targets `games_per_team` opponents by modular stepping.
    PartialRoundRobin,
    /// Full round-robin inside each division plus cross-division games.
    Divisional,
    /// Single round-robin expanded into multi-game series.
    ThreeGameSeries,
    /// Conference teams and affiliates pooled into one round-robin.
    DualMeet,
}

impl CompetitionFormat {
    /// Whether the format is a round-robin variant.
    ///
    /// Gates the optimizer's home/away flip move.
    pub fn is_round_robin(&self) -> bool {
        matches!(
            self,
            CompetitionFormat::SingleRoundRobin
                | CompetitionFormat::DoubleRoundRobin
                | CompetitionFormat::PartialRoundRobin
        )
    }
}

/// Weights for the four optimization score components.
///
/// Each component is normalized to `[0, 100]` before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationFactors {
    /// Weight of the travel-efficiency score.
    pub travel_efficiency: f64,
    /// Weight of the competitive-balance score.
    pub competitive_balance: f64,
    /// Weight of the television-revenue score.
    pub tv_revenue: f64,
    /// Weight of the student-wellbeing score.
    pub student_wellbeing: f64,
}

impl Default for OptimizationFactors {
    fn default() -> Self {
        Self {
            travel_efficiency: 1.0,
            competitive_balance: 1.0,
            tv_revenue: 1.0,
            student_wellbeing: 1.0,
        }
    }
}

impl OptimizationFactors {
    /// Whether every weight is finite and non-negative.
    ///
    /// Advisor-supplied factors failing this check are discarded in
    /// favor of the configured defaults.
    pub fn is_valid(&self) -> bool {
        [
            self.travel_efficiency,
            self.competitive_balance,
            self.tv_revenue,
            self.student_wellbeing,
        ]
        .iter()
        .all(|w| w.is_finite() && *w >= 0.0)
    }
}

fn default_series_length() -> u32 {
    3
}

/// Complete input configuration for one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Sport being scheduled.
    pub sport: Sport,
    /// Pairing format.
    pub format: CompetitionFormat,
    /// First day of the season.
    pub season_start: NaiveDate,
    /// Last day of the season (inclusive).
    pub season_end: NaiveDate,
    /// Competing teams.
    pub teams: Vec<Team>,
    /// Per-team fixture target for the partial round-robin format.
    #[serde(default)]
    pub games_per_team: u32,
    /// Games per series for the series format.
    #[serde(default = "default_series_length")]
    pub series_length: u32,
    /// Affiliate teams pooled into dual-meet generation.
    #[serde(default)]
    pub affiliates: Vec<Team>,
    /// Institutional, venue, academic, commitment, and bound constraints.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Protected rivalry pairs scored by competitive balance.
    #[serde(default)]
    pub rivalries: Vec<(String, String)>,
    /// Week indices left empty by weekly assignment.
    #[serde(default)]
    pub break_weeks: Vec<usize>,
    /// Objective weights.
    #[serde(default)]
    pub factors: OptimizationFactors,
    /// Annealing parameters.
    #[serde(default)]
    pub annealing: AnnealingConfig,
    /// Seed for role coin-flips and annealing moves. `None` = entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ScheduleConfig {
    /// Creates a configuration with no teams or constraints.
    pub fn new(
        sport: Sport,
        format: CompetitionFormat,
        season_start: NaiveDate,
        season_end: NaiveDate,
    ) -> Self {
        Self {
            sport,
            format,
            season_start,
            season_end,
            teams: Vec::new(),
            games_per_team: 0,
            series_length: default_series_length(),
            affiliates: Vec::new(),
            constraints: Vec::new(),
            rivalries: Vec::new(),
            break_weeks: Vec::new(),
            factors: OptimizationFactors::default(),
            annealing: AnnealingConfig::default(),
            seed: None,
        }
    }

    /// Adds a team.
    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    /// Replaces the team list.
    pub fn with_teams(mut self, teams: Vec<Team>) -> Self {
        self.teams = teams;
        self
    }

    /// Sets the per-team fixture target for partial round-robin.
    pub fn with_games_per_team(mut self, games: u32) -> Self {
        self.games_per_team = games;
        self
    }

    /// Sets the series length.
    pub fn with_series_length(mut self, length: u32) -> Self {
        self.series_length = length;
        self
    }

    /// Replaces the affiliate pool.
    pub fn with_affiliates(mut self, affiliates: Vec<Team>) -> Self {
        self.affiliates = affiliates;
        self
    }

    /// Adds a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a protected rivalry pair.
    pub fn with_rivalry(mut self, team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        self.rivalries.push((team_a.into(), team_b.into()));
        self
    }

    /// Replaces the break-week list.
    pub fn with_break_weeks(mut self, weeks: Vec<usize>) -> Self {
        self.break_weeks = weeks;
        self
    }

    /// Sets the objective weights.
    pub fn with_factors(mut self, factors: OptimizationFactors) -> Self {
        self.factors = factors;
        self
    }

    /// Sets annealing parameters.
    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Looks up a team by ID.
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }
}
