//! Matchup generation.
//!
//! Produces unordered [`Pairing`]s for the configured competition
//! format. No roles, weeks, or dates are decided here — only which
//! teams meet, and how often.
//!
//! # Reference
//! Rasmussen & Trick (2008), "Round robin scheduling — a survey",
//! European Journal of Operational Research 188(3)

mod divisional;
mod round_robin;
mod series;

pub use divisional::divisional;
pub use round_robin::{double_round_robin, dual_meet, partial_round_robin, single_round_robin};
pub use series::series_round_robin;

use crate::models::{CompetitionFormat, Pairing, ScheduleConfig, Team};

/// Generates fixtures for a competition format.
#[derive(Debug, Clone)]
pub struct MatchupGenerator {
    format: CompetitionFormat,
    games_per_team: u32,
    series_length: u32,
}

impl MatchupGenerator {
    /// Creates a generator for the given format.
    pub fn new(format: CompetitionFormat) -> Self {
        Self {
            format,
            games_per_team: 0,
            series_length: 3,
        }
    }

    /// Creates a generator from a run configuration.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self {
            format: config.format,
            games_per_team: config.games_per_team,
            series_length: config.series_length,
        }
    }

    /// Sets the per-team target for the partial format.
    pub fn with_games_per_team(mut self, games: u32) -> Self {
        self.games_per_team = games;
        self
    }

    /// Sets the series length for the series format.
    pub fn with_series_length(mut self, length: u32) -> Self {
        self.series_length = length;
        self
    }

    /// Generates the fixture list.
    ///
    /// `affiliates` is consulted only by the dual-meet format, which
    /// pools them with the conference teams.
    pub fn generate(&self, teams: &[Team], affiliates: &[Team]) -> Vec<Pairing> {
        match self.format {
            CompetitionFormat::SingleRoundRobin => single_round_robin(teams),
            CompetitionFormat::DoubleRoundRobin => double_round_robin(teams),
            CompetitionFormat::PartialRoundRobin => {
                partial_round_robin(teams, self.games_per_team)
            }
            CompetitionFormat::Divisional => divisional(teams),
            CompetitionFormat::ThreeGameSeries => series_round_robin(teams, self.series_length),
            CompetitionFormat::DualMeet => dual_meet(teams, affiliates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(n: usize) -> Vec<Team> {
        (0..n).map(|i| Team::new(format!("t{i}"))).collect()
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let pool = teams(4);

        let single = MatchupGenerator::new(CompetitionFormat::SingleRoundRobin)
            .generate(&pool, &[]);
        assert_eq!(single.len(), 6);

        let double = MatchupGenerator::new(CompetitionFormat::DoubleRoundRobin)
            .generate(&pool, &[]);
        assert_eq!(double.len(), 12);

        let series = MatchupGenerator::new(CompetitionFormat::ThreeGameSeries)
            .with_series_length(3)
            .generate(&pool, &[]);
        assert_eq!(series.len(), 18);
    }

    #[test]
    fn test_generator_from_config() {
        use crate::models::Sport;
        use chrono::NaiveDate;

        let config = ScheduleConfig::new(
            Sport::Basketball,
            CompetitionFormat::PartialRoundRobin,
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            NaiveDate::from_ymd_opt(2027, 2, 28).unwrap(),
        )
        .with_teams(teams(6))
        .with_games_per_team(2);

        let pairings = MatchupGenerator::from_config(&config)
            .generate(&config.teams, &config.affiliates);
        assert!(!pairings.is_empty());
    }
}
