//! The four-component schedule objective.
//!
//! Each component is normalized to `[0, 100]` on its own, then the
//! components are combined as a weighted sum under the configured
//! [`OptimizationFactors`]. Competitive balance deliberately ignores
//! team strength; it only rewards protected rivalries that made the
//! calendar. This is a documented limitation of the scoring model.
//!
//! # Reference
//! Easton, Nemhauser & Trick (2001), "The Travelling Tournament
//! Problem: Description and Benchmarks"

use std::collections::HashMap;

use crate::models::{Coordinates, OptimizationFactors, Schedule, Team};

/// Longest away run tolerated before the wellbeing penalty starts.
const AWAY_RUN_GRACE: usize = 3;

/// Wellbeing penalty per away game beyond the grace run.
const AWAY_RUN_PENALTY: f64 = 20.0;

/// Travel score when no team has coordinates configured.
const TRAVEL_SCORE_UNKNOWN: f64 = 50.0;

/// Scores a schedule for the annealing loop.
#[derive(Debug, Clone)]
pub struct Objective {
    factors: OptimizationFactors,
    coordinates: HashMap<String, Coordinates>,
    rivalries: Vec<(String, String)>,
}

impl Objective {
    /// Creates an objective over the given teams and rivalries.
    ///
    /// Teams without coordinates are ignored by travel scoring.
    pub fn new(
        factors: OptimizationFactors,
        teams: &[Team],
        rivalries: Vec<(String, String)>,
    ) -> Self {
        let coordinates = teams
            .iter()
            .filter_map(|t| t.coordinates.map(|c| (t.id.clone(), c)))
            .collect();
        Self {
            factors,
            coordinates,
            rivalries,
        }
    }

    /// Weighted sum of the four component scores.
    pub fn score(&self, schedule: &Schedule) -> f64 {
        self.factors.travel_efficiency * self.travel_efficiency(schedule)
            + self.factors.competitive_balance * self.competitive_balance(schedule)
            + self.factors.tv_revenue * self.tv_revenue(schedule)
            + self.factors.student_wellbeing * self.student_wellbeing(schedule)
    }

    /// Travel score from each team's road-trip distance.
    ///
    /// Builds every coordinated team's chronological trip from its home
    /// base: an away fixture adds the leg to the host's venue, a home
    /// fixture returns the team to base, and the season ends with a
    /// final return leg. Scores `max(0, 100 - avgMiles/100)`, or a
    /// constant 50 when no coordinates are configured at all.
    pub fn travel_efficiency(&self, schedule: &Schedule) -> f64 {
        if self.coordinates.is_empty() {
            return TRAVEL_SCORE_UNKNOWN;
        }
        let total: f64 = self
            .coordinates
            .iter()
            .map(|(team, base)| self.road_miles(schedule, team, base))
            .sum();
        let average = total / self.coordinates.len() as f64;
        (100.0 - average / 100.0).max(0.0)
    }

    fn road_miles(&self, schedule: &Schedule, team: &str, base: &Coordinates) -> f64 {
        let mut miles = 0.0;
        let mut position = *base;
        for fixture in schedule.matchups_for_team(team) {
            if fixture.is_away_for(team) {
                // Legs to hosts without coordinates cannot be measured.
                if let Some(venue) = self.coordinates.get(&fixture.home_team) {
                    miles += position.distance_miles(venue);
                    position = *venue;
                }
            } else {
                miles += position.distance_miles(base);
                position = *base;
            }
        }
        miles + position.distance_miles(base)
    }

    /// Percentage of protected rivalries present in the calendar.
    ///
    /// 100 when no rivalries are configured.
    pub fn competitive_balance(&self, schedule: &Schedule) -> f64 {
        if self.rivalries.is_empty() {
            return 100.0;
        }
        let met = self
            .rivalries
            .iter()
            .filter(|(a, b)| schedule.matchups().any(|m| m.involves(a) && m.involves(b)))
            .count();
        100.0 * met as f64 / self.rivalries.len() as f64
    }

    /// Percentage of placed fixtures sitting in a premium TV window.
    pub fn tv_revenue(&self, schedule: &Schedule) -> f64 {
        let total = schedule.scheduled_count();
        if total == 0 {
            return 0.0;
        }
        let premium = schedule
            .matchups()
            .filter(|m| m.is_premium_window())
            .count();
        100.0 * premium as f64 / total as f64
    }

    /// Average per-team wellbeing score.
    ///
    /// Per team, the mean of: weekend share of away fixtures, share of
    /// inter-game gaps of at least two days, and a penalty curve on the
    /// longest consecutive-away run.
    pub fn student_wellbeing(&self, schedule: &Schedule) -> f64 {
        let teams = schedule.team_ids();
        if teams.is_empty() {
            return 100.0;
        }
        let total: f64 = teams
            .iter()
            .map(|team| self.team_wellbeing(schedule, team))
            .sum();
        total / teams.len() as f64
    }

    fn team_wellbeing(&self, schedule: &Schedule, team: &str) -> f64 {
        let fixtures = schedule.matchups_for_team(team);

        let away_total = fixtures.iter().filter(|m| m.is_away_for(team)).count();
        let weekend_share = if away_total == 0 {
            100.0
        } else {
            let weekend = fixtures
                .iter()
                .filter(|m| m.is_away_for(team) && m.is_weekend())
                .count();
            100.0 * weekend as f64 / away_total as f64
        };

        let rest_share = if fixtures.len() < 2 {
            100.0
        } else {
            let mut rested = 0usize;
            let mut gaps = 0usize;
            for pair in fixtures.windows(2) {
                if let (Some(first), Some(second)) = (pair[0].date, pair[1].date) {
                    gaps += 1;
                    if (second - first).num_days() >= 2 {
                        rested += 1;
                    }
                }
            }
            if gaps == 0 {
                100.0
            } else {
                100.0 * rested as f64 / gaps as f64
            }
        };

        let run = schedule.longest_away_run(team);
        let run_score = if run <= AWAY_RUN_GRACE {
            100.0
        } else {
            (100.0 - AWAY_RUN_PENALTY * (run - AWAY_RUN_GRACE) as f64).max(0.0)
        };

        (weekend_share + rest_share + run_score) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompetitionFormat, Matchup, MatchupKind, Sport, Week};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule_with(fixtures: &[(&str, &str, NaiveDate, u32)]) -> Schedule {
        let mut schedule = Schedule::new(
            Sport::Basketball,
            CompetitionFormat::SingleRoundRobin,
            date(2026, 11, 2),
            date(2026, 11, 15),
        );
        schedule.weeks = vec![
            Week::new(0, date(2026, 11, 2), date(2026, 11, 8)),
            Week::new(1, date(2026, 11, 9), date(2026, 11, 15)),
        ];
        for (home, away, d, hour) in fixtures {
            let mut m = Matchup::new(*home, *away, MatchupKind::Regular);
            let week = schedule.week_containing(*d).unwrap();
            m.week = Some(week);
            m.date = Some(*d);
            m.kickoff_hour = Some(*hour);
            schedule.weeks[week].matchups.push(m);
        }
        schedule
    }

    fn teams_at(points: &[(&str, f64, f64)]) -> Vec<Team> {
        points
            .iter()
            .map(|(id, lat, lng)| Team::new(*id).with_coordinates(*lat, *lng))
            .collect()
    }

    #[test]
    fn test_travel_is_fifty_without_coordinates() {
        let schedule = schedule_with(&[("a", "b", date(2026, 11, 3), 19)]);
        let objective = Objective::new(
            OptimizationFactors::default(),
            &[Team::new("a"), Team::new("b")],
            Vec::new(),
        );
        assert!((objective.travel_efficiency(&schedule) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_travel_is_perfect_for_identical_coordinates() {
        let schedule = schedule_with(&[
            ("a", "b", date(2026, 11, 3), 19),
            ("b", "a", date(2026, 11, 6), 19),
            ("a", "b", date(2026, 11, 11), 19),
        ]);
        let teams = teams_at(&[("a", 40.0, -88.0), ("b", 40.0, -88.0)]);
        let objective = Objective::new(OptimizationFactors::default(), &teams, Vec::new());
        assert!((objective.travel_efficiency(&schedule) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_travel_penalizes_distance() {
        // b travels one degree of latitude to a and back: 138 miles.
        let schedule = schedule_with(&[("a", "b", date(2026, 11, 3), 19)]);
        let teams = teams_at(&[("a", 41.0, -88.0), ("b", 40.0, -88.0)]);
        let objective = Objective::new(OptimizationFactors::default(), &teams, Vec::new());
        // Average over both teams: (0 + 138) / 2 = 69 miles.
        let expected = 100.0 - 69.0 / 100.0;
        assert!((objective.travel_efficiency(&schedule) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_competitive_balance_counts_rivalries() {
        let schedule = schedule_with(&[("a", "b", date(2026, 11, 3), 19)]);
        let teams = teams_at(&[]);

        let objective = Objective::new(OptimizationFactors::default(), &teams, Vec::new());
        assert!((objective.competitive_balance(&schedule) - 100.0).abs() < 1e-9);

        let rivalries = vec![
            ("a".to_string(), "b".to_string()),
            ("a".to_string(), "c".to_string()),
        ];
        let objective = Objective::new(OptimizationFactors::default(), &teams, rivalries);
        assert!((objective.competitive_balance(&schedule) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_tv_revenue_share() {
        // Tuesday 19:00 is premium, Tuesday 15:00 is not.
        let schedule = schedule_with(&[
            ("a", "b", date(2026, 11, 3), 19),
            ("c", "d", date(2026, 11, 3), 15),
        ]);
        let objective = Objective::new(OptimizationFactors::default(), &[], Vec::new());
        assert!((objective.tv_revenue(&schedule) - 50.0).abs() < 1e-9);

        let empty = schedule_with(&[]);
        assert!((objective.tv_revenue(&empty) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_wellbeing_penalizes_long_away_runs() {
        // b is away five times in a row: run score 100 - 20*2 = 60.
        let schedule = schedule_with(&[
            ("a", "b", date(2026, 11, 2), 19),
            ("c", "b", date(2026, 11, 4), 19),
            ("d", "b", date(2026, 11, 6), 19),
            ("a", "b", date(2026, 11, 10), 19),
            ("c", "b", date(2026, 11, 12), 19),
        ]);
        let objective = Objective::new(OptimizationFactors::default(), &[], Vec::new());

        // All gaps are two days, no weekend away games.
        // b: weekend 0, rest 100, run 60 -> 160/3.
        let expected_b = (0.0 + 100.0 + 60.0) / 3.0;
        assert!((objective.team_wellbeing(&schedule, "b") - expected_b).abs() < 1e-9);
    }

    #[test]
    fn test_wellbeing_of_empty_schedule_is_neutral() {
        let schedule = schedule_with(&[]);
        let objective = Objective::new(OptimizationFactors::default(), &[], Vec::new());
        assert!((objective.student_wellbeing(&schedule) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_respects_weights() {
        let schedule = schedule_with(&[("a", "b", date(2026, 11, 3), 19)]);
        let zero = OptimizationFactors {
            travel_efficiency: 0.0,
            competitive_balance: 0.0,
            tv_revenue: 0.0,
            student_wellbeing: 0.0,
        };
        let objective = Objective::new(zero, &[], Vec::new());
        assert!((objective.score(&schedule)).abs() < 1e-9);

        let tv_only = OptimizationFactors {
            travel_efficiency: 0.0,
            competitive_balance: 0.0,
            tv_revenue: 2.0,
            student_wellbeing: 0.0,
        };
        let objective = Objective::new(tv_only, &[], Vec::new());
        assert!((objective.score(&schedule) - 200.0).abs() < 1e-9);
    }
}
