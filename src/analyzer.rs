//! Schedule analysis.
//!
//! Computes reporting metrics from a placed schedule. Read-only: the
//! pipeline attaches the result to the schedule afterwards. Assumes a
//! structurally resolved schedule; fixtures without a date are skipped
//! by the per-team views.
//!
//! # Metric groups
//!
//! | Group | Contents |
//! |-------|----------|
//! | general | season totals and day-of-week histogram |
//! | team_specific | per-team home/away, weekday/weekend, opponent counts |
//! | travel | per-team longest away run and back-to-back count |
//! | balance | per-team home/away differential and weekend fraction |
//! | television | premium-window, weekday/weekend, and primetime counts |
//! | team_schedules | per-team chronological fixture lists |
//!
//! # Reference
//! Kendall, Knust, Ribeiro & Urrutia (2010), "Scheduling in sports:
//! An annotated bibliography", Computers & Operations Research 37(1)

use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Matchup, Schedule};

/// Consecutive games this close (in days) count as back-to-back.
const BACK_TO_BACK_MAX_DELTA_DAYS: i64 = 1;

/// Season-wide totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralMetrics {
    /// Placed fixtures across all weeks.
    pub total_games: usize,
    /// Number of season weeks.
    pub weeks: usize,
    /// Fixtures left unscheduled.
    pub unscheduled: usize,
    /// Placed fixtures per day of week, keyed "Mon" through "Sun".
    pub games_by_weekday: HashMap<String, usize>,
}

/// Per-team participation counts and derived ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMetrics {
    /// Placed fixtures for this team.
    pub games: usize,
    /// Fixtures hosted.
    pub home_games: usize,
    /// Fixtures played away.
    pub away_games: usize,
    /// Fixtures on Monday through Friday.
    pub weekday_games: usize,
    /// Fixtures on Saturday or Sunday.
    pub weekend_games: usize,
    /// Games played against each opponent.
    pub opponents: HashMap<String, usize>,
    /// Hosted share of all games (0.0 when the team never plays).
    pub home_ratio: f64,
    /// Weekend share of all games.
    pub weekend_ratio: f64,
}

/// Per-team travel burden indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelMetrics {
    /// Longest run of consecutive away fixtures.
    pub longest_away_run: usize,
    /// Consecutive fixtures at most one day apart.
    pub back_to_backs: usize,
}

/// Per-team balance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceMetrics {
    /// Home games minus away games (signed).
    pub home_away_differential: i64,
    /// Weekend share of all games.
    pub weekend_fraction: f64,
}

/// Broadcast-window indicators over the whole schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelevisionMetrics {
    /// Fixtures in a premium window.
    pub premium_games: usize,
    /// Premium share of placed fixtures, in percent.
    pub premium_percent: f64,
    /// Fixtures on Monday through Friday.
    pub weekday_games: usize,
    /// Fixtures on Saturday or Sunday.
    pub weekend_games: usize,
    /// Fixtures kicking off between 19:00 and 22:00, any day.
    pub primetime_games: usize,
}

/// Full analysis output attached to a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Season totals.
    pub general: GeneralMetrics,
    /// Per-team counts, keyed by team ID.
    pub team_specific: HashMap<String, TeamMetrics>,
    /// Per-team travel indicators, keyed by team ID.
    pub travel: HashMap<String, TravelMetrics>,
    /// Per-team balance indicators, keyed by team ID.
    pub balance: HashMap<String, BalanceMetrics>,
    /// Broadcast-window indicators.
    pub television: TelevisionMetrics,
    /// Per-team chronological sub-schedules, keyed by team ID.
    pub team_schedules: HashMap<String, Vec<Matchup>>,
}

impl ScheduleMetrics {
    /// Computes all metric groups from a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let mut team_specific = HashMap::new();
        let mut travel = HashMap::new();
        let mut balance = HashMap::new();
        let mut team_schedules = HashMap::new();

        for team in schedule.team_ids() {
            let fixtures: Vec<Matchup> = schedule
                .matchups_for_team(team)
                .into_iter()
                .cloned()
                .collect();
            team_specific.insert(team.to_string(), team_metrics(team, &fixtures));
            travel.insert(
                team.to_string(),
                TravelMetrics {
                    longest_away_run: schedule.longest_away_run(team),
                    back_to_backs: back_to_backs(&fixtures),
                },
            );
            balance.insert(team.to_string(), balance_metrics(team, &fixtures));
            team_schedules.insert(team.to_string(), fixtures);
        }

        Self {
            general: general_metrics(schedule),
            team_specific,
            travel,
            balance,
            television: television_metrics(schedule),
            team_schedules,
        }
    }
}

fn general_metrics(schedule: &Schedule) -> GeneralMetrics {
    let mut games_by_weekday: HashMap<String, usize> = HashMap::new();
    for m in schedule.matchups() {
        if let Some(date) = m.date {
            *games_by_weekday
                .entry(date.weekday().to_string())
                .or_insert(0) += 1;
        }
    }
    GeneralMetrics {
        total_games: schedule.scheduled_count(),
        weeks: schedule.weeks.len(),
        unscheduled: schedule.unscheduled.len(),
        games_by_weekday,
    }
}

fn team_metrics(team: &str, fixtures: &[Matchup]) -> TeamMetrics {
    let games = fixtures.len();
    let home_games = fixtures.iter().filter(|m| m.home_team == team).count();
    let weekend_games = fixtures.iter().filter(|m| m.is_weekend()).count();
    let mut opponents: HashMap<String, usize> = HashMap::new();
    for m in fixtures {
        if let Some(opponent) = m.opponent_of(team) {
            *opponents.entry(opponent.to_string()).or_insert(0) += 1;
        }
    }
    TeamMetrics {
        games,
        home_games,
        away_games: games - home_games,
        weekday_games: games - weekend_games,
        weekend_games,
        opponents,
        home_ratio: ratio(home_games, games),
        weekend_ratio: ratio(weekend_games, games),
    }
}

fn balance_metrics(team: &str, fixtures: &[Matchup]) -> BalanceMetrics {
    let home = fixtures.iter().filter(|m| m.home_team == team).count() as i64;
    let away = fixtures.len() as i64 - home;
    let weekend = fixtures.iter().filter(|m| m.is_weekend()).count();
    BalanceMetrics {
        home_away_differential: home - away,
        weekend_fraction: ratio(weekend, fixtures.len()),
    }
}

fn television_metrics(schedule: &Schedule) -> TelevisionMetrics {
    let total = schedule.scheduled_count();
    let premium_games = schedule
        .matchups()
        .filter(|m| m.is_premium_window())
        .count();
    let weekend_games = schedule.matchups().filter(|m| m.is_weekend()).count();
    let primetime_games = schedule
        .matchups()
        .filter(|m| matches!(m.kickoff_hour, Some(h) if (19..22).contains(&h)))
        .count();
    TelevisionMetrics {
        premium_games,
        premium_percent: 100.0 * ratio(premium_games, total),
        weekday_games: total - weekend_games,
        weekend_games,
        primetime_games,
    }
}

fn back_to_backs(fixtures: &[Matchup]) -> usize {
    fixtures
        .windows(2)
        .filter(|pair| match (pair[0].date, pair[1].date) {
            (Some(first), Some(second)) => {
                (second - first).num_days() <= BACK_TO_BACK_MAX_DELTA_DAYS
            }
            _ => false,
        })
        .count()
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
