//! Read-only structural checks over an assembled schedule.
//!
//! Nothing here mutates state: callers get a violation list and decide
//! whether to invoke relaxation or surface the report.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Constraint, Schedule, Violation};

/// Largest date delta between consecutive away fixtures that still
/// counts as short rest (a delta of 2 leaves one rest day).
const SHORT_REST_MAX_DELTA_DAYS: i64 = 2;

/// Widest tolerated gap between a team's home and away game counts.
const MAX_HOME_AWAY_DIFFERENCE: i64 = 2;

/// Feasibility checks that gate constraint relaxation.
///
/// Flags a non-empty unscheduled list, any team playing twice on one
/// calendar day, and away-away sequences with at most one rest day.
pub(super) fn verify(schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !schedule.unscheduled.is_empty() {
        violations.push(Violation::unscheduled_fixtures(schedule.unscheduled.len()));
    }
    violations.extend(double_bookings(schedule));
    violations.extend(short_rests(schedule));
    violations
}

/// Full validation for external reporting: the feasibility checks plus
/// home/away imbalance and configured bound constraints.
pub(super) fn validate(schedule: &Schedule, constraints: &[Constraint]) -> Vec<Violation> {
    let mut violations = verify(schedule);
    violations.extend(imbalances(schedule));
    violations.extend(bound_violations(schedule, constraints));
    violations
}

fn double_bookings(schedule: &Schedule) -> Vec<Violation> {
    let mut per_day: BTreeMap<(&str, NaiveDate), usize> = BTreeMap::new();
    for m in schedule.matchups() {
        let date = match m.date {
            Some(d) => d,
            None => continue,
        };
        *per_day.entry((&m.home_team, date)).or_insert(0) += 1;
        *per_day.entry((&m.away_team, date)).or_insert(0) += 1;
    }
    per_day
        .into_iter()
        .filter(|(_, games)| *games > 1)
        .map(|((team, date), games)| Violation::double_booking(team, date, games))
        .collect()
}

fn short_rests(schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    for team in schedule.team_ids() {
        let fixtures = schedule.matchups_for_team(team);
        for pair in fixtures.windows(2) {
            if !pair[0].is_away_for(team) || !pair[1].is_away_for(team) {
                continue;
            }
            if let (Some(first), Some(second)) = (pair[0].date, pair[1].date) {
                if (second - first).num_days() <= SHORT_REST_MAX_DELTA_DAYS {
                    violations.push(Violation::short_rest(team, first, second));
                }
            }
        }
    }
    violations
}

fn imbalances(schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    for team in schedule.team_ids() {
        let difference = home_away_difference(schedule, team);
        if difference > MAX_HOME_AWAY_DIFFERENCE {
            violations.push(Violation::home_away_imbalance(team, difference));
        }
    }
    violations
}

fn bound_violations(schedule: &Schedule, constraints: &[Constraint]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for constraint in constraints {
        match constraint {
            Constraint::MinPremiumWindows { team_id, count } => {
                let have = schedule
                    .matchups()
                    .filter(|m| m.involves(team_id) && m.is_premium_window())
                    .count();
                if have < *count {
                    violations.push(Violation::premium_shortfall(team_id.clone(), have, *count));
                }
            }
            Constraint::MaxHomeAwayImbalance {
                team_id,
                max_difference,
            } => {
                let difference = home_away_difference(schedule, team_id);
                if difference > i64::from(*max_difference) {
                    violations.push(Violation::home_away_imbalance(team_id.clone(), difference));
                }
            }
            Constraint::MaxConsecutiveAway { team_id, max_run } => {
                let run = schedule.longest_away_run(team_id);
                if run > *max_run as usize {
                    violations.push(Violation::excessive_away_run(
                        team_id.clone(),
                        run,
                        *max_run as usize,
                    ));
                }
            }
            _ => {}
        }
    }
    violations
}

fn home_away_difference(schedule: &Schedule, team_id: &str) -> i64 {
    let mut home = 0i64;
    let mut away = 0i64;
    for m in schedule.matchups() {
        if m.home_team == team_id {
            home += 1;
        } else if m.away_team == team_id {
            away += 1;
        }
    }
    (home - away).abs()
}
