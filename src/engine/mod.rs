//! Constraint engine: filtering, feasibility checks, and relaxation.
//!
//! # Filter pass
//!
//! Four filters run in fixed order, each scanning every week and
//! displacing violating fixtures into the schedule's unscheduled list:
//!
//! 1. institutional: per-team weekday and date-range bans
//! 2. venue: venue unavailability, resolved via the home team's venue
//! 3. academic: per-team exam-period blackouts
//! 4. commitments: fixtures agreed outside this run displace clashing
//!    generated fixtures and are injected into the calendar
//!
//! Filters never raise errors; an unsatisfiable rule degrades fixtures
//! into the unscheduled list. Each filter is idempotent over its own
//! output. Injected commitment fixtures are exempt from the other
//! filters: they represent agreements the run cannot reschedule.
//!
//! # Submodules
//!
//! - `feasibility`: read-only structural checks
//! - `relaxation`: rescue pass for infeasible schedules
//!
//! # Reference
//! Nemhauser & Trick (1998), "Scheduling a Major College Basketball
//! Conference", Operations Research 46(1)

mod feasibility;
mod relaxation;

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::models::{Constraint, Matchup, MatchupKind, Schedule, Team, Violation};

/// Applies scheduling constraints to an assembled schedule.
///
/// Construction captures a venue lookup so venue conflicts can be
/// resolved through each home team's configured venue. The engine
/// itself never fails; see the module docs for the degradation model.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use season_schedule::engine::ConstraintEngine;
/// use season_schedule::models::{
///     CompetitionFormat, Constraint, Matchup, MatchupKind, Schedule, Sport, Team, Week,
/// };
///
/// let teams = vec![Team::new("a"), Team::new("b")];
/// let engine = ConstraintEngine::new(
///     vec![Constraint::no_play_weekday("a", Weekday::Sun)],
///     &teams,
/// );
///
/// let mut schedule = Schedule::new(
///     Sport::Football,
///     CompetitionFormat::SingleRoundRobin,
///     NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 9, 13).unwrap(),
/// );
/// let mut week = Week::new(0, schedule.season_start, schedule.season_end);
/// let mut fixture = Matchup::new("a", "b", MatchupKind::Regular);
/// fixture.week = Some(0);
/// fixture.date = NaiveDate::from_ymd_opt(2026, 9, 13); // Sunday
/// week.matchups.push(fixture);
/// schedule.weeks.push(week);
///
/// engine.apply(&mut schedule);
/// assert_eq!(schedule.unscheduled.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    constraints: Vec<Constraint>,
    venues: HashMap<String, String>,
}

impl ConstraintEngine {
    /// Creates an engine over the given constraints.
    ///
    /// `teams` supplies the venue lookup; include affiliates if they
    /// can host fixtures.
    pub fn new(constraints: Vec<Constraint>, teams: &[Team]) -> Self {
        let venues = teams
            .iter()
            .map(|t| (t.id.clone(), t.venue.clone()))
            .collect();
        Self {
            constraints,
            venues,
        }
    }

    /// The constraints this engine enforces.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Runs all four filters in their fixed order.
    pub fn apply(&self, schedule: &mut Schedule) {
        let institutional = self.filter_institutional(schedule);
        let venue = self.filter_venues(schedule);
        let academic = self.filter_academic(schedule);
        let commitments = self.filter_commitments(schedule);
        debug!(
            "constraint filters displaced {institutional} institutional, {venue} venue, \
             {academic} academic, {commitments} commitment-clash fixtures"
        );
    }

    /// Displaces fixtures hitting a weekday or date-range ban.
    ///
    /// Returns the number of fixtures displaced.
    pub fn filter_institutional(&self, schedule: &mut Schedule) -> usize {
        displace(schedule, |m| {
            if m.is_existing_commitment {
                return false;
            }
            let date = match m.date {
                Some(d) => d,
                None => return false,
            };
            self.constraints.iter().any(|c| match c {
                Constraint::NoPlayDayOfWeek { team_id, weekday } => {
                    m.involves(team_id) && date.weekday() == *weekday
                }
                Constraint::NoPlayDateRange {
                    team_id,
                    start,
                    end,
                } => m.involves(team_id) && date >= *start && date <= *end,
                _ => false,
            })
        })
    }

    /// Displaces fixtures whose home venue is unavailable that day.
    ///
    /// Returns the number of fixtures displaced.
    pub fn filter_venues(&self, schedule: &mut Schedule) -> usize {
        displace(schedule, |m| {
            if m.is_existing_commitment {
                return false;
            }
            let date = match m.date {
                Some(d) => d,
                None => return false,
            };
            let home_venue = match self.venues.get(&m.home_team) {
                Some(v) => v,
                None => return false,
            };
            self.constraints.iter().any(|c| match c {
                Constraint::VenueConflict { venue, start, end } => {
                    venue == home_venue && date >= *start && date <= *end
                }
                _ => false,
            })
        })
    }

    /// Displaces fixtures falling in a participant's exam blackout.
    ///
    /// Returns the number of fixtures displaced.
    pub fn filter_academic(&self, schedule: &mut Schedule) -> usize {
        displace(schedule, |m| {
            if m.is_existing_commitment {
                return false;
            }
            let date = match m.date {
                Some(d) => d,
                None => return false,
            };
            self.constraints.iter().any(|c| match c {
                Constraint::AcademicBlackout {
                    team_id,
                    start,
                    end,
                } => m.involves(team_id) && date >= *start && date <= *end,
                _ => false,
            })
        })
    }

    /// Enforces existing commitments.
    ///
    /// First displaces generated fixtures sharing a team and calendar
    /// day with a commitment, then injects each commitment into the
    /// week containing its date. Commitments dated outside the season
    /// are dropped. Returns the number of fixtures displaced.
    pub fn filter_commitments(&self, schedule: &mut Schedule) -> usize {
        let commitments: Vec<(&str, &str, NaiveDate)> = self
            .constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::ExistingCommitment {
                    home_team,
                    away_team,
                    date,
                } => Some((home_team.as_str(), away_team.as_str(), *date)),
                _ => None,
            })
            .collect();
        if commitments.is_empty() {
            return 0;
        }

        let displaced = displace(schedule, |m| {
            if m.is_existing_commitment {
                return false;
            }
            let date = match m.date {
                Some(d) => d,
                None => return false,
            };
            commitments
                .iter()
                .any(|(home, away, day)| date == *day && (m.involves(home) || m.involves(away)))
        });

        for (home, away, day) in commitments {
            let already_injected = schedule.matchups().any(|m| {
                m.is_existing_commitment
                    && m.home_team == home
                    && m.away_team == away
                    && m.date == Some(day)
            });
            if already_injected {
                continue;
            }
            let week_index = match schedule.week_containing(day) {
                Some(i) => i,
                None => {
                    debug!("commitment {home} vs {away} on {day} falls outside the season");
                    continue;
                }
            };
            let mut fixture = Matchup::new(home, away, MatchupKind::Regular);
            fixture.week = Some(week_index);
            fixture.date = Some(day);
            fixture.kickoff_hour = Some(schedule.sport.default_kickoff_hour());
            fixture.is_existing_commitment = true;
            schedule.weeks[week_index].matchups.push(fixture);
        }

        displaced
    }

    /// Read-only feasibility check.
    ///
    /// Flags unscheduled fixtures, same-day double-bookings, and
    /// short-rest away pairs. An empty result means the schedule is
    /// feasible and relaxation is not needed.
    pub fn verify_feasibility(&self, schedule: &Schedule) -> Vec<Violation> {
        feasibility::verify(schedule)
    }

    /// Rescues an infeasible schedule by dropping every rule except
    /// existing commitments.
    ///
    /// Unscheduled fixtures are greedily placed into the first
    /// commitment-free day where neither team plays; same-day
    /// double-bookings are spread across their week. Rescued fixtures
    /// are flagged `relaxed_constraint`.
    pub fn relax(&self, schedule: &mut Schedule) {
        let commitment_days: BTreeSet<NaiveDate> = self
            .constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::ExistingCommitment { date, .. } => Some(*date),
                _ => None,
            })
            .collect();
        relaxation::relax(schedule, &commitment_days);
    }

    /// Full validation for external reporting.
    ///
    /// Runs the feasibility checks plus home/away imbalance and any
    /// configured bound constraints (premium windows, imbalance caps,
    /// consecutive-away caps). Never mutates the schedule.
    pub fn validate_schedule(&self, schedule: &Schedule) -> Vec<Violation> {
        feasibility::validate(schedule, &self.constraints)
    }
}

/// Moves fixtures matching the predicate out of their weeks into the
/// unscheduled list, clearing week, date, and kickoff.
fn displace<F>(schedule: &mut Schedule, mut violates: F) -> usize
where
    F: FnMut(&Matchup) -> bool,
{
    let Schedule {
        weeks, unscheduled, ..
    } = schedule;
    let mut displaced = 0;
    for week in weeks {
        let mut kept = Vec::with_capacity(week.matchups.len());
        for mut m in week.matchups.drain(..) {
            if violates(&m) {
                m.week = None;
                m.date = None;
                m.kickoff_hour = None;
                unscheduled.push(m);
                displaced += 1;
            } else {
                kept.push(m);
            }
        }
        week.matchups = kept;
    }
    displaced
}
