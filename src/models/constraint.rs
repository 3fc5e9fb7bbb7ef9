//! Scheduling constraints.
//!
//! Constraints arrive as read-only input records. The filter variants
//! (day-of-week and date-range bans, venue conflicts, academic
//! blackouts, existing commitments) are enforced by the constraint
//! engine's filter pass; the bound variants (premium windows,
//! home/away imbalance, consecutive-away runs) are checked only by
//! schedule validation. Priority-tier feeds emit bound variants as
//! ordinary records — there is no special-cased subtype.
//!
//! # Reference
//! Nemhauser & Trick (1998), "Scheduling a Major College Basketball
//! Conference", Operations Research 46(1)

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A scheduling constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// The team may not play on the given weekday.
    NoPlayDayOfWeek { team_id: String, weekday: Weekday },

    /// The team may not play within `[start, end]`.
    NoPlayDateRange {
        team_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// The venue is unavailable within `[start, end]`.
    ///
    /// Matched against the home team's configured venue.
    VenueConflict {
        venue: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Exam-period blackout: the team may not play within `[start, end]`.
    AcademicBlackout {
        team_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// A fixture already agreed outside this run. Generated fixtures
    /// colliding with it are displaced, and the commitment itself is
    /// injected into the schedule.
    ExistingCommitment {
        home_team: String,
        away_team: String,
        date: NaiveDate,
    },

    /// The team must receive at least `count` premium-window fixtures.
    MinPremiumWindows { team_id: String, count: usize },

    /// The team's home/away counts may differ by at most `max_difference`.
    MaxHomeAwayImbalance { team_id: String, max_difference: u32 },

    /// The team may play at most `max_run` consecutive away fixtures.
    MaxConsecutiveAway { team_id: String, max_run: u32 },
}

impl Constraint {
    /// Creates a weekday ban for a team.
    pub fn no_play_weekday(team_id: impl Into<String>, weekday: Weekday) -> Self {
        Self::NoPlayDayOfWeek {
            team_id: team_id.into(),
            weekday,
        }
    }

    /// Creates a date-range ban for a team.
    pub fn no_play_range(team_id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::NoPlayDateRange {
            team_id: team_id.into(),
            start,
            end,
        }
    }

    /// Creates a venue unavailability window.
    pub fn venue_conflict(venue: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::VenueConflict {
            venue: venue.into(),
            start,
            end,
        }
    }

    /// Creates an exam-period blackout for a team.
    pub fn academic_blackout(team_id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::AcademicBlackout {
            team_id: team_id.into(),
            start,
            end,
        }
    }

    /// Creates an existing external commitment.
    pub fn existing_commitment(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::ExistingCommitment {
            home_team: home_team.into(),
            away_team: away_team.into(),
            date,
        }
    }

    /// Creates a minimum premium-window requirement.
    pub fn min_premium_windows(team_id: impl Into<String>, count: usize) -> Self {
        Self::MinPremiumWindows {
            team_id: team_id.into(),
            count,
        }
    }

    /// Creates a home/away imbalance bound.
    pub fn max_home_away_imbalance(team_id: impl Into<String>, max_difference: u32) -> Self {
        Self::MaxHomeAwayImbalance {
            team_id: team_id.into(),
            max_difference,
        }
    }

    /// Creates a consecutive-away-run bound.
    pub fn max_consecutive_away(team_id: impl Into<String>, max_run: u32) -> Self {
        Self::MaxConsecutiveAway {
            team_id: team_id.into(),
            max_run,
        }
    }

    /// The date range `[start, end]` carried by this constraint, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::NoPlayDateRange { start, end, .. }
            | Self::VenueConflict { start, end, .. }
            | Self::AcademicBlackout { start, end, .. } => Some((*start, *end)),
            Self::ExistingCommitment { date, .. } => Some((*date, *date)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_constraint_factories() {
        let c = Constraint::no_play_weekday("a", Weekday::Sun);
        assert_eq!(
            c,
            Constraint::NoPlayDayOfWeek {
                team_id: "a".into(),
                weekday: Weekday::Sun
            }
        );

        let c = Constraint::venue_conflict("Arena", date(2026, 9, 1), date(2026, 9, 3));
        assert_eq!(c.date_range(), Some((date(2026, 9, 1), date(2026, 9, 3))));

        let c = Constraint::existing_commitment("a", "x", date(2026, 9, 5));
        assert_eq!(c.date_range(), Some((date(2026, 9, 5), date(2026, 9, 5))));

        let c = Constraint::max_consecutive_away("a", 3);
        assert_eq!(c.date_range(), None);
    }

    #[test]
    fn test_constraint_serde_round_trip() {
        let constraints = vec![
            Constraint::no_play_weekday("a", Weekday::Sun),
            Constraint::academic_blackout("b", date(2026, 12, 7), date(2026, 12, 18)),
            Constraint::min_premium_windows("c", 2),
        ];
        let json = serde_json::to_string(&constraints).unwrap();
        let back: Vec<Constraint> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, constraints);
    }
}
