//! Calendar week model.
//!
//! Weeks are created once when the season is sliced into 7-day
//! segments; every later stage mutates only their matchup lists.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::Matchup;

/// One scheduling week: a contiguous run of calendar days.
///
/// All weeks span 7 days except possibly the last, which is truncated
/// at the season end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
    /// Zero-based week index within the season.
    pub index: usize,
    /// First day of the week.
    pub start: NaiveDate,
    /// Last day of the week (inclusive).
    pub end: NaiveDate,
    /// Every calendar day in `[start, end]`, in order.
    pub days: Vec<NaiveDate>,
    /// Fixtures placed in this week.
    pub matchups: Vec<Matchup>,
}

impl Week {
    /// Creates a week covering `[start, end]`, enumerating its days.
    pub fn new(index: usize, start: NaiveDate, end: NaiveDate) -> Self {
        let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
        Self {
            index,
            start,
            end,
            days,
            matchups: Vec::new(),
        }
    }

    /// Whether the date falls inside this week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The week's day falling on the given weekday, if present.
    pub fn day_on(&self, weekday: Weekday) -> Option<NaiveDate> {
        self.days.iter().copied().find(|d| d.weekday() == weekday)
    }

    /// Number of fixtures already placed for the given team this week.
    pub fn games_for(&self, team_id: &str) -> usize {
        self.matchups.iter().filter(|m| m.involves(team_id)).count()
    }

    /// Whether the team already has a fixture on the given date.
    pub fn plays_on(&self, team_id: &str, date: NaiveDate) -> bool {
        self.matchups
            .iter()
            .any(|m| m.involves(team_id) && m.date == Some(date))
    }
}
