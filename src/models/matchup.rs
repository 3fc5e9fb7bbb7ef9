//! Fixture models: unordered pairings and resolved matchups.
//!
//! Generators emit [`Pairing`]s — team pairs with no roles or dates.
//! Role assignment converts each pairing into a [`Matchup`] with
//! home/away teams fixed; week/date/kickoff are filled in by later
//! stages. A matchup is never destroyed, only moved between a week
//! and the schedule's unscheduled list.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Classification of fixtures by how they were generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchupKind {
    /// Round-robin fixture (single, double, or partial).
    Regular,
    /// Intra-division fixture from the divisional format.
    Divisional,
    /// Cross-division fixture from the divisional format.
    CrossDivisional,
    /// One game of a multi-game series.
    Series,
    /// Pooled conference/affiliate fixture from the dual-meet format.
    DualMeet,
}

/// An unordered team pair produced by matchup generation.
///
/// Carries no home/away roles. Series games additionally record which
/// series they belong to and their position within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pairing {
    /// First team ID (no role implied).
    pub team_a: String,
    /// Second team ID (no role implied).
    pub team_b: String,
    /// Fixture classification.
    pub kind: MatchupKind,
    /// Series this pairing belongs to, if any.
    pub series_id: Option<u32>,
    /// 1-based game number within the series.
    pub series_game: Option<u32>,
}

impl Pairing {
    /// Creates a pairing between two teams.
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>, kind: MatchupKind) -> Self {
        Self {
            team_a: team_a.into(),
            team_b: team_b.into(),
            kind,
            series_id: None,
            series_game: None,
        }
    }

    /// Tags this pairing as game `game` of series `series_id`.
    pub fn with_series(mut self, series_id: u32, game: u32) -> Self {
        self.series_id = Some(series_id);
        self.series_game = Some(game);
        self
    }

    /// Whether the given team is part of this pairing.
    pub fn involves(&self, team_id: &str) -> bool {
        self.team_a == team_id || self.team_b == team_id
    }

    /// Order-independent pair key for duplicate detection.
    pub fn unordered_key(&self) -> (&str, &str) {
        if self.team_a <= self.team_b {
            (&self.team_a, &self.team_b)
        } else {
            (&self.team_b, &self.team_a)
        }
    }
}

/// A fixture with resolved home/away roles.
///
/// `week`, `date`, and `kickoff_hour` stay `None` until weekly
/// assignment places the fixture on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    /// Home team ID.
    pub home_team: String,
    /// Away team ID.
    pub away_team: String,
    /// Index of the week this fixture is placed in.
    pub week: Option<usize>,
    /// Calendar date of the fixture.
    pub date: Option<NaiveDate>,
    /// Kickoff hour of day (0-23), stamped from the sport's default slot.
    pub kickoff_hour: Option<u32>,
    /// Fixture classification.
    pub kind: MatchupKind,
    /// Series this fixture belongs to, if any.
    pub series_id: Option<u32>,
    /// 1-based game number within the series.
    pub series_game: Option<u32>,
    /// Fixture was injected from an existing external commitment.
    pub is_existing_commitment: bool,
    /// Fixture was placed (or re-dated) by constraint relaxation.
    pub relaxed_constraint: bool,
}

impl Matchup {
    /// Creates an unplaced matchup with the given roles.
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>, kind: MatchupKind) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            week: None,
            date: None,
            kickoff_hour: None,
            kind,
            series_id: None,
            series_game: None,
            is_existing_commitment: false,
            relaxed_constraint: false,
        }
    }

    /// Resolves a pairing into a matchup, taking series tags along.
    ///
    /// `first_is_home` selects which side of the pairing hosts.
    pub fn from_pairing(pairing: Pairing, first_is_home: bool) -> Self {
        let (home, away) = if first_is_home {
            (pairing.team_a, pairing.team_b)
        } else {
            (pairing.team_b, pairing.team_a)
        };
        let mut matchup = Matchup::new(home, away, pairing.kind);
        matchup.series_id = pairing.series_id;
        matchup.series_game = pairing.series_game;
        matchup
    }

    /// Whether the given team plays in this fixture.
    pub fn involves(&self, team_id: &str) -> bool {
        self.home_team == team_id || self.away_team == team_id
    }

    /// The opponent of `team_id`, if that team plays here.
    pub fn opponent_of(&self, team_id: &str) -> Option<&str> {
        if self.home_team == team_id {
            Some(&self.away_team)
        } else if self.away_team == team_id {
            Some(&self.home_team)
        } else {
            None
        }
    }

    /// Whether `team_id` plays away in this fixture.
    pub fn is_away_for(&self, team_id: &str) -> bool {
        self.away_team == team_id
    }

    /// Swaps home and away roles in place.
    pub fn swap_roles(&mut self) {
        std::mem::swap(&mut self.home_team, &mut self.away_team);
    }

    /// Whether the fixture falls on a Saturday or Sunday.
    ///
    /// `false` when no date is assigned.
    pub fn is_weekend(&self) -> bool {
        match self.date {
            Some(date) => matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            None => false,
        }
    }

    /// Whether the fixture sits in a premium television window.
    ///
    /// Windows (hour ranges half-open): Sunday 16-19, Saturday 12-20,
    /// Monday through Friday 19-22. `false` when date or kickoff is unset.
    pub fn is_premium_window(&self) -> bool {
        let (date, hour) = match (self.date, self.kickoff_hour) {
            (Some(d), Some(h)) => (d, h),
            _ => return false,
        };
        match date.weekday() {
            Weekday::Sun => (16..19).contains(&hour),
            Weekday::Sat => (12..20).contains(&hour),
            _ => (19..22).contains(&hour),
        }
    }
}
