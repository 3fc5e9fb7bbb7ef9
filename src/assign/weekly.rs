//! Weekly fixture placement.
//!
//! First-fit, order-dependent, no lookahead: each week repeatedly
//! takes the first queued fixture whose teams are both under the
//! sport's weekly quota and places it on the next eligible day in
//! rotation. Fixtures the week cannot take carry into the next week;
//! whatever survives the final week is returned as unscheduled.

use chrono::{NaiveDate, Weekday};

use std::collections::HashMap;

use crate::models::{Matchup, Sport, Week};

/// Places matchups into calendar weeks under per-sport policy.
#[derive(Debug, Clone)]
pub struct WeeklyAssigner {
    sport: Sport,
    break_weeks: Vec<usize>,
}

impl WeeklyAssigner {
    /// Creates an assigner for the given sport.
    pub fn new(sport: Sport) -> Self {
        Self {
            sport,
            break_weeks: Vec::new(),
        }
    }

    /// Marks week indices that must stay empty.
    pub fn with_break_weeks(mut self, weeks: Vec<usize>) -> Self {
        self.break_weeks = weeks;
        self
    }

    /// Fills the weeks from the fixture queue; returns the leftovers.
    ///
    /// Placed fixtures get their week index, date, and the sport's
    /// default kickoff hour stamped on.
    pub fn assign(&self, matchups: Vec<Matchup>, weeks: &mut [Week]) -> Vec<Matchup> {
        let mut queue = matchups;
        let kickoff = self.sport.default_kickoff_hour();

        for week in weeks.iter_mut() {
            if self.break_weeks.contains(&week.index) {
                continue;
            }
            if self.sport.plays_series() {
                self.place_series(&mut queue, week, kickoff);
            } else {
                self.place_singles(&mut queue, week, kickoff);
            }
        }

        queue
    }

    fn place_singles(&self, queue: &mut Vec<Matchup>, week: &mut Week, kickoff: u32) {
        let days = self.eligible_days(week);
        if days.is_empty() {
            return;
        }
        let target = self.sport.target_games_per_week();
        let mut games: HashMap<String, usize> = HashMap::new();
        let mut day_cursor = 0usize;

        loop {
            let next = queue.iter().position(|m| {
                games.get(&m.home_team).copied().unwrap_or(0) < target
                    && games.get(&m.away_team).copied().unwrap_or(0) < target
            });
            let Some(idx) = next else { break };

            let mut matchup = queue.remove(idx);
            matchup.week = Some(week.index);
            matchup.date = Some(days[day_cursor % days.len()]);
            matchup.kickoff_hour = Some(kickoff);
            day_cursor += 1;

            *games.entry(matchup.home_team.clone()).or_insert(0) += 1;
            *games.entry(matchup.away_team.clone()).or_insert(0) += 1;
            week.matchups.push(matchup);
        }
    }

    /// Places whole series atomically onto the week's Fri/Sat/Sun block.
    ///
    /// A series goes in only when neither team already plays this week
    /// and the block has a day for every game. Fixtures without a
    /// series ID are treated as one-game series.
    fn place_series(&self, queue: &mut Vec<Matchup>, week: &mut Week, kickoff: u32) {
        let block = weekend_block(week);
        if block.is_empty() {
            return;
        }

        let mut i = 0usize;
        while i < queue.len() {
            let candidate = &queue[i];
            if week.games_for(&candidate.home_team) > 0 || week.games_for(&candidate.away_team) > 0
            {
                i += 1;
                continue;
            }

            let game_indices: Vec<usize> = match candidate.series_id {
                Some(id) => queue
                    .iter()
                    .enumerate()
                    .filter(|(_, m)| m.series_id == Some(id))
                    .map(|(k, _)| k)
                    .collect(),
                None => vec![i],
            };
            if game_indices.len() > block.len() {
                i += 1;
                continue;
            }

            let mut games: Vec<Matchup> = Vec::with_capacity(game_indices.len());
            for &k in game_indices.iter().rev() {
                games.push(queue.remove(k));
            }
            games.reverse();

            for (slot, mut game) in games.into_iter().enumerate() {
                game.week = Some(week.index);
                game.date = Some(block[slot]);
                game.kickoff_hour = Some(kickoff);
                week.matchups.push(game);
            }

            // Removal shifted the queue; rescan from the front.
            i = 0;
        }
    }

    /// Days this sport may play on within the given week.
    fn eligible_days(&self, week: &Week) -> Vec<NaiveDate> {
        let mut days = match self.sport {
            Sport::Football => match week.day_on(Weekday::Sat) {
                Some(saturday) => vec![saturday],
                None => week.days.first().copied().into_iter().collect(),
            },
            Sport::Basketball | Sport::Volleyball => {
                if let Some((wed, sat)) = week.day_on(Weekday::Wed).zip(week.day_on(Weekday::Sat))
                {
                    vec![wed, sat]
                } else if let Some((thu, sun)) =
                    week.day_on(Weekday::Thu).zip(week.day_on(Weekday::Sun))
                {
                    vec![thu, sun]
                } else {
                    week.days.iter().take(2).copied().collect()
                }
            }
            Sport::Baseball | Sport::Softball => weekend_block(week),
            Sport::Custom(_) => week.days.clone(),
        };
        days.sort_unstable();
        days
    }
}

/// The week's Friday/Saturday/Sunday days, chronologically.
fn weekend_block(week: &Week) -> Vec<NaiveDate> {
    let mut block: Vec<NaiveDate> = [Weekday::Fri, Weekday::Sat, Weekday::Sun]
        .iter()
        .filter_map(|wd| week.day_on(*wd))
        .collect();
    block.sort_unstable();
    block
}
