//! Rescue pass for infeasible schedules.
//!
//! Every filter rule except existing commitments is dropped: the slot
//! pool is every week-day that carries no commitment. Unscheduled
//! fixtures are placed greedily into the first free slot, and same-day
//! double-bookings are spread across their week. Fixtures touched here
//! are flagged `relaxed_constraint` so reporting can tell rescued
//! placements from clean ones.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::debug;

use crate::models::{Schedule, Week};

pub(super) fn relax(schedule: &mut Schedule, commitment_days: &BTreeSet<NaiveDate>) {
    let before = schedule.unscheduled.len();
    place_unscheduled(schedule, commitment_days);
    let rescued = before - schedule.unscheduled.len();
    debug!("relaxation rescued {rescued} of {before} unscheduled fixtures");
    repair_double_bookings(schedule);
}

/// Greedy first-fit: each unscheduled fixture takes the earliest
/// commitment-free day on which neither team already plays.
fn place_unscheduled(schedule: &mut Schedule, commitment_days: &BTreeSet<NaiveDate>) {
    let kickoff = schedule.sport.default_kickoff_hour();
    let queue = std::mem::take(&mut schedule.unscheduled);
    let mut leftovers = Vec::new();

    for mut matchup in queue {
        let slot = schedule.weeks.iter().enumerate().find_map(|(index, week)| {
            week.days
                .iter()
                .copied()
                .find(|day| {
                    !commitment_days.contains(day)
                        && !week.plays_on(&matchup.home_team, *day)
                        && !week.plays_on(&matchup.away_team, *day)
                })
                .map(|day| (index, day))
        });
        match slot {
            Some((week_index, day)) => {
                matchup.week = Some(week_index);
                matchup.date = Some(day);
                matchup.kickoff_hour = Some(kickoff);
                matchup.relaxed_constraint = true;
                schedule.weeks[week_index].matchups.push(matchup);
            }
            None => leftovers.push(matchup),
        }
    }
    schedule.unscheduled = leftovers;
}

/// Keeps the first fixture of each same-day clash in place and moves
/// the rest to free days within their own week.
fn repair_double_bookings(schedule: &mut Schedule) {
    for week in &mut schedule.weeks {
        let mut movers: Vec<usize> = Vec::new();
        {
            let mut seen: BTreeSet<(&str, NaiveDate)> = BTreeSet::new();
            for (i, m) in week.matchups.iter().enumerate() {
                let date = match m.date {
                    Some(d) => d,
                    None => continue,
                };
                if seen.contains(&(m.home_team.as_str(), date))
                    || seen.contains(&(m.away_team.as_str(), date))
                {
                    movers.push(i);
                    continue;
                }
                seen.insert((m.home_team.as_str(), date));
                seen.insert((m.away_team.as_str(), date));
            }
        }

        for i in movers {
            if let Some(day) = free_day_for(week, i) {
                let fixture = &mut week.matchups[i];
                fixture.date = Some(day);
                fixture.relaxed_constraint = true;
            }
        }
    }
}

/// The earliest day of the week on which neither participant of the
/// fixture at `index` plays, excluding the fixture's current day.
fn free_day_for(week: &Week, index: usize) -> Option<NaiveDate> {
    let fixture = &week.matchups[index];
    week.days.iter().copied().find(|&day| {
        fixture.date != Some(day)
            && !week.plays_on(&fixture.home_team, day)
            && !week.plays_on(&fixture.away_team, day)
    })
}
