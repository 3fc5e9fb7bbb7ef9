//! Neighbor move operators.
//!
//! Each operator mutates the candidate schedule in place and reports
//! whether it found a valid target; a `false` return makes the
//! iteration a no-op. Targets are sampled with a bounded number of
//! attempts rather than enumerated, which keeps moves O(1) at the cost
//! of occasionally missing a valid target in sparse schedules.
//!
//! Fixtures injected from existing commitments are never moved.

use rand::Rng;

use crate::models::Schedule;

/// Sampling attempts before an operator gives up.
const ATTEMPTS: usize = 8;

/// Swaps placement between two fixtures in different weeks that share
/// no team. Week membership moves with the fixtures so each one stays
/// inside the week owning its date.
pub(super) fn swap_dates<R: Rng>(schedule: &mut Schedule, rng: &mut R) -> bool {
    let week_count = schedule.weeks.len();
    if week_count < 2 {
        return false;
    }
    for _ in 0..ATTEMPTS {
        let w1 = rng.random_range(0..week_count);
        let w2 = rng.random_range(0..week_count);
        if w1 == w2
            || schedule.weeks[w1].matchups.is_empty()
            || schedule.weeks[w2].matchups.is_empty()
        {
            continue;
        }
        let i1 = rng.random_range(0..schedule.weeks[w1].matchups.len());
        let i2 = rng.random_range(0..schedule.weeks[w2].matchups.len());
        {
            let first = &schedule.weeks[w1].matchups[i1];
            let second = &schedule.weeks[w2].matchups[i2];
            if first.is_existing_commitment
                || second.is_existing_commitment
                || first.involves(&second.home_team)
                || first.involves(&second.away_team)
            {
                continue;
            }
        }
        let mut first = schedule.weeks[w1].matchups.swap_remove(i1);
        let mut second = schedule.weeks[w2].matchups.swap_remove(i2);
        std::mem::swap(&mut first.week, &mut second.week);
        std::mem::swap(&mut first.date, &mut second.date);
        schedule.weeks[w1].matchups.push(second);
        schedule.weeks[w2].matchups.push(first);
        return true;
    }
    false
}

/// Swaps home and away roles of one fixture.
///
/// Only round-robin formats tolerate this; mirrored legs and series
/// hosting would silently break otherwise.
pub(super) fn flip_home_away<R: Rng>(schedule: &mut Schedule, rng: &mut R) -> bool {
    if !schedule.format.is_round_robin() || schedule.weeks.is_empty() {
        return false;
    }
    for _ in 0..ATTEMPTS {
        let w = rng.random_range(0..schedule.weeks.len());
        if schedule.weeks[w].matchups.is_empty() {
            continue;
        }
        let i = rng.random_range(0..schedule.weeks[w].matchups.len());
        let fixture = &mut schedule.weeks[w].matchups[i];
        if fixture.is_existing_commitment {
            continue;
        }
        fixture.swap_roles();
        return true;
    }
    false
}

/// Moves one fixture to a different day within its own week.
pub(super) fn shift_within_week<R: Rng>(schedule: &mut Schedule, rng: &mut R) -> bool {
    if schedule.weeks.is_empty() {
        return false;
    }
    for _ in 0..ATTEMPTS {
        let w = rng.random_range(0..schedule.weeks.len());
        let week = &schedule.weeks[w];
        if week.matchups.is_empty() || week.days.len() < 2 {
            continue;
        }
        let i = rng.random_range(0..week.matchups.len());
        if week.matchups[i].is_existing_commitment {
            continue;
        }
        let day = week.days[rng.random_range(0..week.days.len())];
        if week.matchups[i].date == Some(day) {
            continue;
        }
        schedule.weeks[w].matchups[i].date = Some(day);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::build_weeks;
    use crate::models::{CompetitionFormat, Matchup, MatchupKind, Sport};
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_schedule(format: CompetitionFormat) -> Schedule {
        let mut schedule = Schedule::new(
            Sport::Basketball,
            format,
            date(2026, 11, 2),
            date(2026, 11, 15),
        );
        schedule.weeks = build_weeks(schedule.season_start, schedule.season_end);
        let fixtures = [
            ("a", "b", date(2026, 11, 3)),
            ("c", "d", date(2026, 11, 5)),
            ("e", "f", date(2026, 11, 10)),
            ("a", "c", date(2026, 11, 12)),
        ];
        for (home, away, d) in fixtures {
            let week = schedule.week_containing(d).unwrap();
            let mut m = Matchup::new(home, away, MatchupKind::Regular);
            m.week = Some(week);
            m.date = Some(d);
            m.kickoff_hour = Some(19);
            schedule.weeks[week].matchups.push(m);
        }
        schedule
    }

    fn assert_dates_inside_weeks(schedule: &Schedule) {
        for (index, week) in schedule.weeks.iter().enumerate() {
            for m in &week.matchups {
                assert_eq!(m.week, Some(index));
                assert!(week.contains(m.date.unwrap()));
            }
        }
    }

    #[test]
    fn test_swap_dates_preserves_week_invariant() {
        let mut schedule = sample_schedule(CompetitionFormat::SingleRoundRobin);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut applied = 0;
        for _ in 0..50 {
            if swap_dates(&mut schedule, &mut rng) {
                applied += 1;
            }
            assert_eq!(schedule.scheduled_count(), 4);
            assert_dates_inside_weeks(&schedule);
        }
        assert!(applied > 0);
    }

    #[test]
    fn test_swap_dates_needs_two_weeks() {
        let mut schedule = sample_schedule(CompetitionFormat::SingleRoundRobin);
        schedule.weeks.truncate(1);
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(!swap_dates(&mut schedule, &mut rng));
    }

    #[test]
    fn test_flip_gated_to_round_robin() {
        let mut rng = SmallRng::seed_from_u64(7);

        let mut series = sample_schedule(CompetitionFormat::ThreeGameSeries);
        assert!(!flip_home_away(&mut series, &mut rng));

        let mut round_robin = sample_schedule(CompetitionFormat::DoubleRoundRobin);
        assert!(flip_home_away(&mut round_robin, &mut rng));
    }

    #[test]
    fn test_shift_stays_in_week() {
        let mut schedule = sample_schedule(CompetitionFormat::SingleRoundRobin);
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..50 {
            shift_within_week(&mut schedule, &mut rng);
            assert_dates_inside_weeks(&schedule);
        }
    }

    #[test]
    fn test_commitments_never_move() {
        let mut schedule = sample_schedule(CompetitionFormat::SingleRoundRobin);
        for week in &mut schedule.weeks {
            for m in &mut week.matchups {
                m.is_existing_commitment = true;
            }
        }
        let before = serde_json::to_string(&schedule).unwrap();

        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(!swap_dates(&mut schedule, &mut rng));
            assert!(!flip_home_away(&mut schedule, &mut rng));
            assert!(!shift_within_week(&mut schedule, &mut rng));
        }
        assert_eq!(serde_json::to_string(&schedule).unwrap(), before);
    }
}
