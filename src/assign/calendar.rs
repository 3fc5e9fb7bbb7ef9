//! Season calendar construction.

use chrono::{Duration, NaiveDate};

use crate::models::Week;

/// Slices `[season_start, season_end]` into consecutive 7-day weeks.
///
/// The last week is truncated at the season end. Inverted ranges
/// produce no weeks; configuration validation rejects them upstream.
pub fn build_weeks(season_start: NaiveDate, season_end: NaiveDate) -> Vec<Week> {
    let mut weeks = Vec::new();
    let mut start = season_start;
    let mut index = 0usize;

    while start <= season_end {
        let end = (start + Duration::days(6)).min(season_end);
        weeks.push(Week::new(index, start, end));
        index += 1;
        start += Duration::days(7);
    }

    weeks
}
