//! Series pairing: a single round-robin expanded into multi-game
//! series sharing a series ID.

use crate::models::{MatchupKind, Pairing, Team};

/// Expands each round-robin pair into `series_length` games.
///
/// Games within one series share a `series_id` and are numbered from
/// 1; weekly assignment later places each series atomically.
pub fn series_round_robin(teams: &[Team], series_length: u32) -> Vec<Pairing> {
    let mut pairings = Vec::new();
    let mut series_id = 0u32;

    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            for game in 1..=series_length {
                pairings.push(
                    Pairing::new(&teams[i].id, &teams[j].id, MatchupKind::Series)
                        .with_series(series_id, game),
                );
            }
            series_id += 1;
        }
    }

    pairings
}
