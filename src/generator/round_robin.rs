//! Round-robin pairing algorithms: single, double, partial, and the
//! pooled dual-meet variant.

use std::collections::HashSet;

use crate::models::{MatchupKind, Pairing, Team};

/// All pairs `(i, j)` with `i < j`: every unordered pair exactly once.
pub fn single_round_robin(teams: &[Team]) -> Vec<Pairing> {
    all_pairs(teams, MatchupKind::Regular)
}

/// Single round-robin duplicated.
///
/// The two legs are appended in the same order; role assignment later
/// splits the list at its midpoint and reverses the second leg's
/// home/away roles, giving exact reciprocity per pair.
pub fn double_round_robin(teams: &[Team]) -> Vec<Pairing> {
    let mut pairings = single_round_robin(teams);
    let second_leg = pairings.clone();
    pairings.extend(second_leg);
    pairings
}

/// Partial round-robin by modular stepping.
///
/// For team `i` and slot `j`, the opponent index is
/// `(i + floor(j·step) + 1) mod n` with `step = (n-1)/games_per_team`.
/// A pair already generated is skipped rather than retried, so teams
/// can end below `games_per_team` fixtures; the shortfall is visible
/// in per-team analysis rather than repaired here.
pub fn partial_round_robin(teams: &[Team], games_per_team: u32) -> Vec<Pairing> {
    let n = teams.len();
    if n < 2 || games_per_team == 0 {
        return Vec::new();
    }

    let step = (n - 1) as f64 / games_per_team as f64;
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut pairings = Vec::new();

    for i in 0..n {
        for j in 0..games_per_team {
            let offset = (j as f64 * step).floor() as usize + 1;
            let opponent = (i + offset) % n;
            let pairing = Pairing::new(&teams[i].id, &teams[opponent].id, MatchupKind::Regular);
            let (a, b) = pairing.unordered_key();
            if seen.insert((a.to_string(), b.to_string())) {
                pairings.push(pairing);
            }
        }
    }

    pairings
}

/// Conference teams and affiliates pooled into one single round-robin.
pub fn dual_meet(teams: &[Team], affiliates: &[Team]) -> Vec<Pairing> {
    let pool: Vec<Team> = teams.iter().chain(affiliates.iter()).cloned().collect();
    all_pairs(&pool, MatchupKind::DualMeet)
}

fn all_pairs(teams: &[Team], kind: MatchupKind) -> Vec<Pairing> {
    let mut pairings = Vec::new();
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            pairings.push(Pairing::new(&teams[i].id, &teams[j].id, kind));
        }
    }
    pairings
}
