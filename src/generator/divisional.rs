//! Divisional pairing: full round-robin inside each division plus an
//! indexed cross-division walk.

use std::collections::HashSet;

use crate::models::{MatchupKind, Pairing, Team};

/// Generates divisional fixtures.
///
/// Teams are grouped by their division tag (first-seen order). Each
/// division plays a full internal round-robin; across divisions, team
/// `k` of one division meets team `k mod len(other)` of the other.
/// The cross walk runs in both directions, so with equal division
/// sizes the reverse direction only re-creates existing pairs; any
/// pair already generated is skipped rather than emitted twice.
pub fn divisional(teams: &[Team]) -> Vec<Pairing> {
    let mut divisions: Vec<(String, Vec<&Team>)> = Vec::new();
    for team in teams {
        let tag = team.division.clone().unwrap_or_default();
        match divisions.iter_mut().find(|(name, _)| *name == tag) {
            Some((_, members)) => members.push(team),
            None => divisions.push((tag, vec![team])),
        }
    }

    let mut pairings = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    // Intra-division round-robins
    for (_, members) in &divisions {
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let pairing = Pairing::new(&members[i].id, &members[j].id, MatchupKind::Divisional);
                let (a, b) = pairing.unordered_key();
                seen.insert((a.to_string(), b.to_string()));
                pairings.push(pairing);
            }
        }
    }

    // Cross-division indexed walk, both directions
    for d1 in 0..divisions.len() {
        for d2 in 0..divisions.len() {
            if d1 == d2 {
                continue;
            }
            let left = &divisions[d1].1;
            let right = &divisions[d2].1;
            if right.is_empty() {
                continue;
            }
            for (k, team) in left.iter().enumerate() {
                let opponent = right[k % right.len()];
                let pairing =
                    Pairing::new(&team.id, &opponent.id, MatchupKind::CrossDivisional);
                let (a, b) = pairing.unordered_key();
                if seen.insert((a.to_string(), b.to_string())) {
                    pairings.push(pairing);
                }
            }
        }
    }

    pairings
}
