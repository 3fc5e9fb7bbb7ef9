//! Home/away role assignment.
//!
//! Converts unordered pairings into matchups with fixed roles while
//! tracking a per-team signed balance counter (positive = more home
//! games). The counter map is owned by this single pass; later stages
//! derive balance from the schedule itself.
//!
//! # Reference
//! de Werra (1981), "Scheduling in sports", Studies on Graphs and
//! Discrete Programming

use std::collections::HashMap;

use rand::Rng;

use crate::models::{CompetitionFormat, Matchup, Pairing};

/// Assigns home/away roles per the competition format.
#[derive(Debug, Clone)]
pub struct HomeAwayAssigner {
    format: CompetitionFormat,
}

impl HomeAwayAssigner {
    /// Creates an assigner for the given format.
    pub fn new(format: CompetitionFormat) -> Self {
        Self { format }
    }

    /// Resolves every pairing into a matchup, preserving order.
    ///
    /// Role rules by format:
    /// - double round-robin: the list is split at its midpoint; the
    ///   first leg hosts on the pairing's first team, the mirrored
    ///   second leg on its second team, giving exact reciprocity.
    /// - series: one coin flip decides the host of an entire series;
    ///   the balance counter moves by the full series length at once.
    /// - everything else: greedy single pass, lower balance hosts.
    ///   Parity can leave final balances one game apart.
    pub fn assign<R: Rng>(&self, pairings: Vec<Pairing>, rng: &mut R) -> Vec<Matchup> {
        match self.format {
            CompetitionFormat::DoubleRoundRobin => Self::assign_mirrored(pairings),
            CompetitionFormat::ThreeGameSeries => Self::assign_series(pairings, rng),
            _ => Self::assign_balanced(pairings),
        }
    }

    fn assign_mirrored(pairings: Vec<Pairing>) -> Vec<Matchup> {
        let half = pairings.len() / 2;
        pairings
            .into_iter()
            .enumerate()
            .map(|(k, p)| Matchup::from_pairing(p, k < half))
            .collect()
    }

    fn assign_series<R: Rng>(pairings: Vec<Pairing>, rng: &mut R) -> Vec<Matchup> {
        // Series length per ID, needed to move the counter in one step.
        let mut lengths: HashMap<u32, i64> = HashMap::new();
        for p in &pairings {
            if let Some(id) = p.series_id {
                *lengths.entry(id).or_insert(0) += 1;
            }
        }

        let mut balance: HashMap<String, i64> = HashMap::new();
        let mut hosts: HashMap<u32, bool> = HashMap::new();
        let mut matchups = Vec::with_capacity(pairings.len());

        for pairing in pairings {
            let first_is_home = match pairing.series_id {
                Some(id) => match hosts.get(&id) {
                    Some(&decided) => decided,
                    None => {
                        let flip = rng.random_bool(0.5);
                        hosts.insert(id, flip);
                        let length = lengths.get(&id).copied().unwrap_or(0);
                        let (home, away) = if flip {
                            (&pairing.team_a, &pairing.team_b)
                        } else {
                            (&pairing.team_b, &pairing.team_a)
                        };
                        *balance.entry(home.clone()).or_insert(0) += length;
                        *balance.entry(away.clone()).or_insert(0) -= length;
                        flip
                    }
                },
                None => Self::greedy_pick(&mut balance, &pairing),
            };
            matchups.push(Matchup::from_pairing(pairing, first_is_home));
        }

        matchups
    }

    fn assign_balanced(pairings: Vec<Pairing>) -> Vec<Matchup> {
        let mut balance: HashMap<String, i64> = HashMap::new();
        pairings
            .into_iter()
            .map(|p| {
                let first_is_home = Self::greedy_pick(&mut balance, &p);
                Matchup::from_pairing(p, first_is_home)
            })
            .collect()
    }

    /// Lower balance hosts; the pairing's first team wins ties.
    fn greedy_pick(balance: &mut HashMap<String, i64>, pairing: &Pairing) -> bool {
        let a = balance.get(&pairing.team_a).copied().unwrap_or(0);
        let b = balance.get(&pairing.team_b).copied().unwrap_or(0);
        let first_is_home = a <= b;
        let (home, away) = if first_is_home {
            (&pairing.team_a, &pairing.team_b)
        } else {
            (&pairing.team_b, &pairing.team_a)
        };
        *balance.entry(home.clone()).or_insert(0) += 1;
        *balance.entry(away.clone()).or_insert(0) -= 1;
        first_is_home
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{double_round_robin, series_round_robin, single_round_robin};
    use crate::models::Team;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn teams(n: usize) -> Vec<Team> {
        (0..n).map(|i| Team::new(format!("t{i}"))).collect()
    }

    #[test]
    fn test_double_round_robin_reciprocity() {
        let pool = teams(4);
        let pairings = double_round_robin(&pool);
        let mut rng = SmallRng::seed_from_u64(42);
        let matchups = HomeAwayAssigner::new(CompetitionFormat::DoubleRoundRobin)
            .assign(pairings, &mut rng);

        assert_eq!(matchups.len(), 12);
        let half = matchups.len() / 2;
        for k in 0..half {
            // Mirrored legs swap roles exactly.
            assert_eq!(matchups[k].home_team, matchups[half + k].away_team);
            assert_eq!(matchups[k].away_team, matchups[half + k].home_team);
        }
    }

    #[test]
    fn test_greedy_balance_within_one() {
        let pool = teams(5);
        let pairings = single_round_robin(&pool);
        let mut rng = SmallRng::seed_from_u64(1);
        let matchups =
            HomeAwayAssigner::new(CompetitionFormat::SingleRoundRobin).assign(pairings, &mut rng);

        for team in &pool {
            let home = matchups.iter().filter(|m| m.home_team == team.id).count() as i64;
            let away = matchups.iter().filter(|m| m.away_team == team.id).count() as i64;
            assert!(
                (home - away).abs() <= 1,
                "{} ended {home} home / {away} away",
                team.id
            );
        }
    }

    #[test]
    fn test_series_shares_one_host() {
        let pool = teams(3);
        let pairings = series_round_robin(&pool, 3);
        let mut rng = SmallRng::seed_from_u64(7);
        let matchups =
            HomeAwayAssigner::new(CompetitionFormat::ThreeGameSeries).assign(pairings, &mut rng);

        assert_eq!(matchups.len(), 9);
        let mut host_by_series: HashMap<u32, &str> = HashMap::new();
        for m in &matchups {
            let id = m.series_id.unwrap();
            let host = host_by_series.entry(id).or_insert(&m.home_team);
            assert_eq!(*host, m.home_team, "series {id} changed host mid-series");
        }
        assert_eq!(host_by_series.len(), 3);
    }

    #[test]
    fn test_series_flip_is_seed_deterministic() {
        let pool = teams(4);
        let mut rng_a = SmallRng::seed_from_u64(42);
        let mut rng_b = SmallRng::seed_from_u64(42);
        let assigner = HomeAwayAssigner::new(CompetitionFormat::ThreeGameSeries);

        let first = assigner.assign(series_round_robin(&pool, 3), &mut rng_a);
        let second = assigner.assign(series_round_robin(&pool, 3), &mut rng_b);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.home_team, b.home_team);
        }
    }

    #[test]
    fn test_order_and_population_preserved() {
        let pool = teams(4);
        let pairings = single_round_robin(&pool);
        let expected: Vec<(String, String)> = pairings
            .iter()
            .map(|p| {
                let (a, b) = p.unordered_key();
                (a.to_string(), b.to_string())
            })
            .collect();

        let mut rng = SmallRng::seed_from_u64(3);
        let matchups =
            HomeAwayAssigner::new(CompetitionFormat::SingleRoundRobin).assign(pairings, &mut rng);

        assert_eq!(matchups.len(), expected.len());
        for (m, key) in matchups.iter().zip(expected.iter()) {
            let mut pair = [m.home_team.as_str(), m.away_team.as_str()];
            pair.sort_unstable();
            assert_eq!((pair[0].to_string(), pair[1].to_string()), *key);
        }
    }
}
