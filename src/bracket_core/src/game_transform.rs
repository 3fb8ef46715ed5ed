use std::collections::BTreeMap;

use crate::team::TeamId;
use crate::win_prob::MatchupProbability;

/// Probability mass over the possible winners of one game.
///
/// Ordered so that downstream summation order, and therefore every result
/// bit, is reproducible.
pub type WinnerDistribution = BTreeMap<TeamId, f64>;

/// Distribution for a slot held by a fixed team.
pub fn fixed(team: &str) -> WinnerDistribution {
    let mut dist = WinnerDistribution::new();
    dist.insert(team.to_string(), 1.0);
    dist
}

/// Probabilistic game transformation.
///
/// Given the distributions of who occupies each slot of `game`, computes the
/// distribution of who wins it. Cost is |slot1| x |slot2| probability lookups.
///
/// # Arguments
/// * `game` - Game being played (explicit probabilities are keyed by it)
/// * `slot1` - Occupant distribution of the first slot
/// * `slot2` - Occupant distribution of the second slot
/// * `probs` - Head-to-head probability source
pub fn game_transform_prob<P: MatchupProbability + ?Sized>(
    game: &str,
    slot1: &WinnerDistribution,
    slot2: &WinnerDistribution,
    probs: &P,
) -> WinnerDistribution {
    let mut winners = WinnerDistribution::new();

    for (name1, &mass1) in slot1 {
        for (name2, &mass2) in slot2 {
            let joint = mass1 * mass2;
            if joint == 0.0 {
                continue;
            }
            let p1 = probs.win_prob(game, name1, name2);

            *winners.entry(name1.clone()).or_insert(0.0) += joint * p1;
            *winners.entry(name2.clone()).or_insert(0.0) += joint * (1.0 - p1);
        }
    }

    winners
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lower ID always wins with the given probability.
    struct Fixed(f64);

    impl MatchupProbability for Fixed {
        fn win_prob(&self, _game: &str, team: &str, opponent: &str) -> f64 {
            if team < opponent {
                self.0
            } else {
                1.0 - self.0
            }
        }
    }

    #[test]
    fn test_game_transform_prob_basic() {
        let winners = game_transform_prob("g", &fixed("A"), &fixed("B"), &Fixed(0.7));

        assert_eq!(winners.len(), 2);
        assert!((winners["A"] - 0.7).abs() < 1e-12);
        assert!((winners["B"] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_game_transform_prob_uncertain() {
        // Slot 1: A (60%) or C (40%); slot 2: B
        let slot1: WinnerDistribution =
            [("A".to_string(), 0.6), ("C".to_string(), 0.4)].into_iter().collect();

        let winners = game_transform_prob("g", &slot1, &fixed("B"), &Fixed(0.75));

        // A beats B 75%, B beats C 75%
        assert!((winners["A"] - 0.6 * 0.75).abs() < 1e-12);
        assert!((winners["C"] - 0.4 * 0.25).abs() < 1e-12);
        assert!((winners["B"] - (0.6 * 0.25 + 0.4 * 0.75)).abs() < 1e-12);

        let sum: f64 = winners.values().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_mass_skipped() {
        let slot1: WinnerDistribution =
            [("A".to_string(), 1.0), ("C".to_string(), 0.0)].into_iter().collect();

        let winners = game_transform_prob("g", &slot1, &fixed("B"), &Fixed(0.5));
        assert!(!winners.contains_key("C"));
    }

    #[test]
    fn test_certain_outcome() {
        let winners = game_transform_prob("g", &fixed("A"), &fixed("B"), &Fixed(1.0));
        assert_eq!(winners["A"], 1.0);
        assert_eq!(winners["B"], 0.0);
    }
}
