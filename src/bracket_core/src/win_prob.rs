use std::collections::HashMap;

use tracing::trace;

use crate::config::EngineConfig;
use crate::matchups::MatchupTable;
use crate::team::{Team, TeamId};

/// Source of head-to-head win probabilities.
///
/// Implementations must never fail: missing data has to degrade to some
/// probability rather than abort a bracket computation.
pub trait MatchupProbability {
    /// Probability that `team` beats `opponent` in `game`.
    fn win_prob(&self, game: &str, team: &str, opponent: &str) -> f64;
}

/// Logistic function, evaluated so that neither branch can overflow.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Rating-based win probability for `team` over `opponent`.
///
/// Returns 0.5 when either team is unrated or the rating gap is undefined
/// (NaN ratings, or two infinite ratings of the same sign).
pub fn rating_win_prob(team: Option<&Team>, opponent: Option<&Team>, scale: f64) -> f64 {
    match (team.and_then(|t| t.rating), opponent.and_then(|t| t.rating)) {
        (Some(r1), Some(r2)) => {
            let x = (r1 - r2) / scale;
            if x.is_nan() {
                0.5
            } else {
                sigmoid(x)
            }
        }
        _ => 0.5,
    }
}

/// Explicit probabilities first, then team ratings, then an even prior.
pub struct MatchupResolver<'a> {
    table: &'a MatchupTable,
    teams: &'a HashMap<TeamId, Team>,
    scale: f64,
}

impl<'a> MatchupResolver<'a> {
    pub fn new(
        table: &'a MatchupTable,
        teams: &'a HashMap<TeamId, Team>,
        config: &EngineConfig,
    ) -> Self {
        MatchupResolver {
            table,
            teams,
            scale: config.rating_scale,
        }
    }
}

impl MatchupProbability for MatchupResolver<'_> {
    fn win_prob(&self, game: &str, team: &str, opponent: &str) -> f64 {
        if let Some(prob) = self.table.get(game, team, opponent) {
            return prob;
        }

        trace!(game, team, opponent, "no explicit probability, using ratings");
        rating_win_prob(self.teams.get(team), self.teams.get(opponent), self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_teams() -> HashMap<TeamId, Team> {
        [
            Team::new("A", "A", 1, "East", Some(25.0)),
            Team::new("B", "B", 8, "East", Some(15.0)),
            Team::new("C", "C", 16, "East", None),
        ]
        .into_iter()
        .map(|t| (t.id.clone(), t))
        .collect()
    }

    #[test]
    fn test_sigmoid_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
        assert!((sigmoid(1.0) - 0.7310585786300049).abs() < 1e-12);
        assert!((sigmoid(-1.0) - 0.2689414213699951).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_extremes_do_not_overflow() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(sigmoid(-1000.0).is_finite());
        assert!(sigmoid(-700.0) > 0.0);
    }

    #[test]
    fn test_sigmoid_symmetric() {
        for x in [0.1, 0.5, 2.0, 7.5, 30.0] {
            assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_better_team_favored() {
        let teams = make_teams();
        let table = MatchupTable::new();
        let resolver = MatchupResolver::new(&table, &teams, &EngineConfig::default());

        let prob = resolver.win_prob("g", "A", "B");
        assert!((prob - sigmoid(1.0)).abs() < 1e-12);
        assert!((prob + resolver.win_prob("g", "B", "A") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_is_configurable() {
        let teams = make_teams();
        let table = MatchupTable::new();
        let flat = MatchupResolver::new(&table, &teams, &EngineConfig { rating_scale: 100.0 });
        let steep = MatchupResolver::new(&table, &teams, &EngineConfig { rating_scale: 2.0 });

        let p_flat = flat.win_prob("g", "A", "B");
        let p_steep = steep.win_prob("g", "A", "B");
        assert!(p_flat > 0.5 && p_flat < p_steep);
    }

    #[test]
    fn test_undefined_rating_gap_is_even() {
        let strong = Team::new("A", "Alpha", 1, "East", Some(f64::INFINITY));
        let also_strong = Team::new("B", "Beta", 1, "West", Some(f64::INFINITY));
        let broken = Team::new("C", "Gamma", 2, "East", Some(f64::NAN));
        let weak = Team::new("D", "Delta", 16, "West", Some(-5.0));

        assert_eq!(rating_win_prob(Some(&strong), Some(&also_strong), 10.0), 0.5);
        assert_eq!(rating_win_prob(Some(&broken), Some(&weak), 10.0), 0.5);
        assert_eq!(rating_win_prob(Some(&strong), Some(&weak), 10.0), 1.0);
        assert_eq!(rating_win_prob(Some(&weak), Some(&strong), 10.0), 0.0);
    }

    #[test]
    fn test_unrated_is_even() {
        let teams = make_teams();
        let table = MatchupTable::new();
        let resolver = MatchupResolver::new(&table, &teams, &EngineConfig::default());

        assert_eq!(resolver.win_prob("g", "A", "C"), 0.5);
        assert_eq!(resolver.win_prob("g", "C", "A"), 0.5);
        assert_eq!(resolver.win_prob("g", "A", "unknown"), 0.5);
    }

    #[test]
    fn test_explicit_entry_used() {
        let teams = make_teams();
        let mut table = MatchupTable::new();
        table.insert("g", "B", "A", 0.75).unwrap();
        let resolver = MatchupResolver::new(&table, &teams, &EngineConfig::default());

        assert!((resolver.win_prob("g", "B", "A") - 0.75).abs() < 1e-12);
        assert!((resolver.win_prob("g", "A", "B") - 0.25).abs() < 1e-12);
        // Entry is scoped to its game
        assert!((resolver.win_prob("other", "A", "B") - sigmoid(1.0)).abs() < 1e-12);
    }
}
