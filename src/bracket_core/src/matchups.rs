use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};

/// (game, team, opponent)
pub type MatchupKey = (String, String, String);

/// Explicit win probabilities for specific pairings in specific games.
///
/// Both directions of a matchup are stored when it is inserted, so a lookup
/// never has to flip a probability and the two directions cannot drift apart.
#[derive(Clone, Debug, Default)]
pub struct MatchupTable {
    probs: HashMap<MatchupKey, f64>,
}

impl MatchupTable {
    pub fn new() -> Self {
        MatchupTable {
            probs: HashMap::new(),
        }
    }

    /// Read matchups from a CSV file.
    /// Format: game_id,team,opponent,probability
    pub fn read_from_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<()> {
        let file = File::open(filepath)?;
        self.read_lines(BufReader::new(file))
    }

    /// Same as [`MatchupTable::read_from_file`], from in-memory CSV text.
    pub fn read_from_str(&mut self, csv: &str) -> Result<()> {
        self.read_lines(csv.as_bytes())
    }

    fn read_lines<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() != 4 {
                warn!(line = lineno + 1, fields = parts.len(), "skipping malformed matchup line");
                continue;
            }

            let (game, team, opponent) = (parts[0], parts[1], parts[2]);
            let prob: f64 = parts[3].parse().map_err(|_| Error::InvalidProbability {
                game: game.to_string(),
                team: team.to_string(),
                opponent: opponent.to_string(),
                value: parts[3].to_string(),
            })?;

            self.insert(game, team, opponent, prob)?;
        }

        Ok(())
    }

    /// Add or update the probability that `team` beats `opponent` in `game`.
    /// The reverse pairing is stored as `1 - prob`.
    pub fn insert(&mut self, game: &str, team: &str, opponent: &str, prob: f64) -> Result<()> {
        if team == opponent {
            return Err(Error::SelfMatchup {
                game: game.to_string(),
                team: team.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&prob) {
            return Err(Error::InvalidProbability {
                game: game.to_string(),
                team: team.to_string(),
                opponent: opponent.to_string(),
                value: prob.to_string(),
            });
        }
        self.probs.insert(key(game, team, opponent), prob);
        self.probs.insert(key(game, opponent, team), 1.0 - prob);
        Ok(())
    }

    /// Remove a matchup in both directions.
    pub fn remove(&mut self, game: &str, team: &str, opponent: &str) {
        self.probs.remove(&key(game, team, opponent));
        self.probs.remove(&key(game, opponent, team));
    }

    /// Probability of `team` beating `opponent` in `game`, if one was supplied.
    pub fn get(&self, game: &str, team: &str, opponent: &str) -> Option<f64> {
        self.probs.get(&key(game, team, opponent)).copied()
    }

    pub fn contains(&self, game: &str, team: &str, opponent: &str) -> bool {
        self.probs.contains_key(&key(game, team, opponent))
    }

    /// Number of distinct matchups (each counted once, not per direction).
    pub fn len(&self) -> usize {
        self.probs.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

fn key(game: &str, team: &str, opponent: &str) -> MatchupKey {
    (game.to_string(), team.to_string(), opponent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_stores_both_directions() {
        let mut table = MatchupTable::new();
        table.insert("g1", "A", "B", 0.7).unwrap();

        assert_eq!(table.get("g1", "A", "B"), Some(0.7));
        assert!((table.get("g1", "B", "A").unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_keyed_by_game() {
        let mut table = MatchupTable::new();
        table.insert("g1", "A", "B", 0.7).unwrap();
        assert_eq!(table.get("g2", "A", "B"), None);
        assert!(!table.contains("g2", "B", "A"));
    }

    #[test]
    fn test_update_overwrites_reciprocal() {
        let mut table = MatchupTable::new();
        table.insert("g1", "A", "B", 0.7).unwrap();
        table.insert("g1", "B", "A", 0.9).unwrap();
        assert!((table.get("g1", "A", "B").unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_clears_both_directions() {
        let mut table = MatchupTable::new();
        table.insert("g1", "A", "B", 0.6).unwrap();
        table.remove("g1", "B", "A");
        assert!(table.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut table = MatchupTable::new();
        assert!(matches!(
            table.insert("g1", "A", "B", 1.5),
            Err(Error::InvalidProbability { .. })
        ));
        assert!(table.insert("g1", "A", "B", f64::NAN).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_rejects_self_matchup() {
        let mut table = MatchupTable::new();
        assert!(matches!(
            table.insert("g1", "A", "A", 0.7),
            Err(Error::SelfMatchup { .. })
        ));
        assert_eq!(table.get("g1", "A", "A"), None);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_from_str() {
        let csv = "g1, A, B, 0.8\n\ng2,C,D\ng3,E,F,0.25\n";
        let mut table = MatchupTable::new();
        table.read_from_str(csv).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("g1", "A", "B"), Some(0.8));
        assert_eq!(table.get("g3", "F", "E"), Some(0.75));
        assert_eq!(table.get("g2", "C", "D"), None);
    }

    #[test]
    fn test_read_rejects_bad_probability() {
        let mut table = MatchupTable::new();
        let err = table.read_from_str("g1,A,B,likely\n").unwrap_err();
        assert!(matches!(err, Error::InvalidProbability { .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let mut table = MatchupTable::new();
        let err = table.read_from_file("/nonexistent/matchups.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
