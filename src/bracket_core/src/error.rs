use thiserror::Error;

use crate::bracket::SlotPosition;

/// Failures that abort a bracket computation.
///
/// Missing probability data is never an error: it degrades to the rating
/// fallback and then to an even prior. Everything here is structural and
/// means no partial output is produced.
#[derive(Error, Debug)]
pub enum Error {
    #[error("bracket has no games")]
    EmptyBracket,

    #[error("scoring rule set is empty")]
    EmptyScoringRules,

    #[error("invalid team count: expected {expected}, found {found}")]
    InvalidTeamCount { expected: usize, found: usize },

    #[error("game {game} needs the winner of {predecessor}, which has not been computed")]
    PredecessorNotComputed { game: String, predecessor: String },

    #[error("bracket has no championship game")]
    ChampionshipNotFound,

    #[error("bracket has {count} championship games")]
    MultipleChampionshipGames { count: usize },

    #[error("game {game} has no team or feeder game for slot {slot:?}")]
    MissingSlotSource { game: String, slot: SlotPosition },

    #[error("game {game} links to unknown game {next_game}")]
    UnknownGame { game: String, next_game: String },

    #[error("slot {slot:?} of game {game} is fed by both {first} and {second}")]
    DuplicateFeeder {
        game: String,
        slot: SlotPosition,
        first: String,
        second: String,
    },

    #[error("slot {slot:?} of game {game} holds a fixed team but is also fed by {feeder}")]
    FeederIntoFixedSlot {
        game: String,
        slot: SlotPosition,
        feeder: String,
    },

    #[error("team {team} is in region {region}, which is not in the Final Four layout")]
    UnknownRegion { team: String, region: String },

    #[error("region {region} seed {seed}: {reason}")]
    InvalidSeeding {
        region: String,
        seed: u8,
        reason: String,
    },

    #[error("invalid probability {value} for {game}: {team} vs {opponent}")]
    InvalidProbability {
        game: String,
        team: String,
        opponent: String,
        value: String,
    },

    #[error("team {team} cannot be matched against itself in {game}")]
    SelfMatchup { game: String, team: String },

    #[error("rating scale must be a positive number, got {0}")]
    InvalidRatingScale(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures caused by the shape of the inputs to a computation
    /// (the bracket or the scoring rule set), as opposed to bad configuration,
    /// bad matchup data or unreadable input files.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::EmptyBracket
                | Error::EmptyScoringRules
                | Error::InvalidTeamCount { .. }
                | Error::PredecessorNotComputed { .. }
                | Error::ChampionshipNotFound
                | Error::MultipleChampionshipGames { .. }
                | Error::MissingSlotSource { .. }
                | Error::UnknownGame { .. }
                | Error::DuplicateFeeder { .. }
                | Error::FeederIntoFixedSlot { .. }
                | Error::UnknownRegion { .. }
                | Error::InvalidSeeding { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        assert!(Error::EmptyScoringRules.is_structural());
        assert!(Error::MultipleChampionshipGames { count: 2 }.is_structural());
        assert!(Error::FeederIntoFixedSlot {
            game: "final".to_string(),
            slot: SlotPosition::First,
            feeder: "s1".to_string(),
        }
        .is_structural());

        assert!(!Error::InvalidRatingScale("0".to_string()).is_structural());
        assert!(!Error::SelfMatchup {
            game: "g1".to_string(),
            team: "A".to_string(),
        }
        .is_structural());
    }
}
