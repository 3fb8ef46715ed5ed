//! Bracket Core - win probability propagation for 68-team brackets.
//!
//! Pushes head-to-head win probabilities through a single-elimination
//! bracket to get each team's chance of reaching every round, then turns
//! those into expected pool points and proportional investment figures.
//! Optional Python bindings live behind the `python` feature.

pub mod allocation;
pub mod bracket;
pub mod config;
pub mod constants;
pub mod error;
pub mod game_transform;
pub mod matchups;
pub mod portfolio;
pub mod scoring;
pub mod team;
pub mod tournament;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
mod test_support;

pub use allocation::{
    advancement_probabilities, predicted_vs_rational_delta, rational_investment,
    total_positive_expected_value, valuations, AdvancementProbabilities, TeamValuation,
};
pub use bracket::{Bracket, BracketBuilder, FinalFourConfig, Game, GameId, Round, SlotPosition};
pub use config::EngineConfig;
pub use constants::{calcutta_points, DEFAULT_RATING_SCALE, FIELD_SIZE, ROUND_POINTS};
pub use error::{Error, Result};
pub use game_transform::{game_transform_prob, WinnerDistribution};
pub use matchups::MatchupTable;
pub use portfolio::{
    game_outcome_delta, portfolio_rating_deltas, portfolio_value, team_rating_delta,
    team_rating_deltas, GameDelta, TeamDelta,
};
pub use scoring::{
    calcutta_scoring_rules, expected_value, expected_values, p_at_least, standard_scoring_rules,
    ScoringRule,
};
pub use team::{Team, TeamId};
pub use tournament::{propagate, ReachTable, RoundReach, TournamentState};
pub use win_prob::{rating_win_prob, sigmoid, MatchupProbability, MatchupResolver};
