use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::scoring::ScoringRule;
use crate::team::TeamId;
use crate::tournament::TournamentState;

/// Swing in one holding's value across a single game outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamDelta {
    pub team: TeamId,
    pub position: f64,
    pub delta_per_share: f64,
    pub total_delta: f64,
}

impl TeamDelta {
    pub fn new(team: TeamId, position: f64, delta_per_share: f64) -> Self {
        TeamDelta {
            team,
            position,
            delta_per_share,
            total_delta: position * delta_per_share,
        }
    }
}

/// Outcome of [`game_outcome_delta`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameDelta {
    /// Portfolio value if `team` wins
    pub win_value: f64,
    /// Portfolio value if `team` loses
    pub loss_value: f64,
    /// Per-holding breakdown, ordered by team ID
    pub team_deltas: Vec<TeamDelta>,
}

/// Calculate portfolio value given holdings and per-team expected values.
///
/// # Arguments
/// * `holdings` - Shares (or ownership fraction) held per team
/// * `values` - Expected points per team
pub fn portfolio_value(holdings: &HashMap<TeamId, f64>, values: &BTreeMap<TeamId, f64>) -> f64 {
    let mut held: Vec<(&TeamId, &f64)> = holdings.iter().collect();
    held.sort_by(|a, b| a.0.cmp(b.0));
    held.into_iter()
        .map(|(team, &shares)| shares * values.get(team).copied().unwrap_or(0.0))
        .sum()
}

/// Impact of a single matchup outcome on portfolio value.
///
/// The matchup is forced to a certain win and then a certain loss for
/// `team`; everything else keeps its current probabilities.
pub fn game_outcome_delta(
    state: &TournamentState,
    rules: &[ScoringRule],
    holdings: &HashMap<TeamId, f64>,
    game: &str,
    team: &str,
    opponent: &str,
) -> Result<GameDelta> {
    let win_scores = state.with_matchup(game, team, opponent, 1.0)?.expected_values(rules)?;
    let loss_scores = state.with_matchup(game, team, opponent, 0.0)?.expected_values(rules)?;

    let mut team_deltas: Vec<TeamDelta> = holdings
        .iter()
        .map(|(held, &shares)| {
            let win = win_scores.get(held).copied().unwrap_or(0.0);
            let loss = loss_scores.get(held).copied().unwrap_or(0.0);
            TeamDelta::new(held.clone(), shares, win - loss)
        })
        .collect();
    team_deltas.sort_by(|a, b| a.team.cmp(&b.team));

    Ok(GameDelta {
        win_value: portfolio_value(holdings, &win_scores),
        loss_value: portfolio_value(holdings, &loss_scores),
        team_deltas,
    })
}

/// Change in every team's expected value when `team`'s rating moves from
/// `-point_delta` to `+point_delta`.
pub fn team_rating_delta(
    state: &TournamentState,
    rules: &[ScoringRule],
    team: &str,
    point_delta: f64,
) -> Result<BTreeMap<TeamId, f64>> {
    let positive = state.with_team_adjustment(team, point_delta).expected_values(rules)?;
    let negative = state.with_team_adjustment(team, -point_delta).expected_values(rules)?;

    Ok(positive
        .iter()
        .map(|(name, pos)| (name.clone(), pos - negative.get(name).copied().unwrap_or(0.0)))
        .collect())
}

/// Rating sensitivity for every team in the bracket.
///
/// Each team's pair of propagations is independent, so teams are evaluated
/// in parallel. Returns `team -> (affected team -> EV change)`.
pub fn team_rating_deltas(
    state: &TournamentState,
    rules: &[ScoringRule],
    point_delta: f64,
) -> Result<BTreeMap<TeamId, BTreeMap<TeamId, f64>>> {
    state
        .bracket_teams()
        .par_iter()
        .map(|team| -> Result<(TeamId, BTreeMap<TeamId, f64>)> {
            Ok((team.clone(), team_rating_delta(state, rules, team, point_delta)?))
        })
        .collect()
}

/// Portfolio sensitivity to each team's rating, in parallel.
pub fn portfolio_rating_deltas(
    state: &TournamentState,
    rules: &[ScoringRule],
    holdings: &HashMap<TeamId, f64>,
    point_delta: f64,
) -> Result<BTreeMap<TeamId, f64>> {
    let pairwise = team_rating_deltas(state, rules, point_delta)?;
    Ok(pairwise
        .into_iter()
        .map(|(team, deltas)| (team, portfolio_value(holdings, &deltas)))
        .collect())
}
