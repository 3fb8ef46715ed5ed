//! Python bindings, built with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::allocation;
use crate::bracket::{BracketBuilder, FinalFourConfig};
use crate::config::EngineConfig;
use crate::constants::DEFAULT_RATING_SCALE;
use crate::error::Error;
use crate::matchups::MatchupTable;
use crate::scoring::ScoringRule;
use crate::team::Team;
use crate::tournament::TournamentState;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// A 68-team field with its matchup probabilities.
#[pyclass(name = "Tournament")]
pub struct PyTournament {
    state: TournamentState,
}

#[pymethods]
impl PyTournament {
    /// Build the bracket from `(id, name, seed, region, rating)` tuples and
    /// the regions in top-left, bottom-left, top-right, bottom-right order.
    #[new]
    #[pyo3(signature = (teams, final_four, rating_scale = DEFAULT_RATING_SCALE))]
    fn new(
        teams: Vec<(String, String, u8, String, Option<f64>)>,
        final_four: Vec<String>,
        rating_scale: f64,
    ) -> PyResult<Self> {
        let layout = match final_four.as_slice() {
            [tl, bl, tr, br] => FinalFourConfig::new(tl, bl, tr, br),
            _ => {
                return Err(PyValueError::new_err(format!(
                    "final_four needs 4 regions, got {}",
                    final_four.len()
                )))
            }
        };
        let teams: Vec<Team> = teams
            .into_iter()
            .map(|(id, name, seed, region, rating)| Team::new(&id, &name, seed, &region, rating))
            .collect();

        let config = EngineConfig::new(rating_scale)?;
        let bracket = BracketBuilder::new(teams.clone(), layout).build()?;
        Ok(PyTournament {
            state: TournamentState::new(bracket, teams, MatchupTable::new(), config),
        })
    }

    /// Set the probability that `team` beats `opponent` in `game_id`.
    fn add_matchup(
        &mut self,
        game_id: &str,
        team: &str,
        opponent: &str,
        prob: f64,
    ) -> PyResult<()> {
        self.state.matchups.insert(game_id, team, opponent, prob)?;
        Ok(())
    }

    /// Load matchups from a `game_id,team,opponent,probability` CSV file.
    fn read_matchups(&mut self, filepath: &str) -> PyResult<()> {
        self.state.matchups.read_from_file(filepath)?;
        Ok(())
    }

    /// Game IDs in the generated bracket.
    fn game_ids(&self) -> Vec<String> {
        self.state.bracket.games.iter().map(|g| g.id.clone()).collect()
    }

    /// Map of team ID to `[first_four, r64, r32, s16, e8, final_four,
    /// championship, win_championship]`.
    fn round_reach(&self) -> PyResult<HashMap<String, Vec<f64>>> {
        let reach = self.state.round_reach()?;
        Ok(reach
            .iter()
            .map(|(team, r)| {
                (
                    team.clone(),
                    vec![
                        r.first_four,
                        r.round_of_64,
                        r.round_of_32,
                        r.sweet_16,
                        r.elite_8,
                        r.final_four,
                        r.championship,
                        r.win_championship,
                    ],
                )
            })
            .collect())
    }

    /// Expected points per team for `(win_index, points)` rules.
    fn expected_values(&self, rules: Vec<(i32, f64)>) -> PyResult<HashMap<String, f64>> {
        let rules: Vec<ScoringRule> = rules
            .into_iter()
            .map(|(i, p)| ScoringRule::new(i, p))
            .collect();
        Ok(self.state.expected_values(&rules)?.into_iter().collect())
    }

    fn __repr__(&self) -> String {
        format!(
            "Tournament({} teams, {} games)",
            self.state.teams.len(),
            self.state.bracket.len()
        )
    }
}

#[pyfunction]
fn rational_investment(expected_value: f64, total_expected_value: f64, pool_size: f64) -> f64 {
    allocation::rational_investment(expected_value, total_expected_value, pool_size)
}

#[pyfunction]
fn predicted_vs_rational_delta(predicted: f64, rational: f64) -> f64 {
    allocation::predicted_vs_rational_delta(predicted, rational)
}

/// Python module definition
#[pymodule]
fn bracket_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTournament>()?;

    m.add_function(wrap_pyfunction!(rational_investment, m)?)?;
    m.add_function(wrap_pyfunction!(predicted_vs_rational_delta, m)?)?;

    m.add("DEFAULT_RATING_SCALE", DEFAULT_RATING_SCALE)?;

    Ok(())
}
