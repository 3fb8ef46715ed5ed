//! Derived metrics: proportional ("rational") investment, deviation of a
//! predicted allocation from it, and advancement tables for presentation.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::team::{Team, TeamId};
use crate::tournament::ReachTable;

/// Share of `pool_size` proportional to expected value.
///
/// Zero for non-positive expected value, total, or pool.
pub fn rational_investment(expected_value: f64, total_expected_value: f64, pool_size: f64) -> f64 {
    if expected_value <= 0.0 || total_expected_value <= 0.0 || pool_size <= 0.0 {
        return 0.0;
    }
    expected_value / total_expected_value * pool_size
}

/// Sum of the positive expected values in the field.
pub fn total_positive_expected_value<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    values.into_iter().copied().filter(|&v| v > 0.0).sum()
}

/// Percentage by which `predicted` exceeds `rational`; zero when there is
/// no positive baseline.
pub fn predicted_vs_rational_delta(predicted: f64, rational: f64) -> f64 {
    if rational <= 0.0 {
        return 0.0;
    }
    (predicted - rational) / rational * 100.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamValuation {
    pub team_id: TeamId,
    pub name: String,
    pub seed: u8,
    pub region: String,
    pub expected_value: f64,
    pub rational_investment: f64,
    pub predicted_investment: Option<f64>,
    /// Percent deviation of the predicted investment from the rational one
    pub delta_percent: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvancementProbabilities {
    pub team_id: TeamId,
    pub name: String,
    pub seed: u8,
    pub region: String,
    pub first_four: f64,
    pub round_of_64: f64,
    pub round_of_32: f64,
    pub sweet_16: f64,
    pub elite_8: f64,
    pub final_four: f64,
    pub championship: f64,
    pub win_championship: f64,
    /// Probability of winning the play-in game, given a First Four slot
    pub prob_pi: f64,
}

/// Descending by `primary`, then seed ascending, then name ascending.
fn presentation_order(a: (f64, u8, &str), b: (f64, u8, &str)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then(a.1.cmp(&b.1))
        .then_with(|| a.2.cmp(b.2))
}

fn describe<'a>(teams: &'a HashMap<TeamId, Team>, id: &'a str) -> (&'a str, u8, &'a str) {
    match teams.get(id) {
        Some(team) => (team.name.as_str(), team.seed, team.region.as_str()),
        None => (id, 0, ""),
    }
}

/// Rational investment for every team, with the predicted deviation when a
/// predicted allocation is supplied. Sorted by expected value.
pub fn valuations(
    values: &BTreeMap<TeamId, f64>,
    teams: &HashMap<TeamId, Team>,
    pool_size: f64,
    predicted: Option<&HashMap<TeamId, f64>>,
) -> Vec<TeamValuation> {
    let total = total_positive_expected_value(values.values());

    let mut rows: Vec<TeamValuation> = values
        .iter()
        .map(|(id, &ev)| {
            let (name, seed, region) = describe(teams, id);
            let rational = rational_investment(ev, total, pool_size);
            let predicted_investment = predicted.and_then(|p| p.get(id).copied());
            TeamValuation {
                team_id: id.clone(),
                name: name.to_string(),
                seed,
                region: region.to_string(),
                expected_value: ev,
                rational_investment: rational,
                predicted_investment,
                delta_percent: predicted_investment
                    .map(|p| predicted_vs_rational_delta(p, rational)),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        presentation_order(
            (a.expected_value, a.seed, a.name.as_str()),
            (b.expected_value, b.seed, b.name.as_str()),
        )
    });
    rows
}

/// Reach table restated per team, sorted by title probability.
pub fn advancement_probabilities(
    reach: &ReachTable,
    teams: &HashMap<TeamId, Team>,
) -> Vec<AdvancementProbabilities> {
    let mut rows: Vec<AdvancementProbabilities> = reach
        .iter()
        .map(|(id, r)| {
            let (name, seed, region) = describe(teams, id);
            let prob_pi = if reach.played_first_four(id) && r.first_four > 0.0 {
                r.round_of_64 / r.first_four
            } else {
                0.0
            };
            AdvancementProbabilities {
                team_id: id.clone(),
                name: name.to_string(),
                seed,
                region: region.to_string(),
                first_four: r.first_four,
                round_of_64: r.round_of_64,
                round_of_32: r.round_of_32,
                sweet_16: r.sweet_16,
                elite_8: r.elite_8,
                final_four: r.final_four,
                championship: r.championship,
                win_championship: r.win_championship,
                prob_pi,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        presentation_order(
            (a.win_championship, a.seed, a.name.as_str()),
            (b.win_championship, b.seed, b.name.as_str()),
        )
    });
    rows
}
