//! Expected points from reach probabilities.
//!
//! Points are earned for surviving through a round, so a champion collects
//! every rule whose win index it has cleared, not only the last one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{calcutta_points, MAX_WIN_INDEX, ROUND_POINTS};
use crate::error::{Error, Result};
use crate::team::TeamId;
use crate::tournament::{ReachTable, RoundReach};

/// Points awarded for having won `win_index` games.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub win_index: i32,
    pub points: f64,
}

impl ScoringRule {
    pub fn new(win_index: i32, points: f64) -> Self {
        ScoringRule { win_index, points }
    }
}

/// Probability of clearing `win_index`.
///
/// 0 is participation, 1 through 6 are reaching the round of 64 through the
/// championship game, 7 is winning the title. Anything else is never reached.
pub fn p_at_least(reach: &RoundReach, win_index: i32) -> f64 {
    match win_index {
        0 => 1.0,
        1 => reach.round_of_64,
        2 => reach.round_of_32,
        3 => reach.sweet_16,
        4 => reach.elite_8,
        5 => reach.final_four,
        6 => reach.championship,
        7 => reach.win_championship,
        _ => 0.0,
    }
}

pub fn expected_value(reach: &RoundReach, rules: &[ScoringRule]) -> f64 {
    rules
        .iter()
        .map(|rule| rule.points * p_at_least(reach, rule.win_index))
        .sum()
}

/// Expected points for every team in the table.
pub fn expected_values(reach: &ReachTable, rules: &[ScoringRule]) -> Result<BTreeMap<TeamId, f64>> {
    if rules.is_empty() {
        return Err(Error::EmptyScoringRules);
    }
    Ok(reach
        .iter()
        .map(|(team, r)| (team.clone(), expected_value(r, rules)))
        .collect())
}

/// One point per game won in the first two rounds, then 2, 2, 2, 3.
pub fn standard_scoring_rules() -> Vec<ScoringRule> {
    rules_from_round_points(&ROUND_POINTS)
}

pub fn calcutta_scoring_rules() -> Vec<ScoringRule> {
    rules_from_round_points(&calcutta_points())
}

/// Map per-round points (round of 64 first) onto win indices 2..=7.
fn rules_from_round_points(points: &[f64]) -> Vec<ScoringRule> {
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| ScoringRule::new(MAX_WIN_INDEX - points.len() as i32 + 1 + i as i32, p))
        .collect()
}
