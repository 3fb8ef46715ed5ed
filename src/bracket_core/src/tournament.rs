use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::allocation::{self, AdvancementProbabilities, TeamValuation};
use crate::bracket::{Bracket, Game, Round, SlotPosition};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::game_transform::{fixed, game_transform_prob, WinnerDistribution};
use crate::matchups::MatchupTable;
use crate::scoring::{self, ScoringRule};
use crate::team::{Team, TeamId};
use crate::win_prob::{MatchupProbability, MatchupResolver};

/// Probability of a team being alive at each round boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundReach {
    /// Participation: 1.0 for every team placed in the bracket, whether or
    /// not it plays a First Four game.
    pub first_four: f64,
    pub round_of_64: f64,
    pub round_of_32: f64,
    pub sweet_16: f64,
    pub elite_8: f64,
    pub final_four: f64,
    /// Reaching the championship game
    pub championship: f64,
    /// Winning the championship game
    pub win_championship: f64,
}

impl RoundReach {
    fn participating() -> Self {
        RoundReach {
            first_four: 1.0,
            ..Default::default()
        }
    }

    /// Probability of appearing in a game of `round`.
    pub fn reach(&self, round: Round) -> f64 {
        match round {
            Round::FirstFour => self.first_four,
            Round::RoundOf64 => self.round_of_64,
            Round::RoundOf32 => self.round_of_32,
            Round::Sweet16 => self.sweet_16,
            Round::Elite8 => self.elite_8,
            Round::FinalFour => self.final_four,
            Round::Championship => self.championship,
        }
    }

    fn reach_mut(&mut self, round: Round) -> &mut f64 {
        match round {
            Round::FirstFour => &mut self.first_four,
            Round::RoundOf64 => &mut self.round_of_64,
            Round::RoundOf32 => &mut self.round_of_32,
            Round::Sweet16 => &mut self.sweet_16,
            Round::Elite8 => &mut self.elite_8,
            Round::FinalFour => &mut self.final_four,
            Round::Championship => &mut self.championship,
        }
    }
}

/// Per-team reach probabilities for one bracket.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReachTable {
    entries: BTreeMap<TeamId, RoundReach>,
    first_four: BTreeSet<TeamId>,
}

impl ReachTable {
    pub fn get(&self, team: &str) -> Option<&RoundReach> {
        self.entries.get(team)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamId, &RoundReach)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the team occupied a First Four slot.
    pub fn played_first_four(&self, team: &str) -> bool {
        self.first_four.contains(team)
    }

    /// Total championship-winning mass; 1.0 for a well-formed bracket.
    pub fn championship_mass(&self) -> f64 {
        self.entries.values().map(|r| r.win_championship).sum()
    }

    fn entry(&mut self, team: &str) -> &mut RoundReach {
        self.entries
            .entry(team.to_string())
            .or_insert_with(RoundReach::participating)
    }

    fn credit(&mut self, round: Round, dist: &WinnerDistribution) {
        for (team, &mass) in dist {
            if round == Round::FirstFour {
                self.first_four.insert(team.clone());
            } else {
                *self.entry(team).reach_mut(round) += mass;
            }
        }
    }
}

/// Feeder games of each game's two slots, inverted from the forward links.
type FeederIndex<'a> = HashMap<&'a str, [Option<&'a str>; 2]>;

fn feeder_index(bracket: &Bracket) -> Result<FeederIndex<'_>> {
    let mut index: FeederIndex = bracket
        .games
        .iter()
        .map(|g| (g.id.as_str(), [None, None]))
        .collect();

    for game in &bracket.games {
        let (next, slot) = match (&game.next_game, game.next_game_slot) {
            (Some(next), Some(slot)) => (next, slot),
            _ => continue,
        };
        let feeders = index
            .get_mut(next.as_str())
            .ok_or_else(|| Error::UnknownGame {
                game: game.id.clone(),
                next_game: next.clone(),
            })?;
        let cell = &mut feeders[slot.index()];
        if let Some(first) = *cell {
            return Err(Error::DuplicateFeeder {
                game: next.clone(),
                slot,
                first: first.to_string(),
                second: game.id.clone(),
            });
        }
        *cell = Some(game.id.as_str());
    }

    Ok(index)
}

/// Occupant distribution of one slot. A slot is either fixed or fed, never
/// both. A feeder's winner distribution has a single consumer, so it is
/// moved out of `winners` here.
fn slot_distribution(
    game: &Game,
    slot: SlotPosition,
    feeders: &FeederIndex<'_>,
    winners: &mut HashMap<String, WinnerDistribution>,
) -> Result<WinnerDistribution> {
    let feeder = feeders.get(game.id.as_str()).and_then(|f| f[slot.index()]);

    let feeder = match (game.slot(slot), feeder) {
        (Some(_), Some(feeder)) => {
            return Err(Error::FeederIntoFixedSlot {
                game: game.id.clone(),
                slot,
                feeder: feeder.to_string(),
            });
        }
        (Some(team), None) => return Ok(fixed(team)),
        (None, Some(feeder)) => feeder,
        (None, None) => {
            return Err(Error::MissingSlotSource {
                game: game.id.clone(),
                slot,
            });
        }
    };

    winners
        .remove(feeder)
        .ok_or_else(|| Error::PredecessorNotComputed {
            game: game.id.clone(),
            predecessor: feeder.to_string(),
        })
}

/// Propagate winner distributions through the bracket.
///
/// Games are played in (round, sort order, ID) order; every feeder game must
/// come before the game it feeds. Each team that could appear in a game is
/// credited with reaching that game's round, weighted by how likely it is to
/// be there.
pub fn propagate<P: MatchupProbability + ?Sized>(
    bracket: &Bracket,
    probs: &P,
) -> Result<ReachTable> {
    if bracket.is_empty() {
        return Err(Error::EmptyBracket);
    }
    match bracket.games_in_round(Round::Championship).count() {
        0 => return Err(Error::ChampionshipNotFound),
        1 => {}
        count => return Err(Error::MultipleChampionshipGames { count }),
    }

    let feeders = feeder_index(bracket)?;

    let mut order: Vec<&Game> = bracket.games.iter().collect();
    order.sort_by(|a, b| (a.round, a.sort_order, &a.id).cmp(&(b.round, b.sort_order, &b.id)));

    let mut table = ReachTable::default();
    for game in &order {
        for team in SlotPosition::BOTH.into_iter().filter_map(|s| game.slot(s)) {
            table.entry(team);
        }
    }

    let mut winners: HashMap<String, WinnerDistribution> = HashMap::with_capacity(bracket.len());

    for game in order {
        let slot1 = slot_distribution(game, SlotPosition::First, &feeders, &mut winners)?;
        let slot2 = slot_distribution(game, SlotPosition::Second, &feeders, &mut winners)?;

        table.credit(game.round, &slot1);
        table.credit(game.round, &slot2);

        let dist = game_transform_prob(&game.id, &slot1, &slot2, probs);

        if game.round == Round::Championship {
            for (team, &mass) in &dist {
                table.entry(team).win_championship = mass;
            }
        }

        winners.insert(game.id.clone(), dist);
    }

    debug!(
        games = bracket.len(),
        teams = table.len(),
        championship_mass = table.championship_mass(),
        "propagated bracket"
    );

    Ok(table)
}

/// Tournament state: bracket, team ratings, explicit probabilities and config.
#[derive(Clone, Debug)]
pub struct TournamentState {
    pub bracket: Bracket,

    /// Team lookup (ratings, seeds, names)
    pub teams: HashMap<TeamId, Team>,

    /// Explicit matchup probabilities
    pub matchups: MatchupTable,

    pub config: EngineConfig,
}

impl TournamentState {
    pub fn new(
        bracket: Bracket,
        teams: Vec<Team>,
        matchups: MatchupTable,
        config: EngineConfig,
    ) -> Self {
        TournamentState {
            bracket,
            teams: teams.into_iter().map(|t| (t.id.clone(), t)).collect(),
            matchups,
            config,
        }
    }

    pub fn resolver(&self) -> MatchupResolver<'_> {
        MatchupResolver::new(&self.matchups, &self.teams, &self.config)
    }

    /// Reach probabilities for every team in the bracket.
    pub fn round_reach(&self) -> Result<ReachTable> {
        propagate(&self.bracket, &self.resolver())
    }

    /// Expected points for every team under `rules`.
    pub fn expected_values(&self, rules: &[ScoringRule]) -> Result<BTreeMap<TeamId, f64>> {
        if rules.is_empty() {
            return Err(Error::EmptyScoringRules);
        }
        let reach = self.round_reach()?;
        scoring::expected_values(&reach, rules)
    }

    /// Expected value and rational investment per team, in presentation order.
    pub fn valuations(
        &self,
        rules: &[ScoringRule],
        pool_size: f64,
        predicted: Option<&HashMap<TeamId, f64>>,
    ) -> Result<Vec<TeamValuation>> {
        let values = self.expected_values(rules)?;
        Ok(allocation::valuations(&values, &self.teams, pool_size, predicted))
    }

    /// Advancement probabilities per team, in presentation order.
    pub fn advancement(&self) -> Result<Vec<AdvancementProbabilities>> {
        let reach = self.round_reach()?;
        Ok(allocation::advancement_probabilities(&reach, &self.teams))
    }

    /// Get all teams placed in the bracket.
    pub fn bracket_teams(&self) -> Vec<TeamId> {
        let mut teams: BTreeSet<&TeamId> = BTreeSet::new();
        for game in &self.bracket.games {
            teams.extend(SlotPosition::BOTH.into_iter().filter_map(|s| game.slot(s)));
        }
        teams.into_iter().cloned().collect()
    }

    /// Create a modified copy with an explicit matchup probability added
    pub fn with_matchup(&self, game: &str, team: &str, opponent: &str, prob: f64) -> Result<Self> {
        let mut new_state = self.clone();
        new_state.matchups.insert(game, team, opponent, prob)?;
        Ok(new_state)
    }

    /// Create a modified copy with a team's rating adjusted
    pub fn with_team_adjustment(&self, team_id: &str, point_delta: f64) -> Self {
        let mut new_state = self.clone();
        if let Some(team) = new_state.teams.get_mut(team_id) {
            *team = team.with_adjustment(point_delta);
        }
        new_state
    }
}
