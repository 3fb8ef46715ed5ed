//! Static bracket description.
//!
//! A bracket is an arena of games addressed by ID. Each game knows only the
//! game its winner advances to (`next_game` + `next_game_slot`); slots that
//! do not hold a fixed team are filled by whichever game links into them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::constants::{FIELD_GAME_COUNT, FIELD_SIZE, ROUND_OF_64_PAIRINGS, SEEDS_PER_REGION};
use crate::error::{Error, Result};
use crate::team::{Team, TeamId};

/// Stable identifier for a game within one bracket.
pub type GameId = String;

/// Tournament round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    FirstFour,
    RoundOf64,
    RoundOf32,
    Sweet16,
    Elite8,
    FinalFour,
    Championship,
}

impl Round {
    pub const ALL: [Round; 7] = [
        Round::FirstFour,
        Round::RoundOf64,
        Round::RoundOf32,
        Round::Sweet16,
        Round::Elite8,
        Round::FinalFour,
        Round::Championship,
    ];

    /// Position of the round in play order, 0 for the First Four.
    pub fn index(self) -> usize {
        match self {
            Round::FirstFour => 0,
            Round::RoundOf64 => 1,
            Round::RoundOf32 => 2,
            Round::Sweet16 => 3,
            Round::Elite8 => 4,
            Round::FinalFour => 5,
            Round::Championship => 6,
        }
    }

    /// Short form used in generated game IDs.
    pub fn slug(self) -> &'static str {
        match self {
            Round::FirstFour => "first-four",
            Round::RoundOf64 => "r64",
            Round::RoundOf32 => "r32",
            Round::Sweet16 => "s16",
            Round::Elite8 => "e8",
            Round::FinalFour => "final-four",
            Round::Championship => "championship",
        }
    }
}

impl Ord for Round {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Round {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One of a game's two input positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotPosition {
    First,
    Second,
}

impl SlotPosition {
    pub const BOTH: [SlotPosition; 2] = [SlotPosition::First, SlotPosition::Second];

    /// Even-indexed feeders go to the first slot, odd-indexed to the second.
    pub fn for_index(i: usize) -> Self {
        if i % 2 == 0 {
            SlotPosition::First
        } else {
            SlotPosition::Second
        }
    }

    pub fn index(self) -> usize {
        match self {
            SlotPosition::First => 0,
            SlotPosition::Second => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub round: Round,

    /// Processing order within the round
    pub sort_order: u32,

    /// Fixed team in slot 1, or `None` when a feeder game fills it
    pub team1: Option<TeamId>,

    /// Fixed team in slot 2, or `None` when a feeder game fills it
    pub team2: Option<TeamId>,

    pub next_game: Option<GameId>,
    pub next_game_slot: Option<SlotPosition>,
}

impl Game {
    pub fn slot(&self, position: SlotPosition) -> Option<&TeamId> {
        match position {
            SlotPosition::First => self.team1.as_ref(),
            SlotPosition::Second => self.team2.as_ref(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub games: Vec<Game>,
}

impl Bracket {
    pub fn new(games: Vec<Game>) -> Self {
        Bracket { games }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn games_in_round(&self, round: Round) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(move |g| g.round == round)
    }
}

/// Which region sits in each corner of the bracket.
///
/// Semifinal 1 pairs the two left regions, semifinal 2 the two right ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalFourConfig {
    pub top_left: String,
    pub bottom_left: String,
    pub top_right: String,
    pub bottom_right: String,
}

impl FinalFourConfig {
    pub fn new(top_left: &str, bottom_left: &str, top_right: &str, bottom_right: &str) -> Self {
        FinalFourConfig {
            top_left: top_left.to_string(),
            bottom_left: bottom_left.to_string(),
            top_right: top_right.to_string(),
            bottom_right: bottom_right.to_string(),
        }
    }

    /// Regions in bracket order.
    pub fn regions(&self) -> [&str; 4] {
        [
            &self.top_left,
            &self.bottom_left,
            &self.top_right,
            &self.bottom_right,
        ]
    }
}

/// Builds the 67-game DAG for a 68-team field.
pub struct BracketBuilder {
    teams: Vec<Team>,
    layout: FinalFourConfig,
}

impl BracketBuilder {
    pub fn new(teams: Vec<Team>, layout: FinalFourConfig) -> Self {
        BracketBuilder { teams, layout }
    }

    pub fn build(&self) -> Result<Bracket> {
        if self.teams.len() != FIELD_SIZE {
            return Err(Error::InvalidTeamCount {
                expected: FIELD_SIZE,
                found: self.teams.len(),
            });
        }

        let regions = self.layout.regions();
        let lines = self.seed_lines(&regions)?;
        let mut games = Vec::with_capacity(FIELD_GAME_COUNT);

        // First Four: one game per doubled seed line
        let mut order = 0;
        for (r, region) in regions.iter().enumerate() {
            for seed in 1..=SEEDS_PER_REGION {
                let line = &lines[&(r, seed)];
                if line.len() != 2 {
                    continue;
                }
                let (pairing, slot) = pairing_position(seed);
                order += 1;
                games.push(Game {
                    id: region_game_id(region, Round::FirstFour, seed as usize),
                    round: Round::FirstFour,
                    sort_order: order,
                    team1: Some(line[0].id.clone()),
                    team2: Some(line[1].id.clone()),
                    next_game: Some(region_game_id(region, Round::RoundOf64, pairing + 1)),
                    next_game_slot: Some(slot),
                });
            }
        }

        let mut order = 0;
        for (r, region) in regions.iter().enumerate() {
            for (i, &(high, low)) in ROUND_OF_64_PAIRINGS.iter().enumerate() {
                order += 1;
                games.push(Game {
                    id: region_game_id(region, Round::RoundOf64, i + 1),
                    round: Round::RoundOf64,
                    sort_order: order,
                    team1: fixed_team(&lines[&(r, high)]),
                    team2: fixed_team(&lines[&(r, low)]),
                    next_game: Some(region_game_id(region, Round::RoundOf32, i / 2 + 1)),
                    next_game_slot: Some(SlotPosition::for_index(i)),
                });
            }
        }

        for (round, next_round, count) in [
            (Round::RoundOf32, Round::Sweet16, 4),
            (Round::Sweet16, Round::Elite8, 2),
        ] {
            let mut order = 0;
            for region in regions.iter() {
                for i in 0..count {
                    order += 1;
                    games.push(Game {
                        id: region_game_id(region, round, i + 1),
                        round,
                        sort_order: order,
                        team1: None,
                        team2: None,
                        next_game: Some(region_game_id(region, next_round, i / 2 + 1)),
                        next_game_slot: Some(SlotPosition::for_index(i)),
                    });
                }
            }
        }

        for (r, region) in regions.iter().enumerate() {
            games.push(Game {
                id: region_game_id(region, Round::Elite8, 1),
                round: Round::Elite8,
                sort_order: r as u32 + 1,
                team1: None,
                team2: None,
                next_game: Some(national_game_id(Round::FinalFour, r / 2 + 1)),
                next_game_slot: Some(SlotPosition::for_index(r)),
            });
        }

        for k in 0..2 {
            games.push(Game {
                id: national_game_id(Round::FinalFour, k + 1),
                round: Round::FinalFour,
                sort_order: k as u32 + 1,
                team1: None,
                team2: None,
                next_game: Some(national_game_id(Round::Championship, 1)),
                next_game_slot: Some(SlotPosition::for_index(k)),
            });
        }

        games.push(Game {
            id: national_game_id(Round::Championship, 1),
            round: Round::Championship,
            sort_order: 1,
            team1: None,
            team2: None,
            next_game: None,
            next_game_slot: None,
        });

        Ok(Bracket::new(games))
    }

    /// Group teams by (region index, seed), checking that every line of every
    /// region holds one team, or two for a play-in.
    fn seed_lines(&self, regions: &[&str; 4]) -> Result<BTreeMap<(usize, u8), Vec<&Team>>> {
        let mut lines: BTreeMap<(usize, u8), Vec<&Team>> = BTreeMap::new();

        for team in &self.teams {
            let r = regions
                .iter()
                .position(|region| *region == team.region)
                .ok_or_else(|| Error::UnknownRegion {
                    team: team.id.clone(),
                    region: team.region.clone(),
                })?;
            if team.seed == 0 || team.seed > SEEDS_PER_REGION {
                return Err(Error::InvalidSeeding {
                    region: team.region.clone(),
                    seed: team.seed,
                    reason: format!("team {} has a seed outside 1-{}", team.id, SEEDS_PER_REGION),
                });
            }
            lines.entry((r, team.seed)).or_default().push(team);
        }

        for (r, region) in regions.iter().enumerate() {
            for seed in 1..=SEEDS_PER_REGION {
                let count = lines.get(&(r, seed)).map_or(0, Vec::len);
                let reason = match count {
                    0 => "no team on this seed line",
                    1 | 2 => continue,
                    _ => "more than two teams on this seed line",
                };
                return Err(Error::InvalidSeeding {
                    region: region.to_string(),
                    seed,
                    reason: reason.to_string(),
                });
            }
        }

        for line in lines.values_mut() {
            line.sort_by(|a, b| a.id.cmp(&b.id));
        }

        Ok(lines)
    }
}

fn fixed_team(line: &[&Team]) -> Option<TeamId> {
    match line {
        [team] => Some(team.id.clone()),
        _ => None,
    }
}

/// Round of 64 game index and slot for a seed line.
fn pairing_position(seed: u8) -> (usize, SlotPosition) {
    for (i, &(high, low)) in ROUND_OF_64_PAIRINGS.iter().enumerate() {
        if high == seed {
            return (i, SlotPosition::First);
        }
        if low == seed {
            return (i, SlotPosition::Second);
        }
    }
    unreachable!("every seed 1-16 appears in the round of 64 pairings")
}

fn region_game_id(region: &str, round: Round, n: usize) -> GameId {
    format!("{}-{}-{}", region, round.slug(), n)
}

fn national_game_id(round: Round, n: usize) -> GameId {
    match round {
        Round::Championship => round.slug().to_string(),
        _ => format!("{}-{}", round.slug(), n),
    }
}
