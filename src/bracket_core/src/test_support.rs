//! Shared fixtures for unit tests.

use crate::bracket::{Bracket, BracketBuilder, FinalFourConfig, Game, Round, SlotPosition};
use crate::team::Team;

pub const REGIONS: [&str; 4] = ["East", "West", "South", "Midwest"];

pub fn standard_layout() -> FinalFourConfig {
    FinalFourConfig::new(REGIONS[0], REGIONS[1], REGIONS[2], REGIONS[3])
}

/// 68 rated teams, IDs `"{region}-{seed}"`. The East and West 16 lines and
/// the South and Midwest 11 lines each hold a second team, `"{region}-{seed}b"`.
pub fn full_field() -> Vec<Team> {
    let mut teams = Vec::with_capacity(68);
    for (r, region) in REGIONS.iter().enumerate() {
        for seed in 1..=16u8 {
            let rating = 30.0 - 1.75 * seed as f64 - 0.5 * r as f64;
            let id = format!("{}-{}", region, seed);
            teams.push(Team::new(&id, &format!("{} {}", region, seed), seed, region, Some(rating)));
        }
    }
    for (region, seed) in [("East", 16u8), ("West", 16), ("South", 11), ("Midwest", 11)] {
        let rating = 30.0 - 1.75 * seed as f64 - 1.0;
        let id = format!("{}-{}b", region, seed);
        teams.push(Team::new(&id, &format!("{} {} b", region, seed), seed, region, Some(rating)));
    }
    teams
}

pub fn unrated(teams: Vec<Team>) -> Vec<Team> {
    teams
        .into_iter()
        .map(|t| Team { rating: None, ..t })
        .collect()
}

pub fn full_bracket() -> Bracket {
    match BracketBuilder::new(full_field(), standard_layout()).build() {
        Ok(bracket) => bracket,
        Err(e) => panic!("fixture bracket failed to build: {}", e),
    }
}

/// Four teams: semifinals A vs B and C vs D, then a championship game.
pub fn four_team_bracket() -> (Bracket, Vec<Team>) {
    let teams = vec![
        Team::new("A", "Alpha", 1, "North", Some(20.0)),
        Team::new("B", "Bravo", 4, "North", Some(10.0)),
        Team::new("C", "Charlie", 2, "South", Some(15.0)),
        Team::new("D", "Delta", 3, "South", Some(12.0)),
    ];
    let games = vec![
        Game {
            id: "semi-1".to_string(),
            round: Round::FinalFour,
            sort_order: 1,
            team1: Some("A".to_string()),
            team2: Some("B".to_string()),
            next_game: Some("final".to_string()),
            next_game_slot: Some(SlotPosition::First),
        },
        Game {
            id: "semi-2".to_string(),
            round: Round::FinalFour,
            sort_order: 2,
            team1: Some("C".to_string()),
            team2: Some("D".to_string()),
            next_game: Some("final".to_string()),
            next_game_slot: Some(SlotPosition::Second),
        },
        Game {
            id: "final".to_string(),
            round: Round::Championship,
            sort_order: 1,
            team1: None,
            team2: None,
            next_game: None,
            next_game_slot: None,
        },
    ];
    (Bracket::new(games), teams)
}
