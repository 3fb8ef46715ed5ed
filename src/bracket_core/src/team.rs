use serde::{Deserialize, Serialize};

/// Stable identifier for a team within one bracket.
pub type TeamId = String;

/// Team placed in the bracket.
///
/// The rating is only consulted by the fallback win probability model, when
/// no explicit matchup probability is available.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,

    pub name: String,

    /// Seed line within the region (1-16). Two teams share a line when they
    /// meet in a First Four game.
    pub seed: u8,

    pub region: String,

    /// Strength rating (e.g. adjusted efficiency margin)
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Team {
    pub fn new(id: &str, name: &str, seed: u8, region: &str, rating: Option<f64>) -> Self {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            seed,
            region: region.to_string(),
            rating,
        }
    }

    /// Create a team with its rating shifted by `point_adjustment`.
    ///
    /// Unrated teams stay unrated.
    pub fn with_adjustment(&self, point_adjustment: f64) -> Self {
        Team {
            rating: self.rating.map(|r| r + point_adjustment),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_shifts_rating() {
        let team = Team::new("duke", "Duke", 1, "East", Some(25.0));
        let adjusted = team.with_adjustment(-2.5);
        assert_eq!(adjusted.rating, Some(22.5));
        assert_eq!(adjusted.id, "duke");
        assert_eq!(team.rating, Some(25.0));
    }

    #[test]
    fn test_adjustment_keeps_unrated() {
        let team = Team::new("x", "X", 16, "West", None);
        assert_eq!(team.with_adjustment(3.0).rating, None);
    }

    #[test]
    fn test_rating_defaults_to_none() {
        let team: Team =
            serde_json::from_str(r#"{"id":"a","name":"A","seed":3,"region":"South"}"#).unwrap();
        assert_eq!(team.rating, None);
    }
}
