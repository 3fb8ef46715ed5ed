//! Engine configuration.
//!
//! The only tunable today is the rating scale used by the fallback win
//! probability model. It can be set in code, deserialized alongside other
//! pool settings, or read from `BRACKET_RATING_SCALE`.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RATING_SCALE;
use crate::error::{Error, Result};

/// Environment variable overriding [`EngineConfig::rating_scale`].
pub const RATING_SCALE_ENV: &str = "BRACKET_RATING_SCALE";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Divisor applied to a rating gap before the logistic transform.
    /// Larger values flatten the fallback probabilities toward 0.5.
    pub rating_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rating_scale: DEFAULT_RATING_SCALE,
        }
    }
}

impl EngineConfig {
    pub fn new(rating_scale: f64) -> Result<Self> {
        let config = EngineConfig { rating_scale };
        config.validate()?;
        Ok(config)
    }

    /// Read `BRACKET_RATING_SCALE` (default [`DEFAULT_RATING_SCALE`]).
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(RATING_SCALE_ENV) {
            None => Ok(Self::default()),
            Some(raw) => {
                let scale: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidRatingScale(raw.clone()))?;
                Self::new(scale)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rating_scale.is_finite() && self.rating_scale > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidRatingScale(self.rating_scale.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let config = EngineConfig::default();
        assert_eq!(config.rating_scale, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars_unset_uses_default() {
        let config = EngineConfig::from_vars(|_| None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_vars_parses_scale() {
        let config = EngineConfig::from_vars(|key| {
            assert_eq!(key, RATING_SCALE_ENV);
            Some(" 12.5 ".to_string())
        })
        .unwrap();
        assert_eq!(config.rating_scale, 12.5);
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(matches!(
            EngineConfig::from_vars(|_| Some("abc".to_string())),
            Err(Error::InvalidRatingScale(_))
        ));
        assert!(EngineConfig::new(0.0).is_err());
        assert!(EngineConfig::new(-3.0).is_err());
        assert!(EngineConfig::new(f64::NAN).is_err());
    }

    #[test]
    fn test_deserialize_missing_field_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.rating_scale, 10.0);
    }
}
