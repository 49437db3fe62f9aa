//! Match setup preferences
//!
//! Persisted separately from play statistics in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SCORE_LIMIT, SCORE_LIMITS};
use crate::error::SimError;
use crate::persistence;
use crate::sim::Difficulty;

/// Choices made on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    pub difficulty: Difficulty,
    pub score_limit: u32,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            score_limit: DEFAULT_SCORE_LIMIT,
        }
    }
}

impl GameSetup {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pong_setup";

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Only the limits offered on the setup screen are accepted
    pub fn set_score_limit(&mut self, limit: u32) -> Result<(), SimError> {
        if !SCORE_LIMITS.contains(&limit) {
            return Err(SimError::invalid(format!(
                "score limit {limit} is not one of {SCORE_LIMITS:?}"
            )));
        }
        self.score_limit = limit;
        Ok(())
    }

    /// Parse a score limit from a form value
    pub fn parse_score_limit(value: &str) -> Result<u32, SimError> {
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| SimError::invalid(format!("score limit '{value}' is not a number")))
    }

    /// Usable for a match
    pub fn is_valid(&self) -> bool {
        SCORE_LIMITS.contains(&self.score_limit)
    }

    /// Load setup from storage, falling back to defaults
    pub fn load() -> Self {
        match persistence::load_json::<GameSetup>(Self::STORAGE_KEY) {
            Some(setup) if setup.is_valid() => {
                log::info!(
                    "Loaded setup: {} to {}",
                    setup.difficulty.as_str(),
                    setup.score_limit
                );
                setup
            }
            _ => {
                log::info!("Using default setup");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if persistence::save_json(Self::STORAGE_KEY, self) {
            log::info!("Setup saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let setup = GameSetup::default();
        assert_eq!(setup.difficulty, Difficulty::Easy);
        assert_eq!(setup.score_limit, 10);
        assert!(setup.is_valid());
    }

    #[test]
    fn test_score_limit_choices() {
        let mut setup = GameSetup::default();
        assert!(setup.set_score_limit(21).is_ok());
        assert_eq!(setup.score_limit, 21);
        assert!(setup.set_score_limit(0).is_err());
        assert!(setup.set_score_limit(7).is_err());
        assert_eq!(setup.score_limit, 21);
    }

    #[test]
    fn test_parse_score_limit() {
        assert_eq!(GameSetup::parse_score_limit(" 15"), Ok(15));
        assert!(GameSetup::parse_score_limit("ten").is_err());
    }

    #[test]
    fn test_json_layout() {
        let setup = GameSetup {
            difficulty: Difficulty::Hard,
            score_limit: 5,
        };
        let json = serde_json::to_string(&setup).unwrap();
        assert_eq!(json, r#"{"difficulty":"hard","scoreLimit":5}"#);
    }

    #[test]
    fn test_native_load_is_default() {
        assert_eq!(GameSetup::load(), GameSetup::default());
    }
}
