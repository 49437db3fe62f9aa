//! Difficulty levels and AI tuning table

use serde::{Deserialize, Serialize};

use crate::consts::REACTION_DEAD_ZONE_SCALE;
use crate::error::SimError;

/// Difficulty levels offered on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Capitalized name for display
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Result<Self, SimError> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(SimError::invalid(format!("unknown difficulty '{other}'"))),
        }
    }

    /// AI tuning for this level
    pub fn settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                ai_speed: 2.5,
                ai_reaction_delay: 0.3,
                ai_prediction: 0.1,
                ball_speed_multiplier: 0.8,
            },
            Difficulty::Medium => DifficultySettings {
                ai_speed: 4.0,
                ai_reaction_delay: 0.15,
                ai_prediction: 0.3,
                ball_speed_multiplier: 1.0,
            },
            Difficulty::Hard => DifficultySettings {
                ai_speed: 6.0,
                ai_reaction_delay: 0.05,
                ai_prediction: 0.7,
                ball_speed_multiplier: 1.3,
            },
        }
    }

    /// Full width of the per-tick random offset added to the AI target.
    /// The offset is drawn from `[-span/2, span/2)`.
    pub fn jitter_span(&self) -> f32 {
        match self {
            Difficulty::Easy => 60.0,
            Difficulty::Medium => 30.0,
            Difficulty::Hard => 0.0,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// AI tuning parameters for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Maximum AI paddle travel per tick
    pub ai_speed: f32,
    /// Scaled into a dead zone the AI ignores (see `dead_zone`)
    pub ai_reaction_delay: f32,
    /// Probability of aiming at the predicted intercept instead of the ball
    pub ai_prediction: f32,
    /// Scales serve velocity
    pub ball_speed_multiplier: f32,
}

impl DifficultySettings {
    /// Distance from target below which the AI paddle holds still
    #[inline]
    pub fn dead_zone(&self) -> f32 {
        self.ai_reaction_delay * REACTION_DEAD_ZONE_SCALE
    }
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Difficulty::default().settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Difficulty::parse("easy"), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::parse(" Medium "), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!(Difficulty::parse("nightmare").is_err());
    }

    #[test]
    fn test_round_trip_names() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::parse(d.as_str()), Ok(d));
        }
    }

    #[test]
    fn test_hard_dead_zone() {
        let hard = Difficulty::Hard.settings();
        assert!((hard.dead_zone() - 5.0).abs() < 1e-4);
        assert_eq!(hard.ai_speed, 6.0);
        assert_eq!(Difficulty::Hard.jitter_span(), 0.0);
    }

    #[test]
    fn test_harder_is_faster() {
        let easy = Difficulty::Easy.settings();
        let medium = Difficulty::Medium.settings();
        let hard = Difficulty::Hard.settings();
        assert!(easy.ai_speed < medium.ai_speed && medium.ai_speed < hard.ai_speed);
        assert!(easy.dead_zone() > medium.dead_zone() && medium.dead_zone() > hard.dead_zone());
        assert!(easy.ai_prediction < hard.ai_prediction);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
