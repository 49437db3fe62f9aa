//! Game state and core simulation types
//!
//! Everything the renderer reads each frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, Rect};
use super::difficulty::{Difficulty, DifficultySettings};
use super::rng::RandomSource;
use crate::consts::*;

/// Which side of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human, left paddle
    Player,
    /// Computer, right paddle
    Ai,
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MatchPhase {
    /// No match in progress (setup / stats screens)
    #[default]
    Idle,
    /// Active play
    Running,
    /// Running but frozen
    Paused,
    /// Score limit reached, needs a reset
    Ended,
}

/// Play-field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// The ball. `pos` is the top-left corner of its bounding square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    /// Stationary ball at field center
    pub fn centered(field: &Field) -> Self {
        Self {
            pos: Vec2::new(field.width / 2.0 - BALL_SIZE / 2.0, field.height / 2.0 - BALL_SIZE / 2.0),
            vel: Vec2::ZERO,
            size: BALL_SIZE,
        }
    }

    /// Re-center the ball and give it a fresh random serve velocity
    pub fn serve<R: RandomSource + ?Sized>(
        &mut self,
        field: &Field,
        settings: &DifficultySettings,
        rng: &mut R,
    ) {
        let mult = settings.ball_speed_multiplier;
        self.pos = Vec2::new(field.width / 2.0 - self.size / 2.0, field.height / 2.0 - self.size / 2.0);
        let vx = if rng.next_f32() > 0.5 {
            BALL_BASE_SPEED
        } else {
            -BALL_BASE_SPEED
        };
        let vy = (rng.next_f32() - 0.5) * BALL_SERVE_SPREAD;
        self.vel = Vec2::new(vx, vy) * mult;
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size / 2.0
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    /// Magnitude of the velocity vector
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A paddle. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Player paddle, vertically centered
    pub fn left(field: &Field) -> Self {
        Self {
            pos: Vec2::new(PADDLE_MARGIN, field.height / 2.0 - PADDLE_HEIGHT / 2.0),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// AI paddle, vertically centered
    pub fn right(field: &Field) -> Self {
        Self {
            pos: Vec2::new(
                field.width - PADDLE_MARGIN - PADDLE_WIDTH,
                field.height / 2.0 - PADDLE_HEIGHT / 2.0,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Largest `y` that keeps the paddle on the field
    #[inline]
    pub fn max_y(&self, field_height: f32) -> f32 {
        (field_height - self.height).max(0.0)
    }

    /// Clamp a candidate `y` to the vertical bounds
    pub fn clamp_y(&self, y: f32, field_height: f32) -> f32 {
        y.clamp(0.0, self.max_y(field_height))
    }

    /// Move to `y`, re-clamped to the field
    pub fn set_y(&mut self, y: f32, field_height: f32) {
        self.pos.y = self.clamp_y(y, field_height);
    }
}

/// Score counters and lifecycle flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player_score: u32,
    pub ai_score: u32,
    pub score_limit: u32,
    pub phase: MatchPhase,
}

impl MatchState {
    pub fn new(score_limit: u32) -> Self {
        Self {
            player_score: 0,
            ai_score: 0,
            score_limit,
            phase: MatchPhase::Idle,
        }
    }

    /// Match is in progress (possibly paused)
    pub fn running(&self) -> bool {
        matches!(self.phase, MatchPhase::Running | MatchPhase::Paused)
    }

    pub fn paused(&self) -> bool {
        self.phase == MatchPhase::Paused
    }

    pub fn ended(&self) -> bool {
        self.phase == MatchPhase::Ended
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Ai => self.ai_score,
        }
    }

    /// Add a point; returns true if that side has now reached the limit
    pub fn award(&mut self, side: Side) -> bool {
        let score = match side {
            Side::Player => &mut self.player_score,
            Side::Ai => &mut self.ai_score,
        };
        *score = score.saturating_add(1);
        *score >= self.score_limit
    }

    /// Side that reached the limit, if any
    pub fn winner(&self) -> Option<Side> {
        if self.player_score >= self.score_limit {
            Some(Side::Player)
        } else if self.ai_score >= self.score_limit {
            Some(Side::Ai)
        } else {
            None
        }
    }
}

/// Complete simulation state for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub field: Field,
    pub ball: Ball,
    /// Player paddle
    pub left: Paddle,
    /// AI paddle
    pub right: Paddle,
    pub score: MatchState,
    /// Ticks simulated since the match started
    pub ticks: u64,
    /// Contacts from the most recent tick (for sound/flash hooks)
    #[serde(skip)]
    pub last_contact: Contact,
}

impl SimulationState {
    /// Fresh idle state with both paddles and the ball centered
    pub fn new(field: Field, score_limit: u32) -> Self {
        Self {
            field,
            ball: Ball::centered(&field),
            left: Paddle::left(&field),
            right: Paddle::right(&field),
            score: MatchState::new(score_limit),
            ticks: 0,
            last_contact: Contact::default(),
        }
    }
}

/// Outcome of a finished match, handed to the stats collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub difficulty: Difficulty,
    pub score_limit: u32,
    pub player_score: u32,
    pub ai_score: u32,
    pub player_won: bool,
    /// Match length in milliseconds
    pub duration_ms: u64,
}

impl MatchSummary {
    /// Tick count converted at the nominal refresh rate
    pub fn ticks_to_ms(ticks: u64) -> u64 {
        ticks * 1000 / TICKS_PER_SECOND as u64
    }
}
