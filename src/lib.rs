//! Canvas Pong - classic two-paddle Pong against an AI opponent
//!
//! Core modules:
//! - `sim`: Simulation (ball, paddles, collisions, AI, scoring)
//! - `stats`: Persisted play statistics
//! - `settings`: Match setup (difficulty, score limit)
//! - `ui`: Screen flow (setup, game, pause, game over, stats)
//! - `persistence`: JSON save/load (LocalStorage on web)
//! - `platform`: Browser/native platform helpers

pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod ui;

pub use error::SimError;
pub use settings::GameSetup;
pub use sim::{Difficulty, DifficultySettings, Side, Simulation, TickResult};
pub use stats::PlayStats;
pub use ui::{Screen, ScreenFlow};

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Gap between each paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 20.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 12.0;
    /// Horizontal serve speed (units per tick, before difficulty scaling)
    pub const BALL_BASE_SPEED: f32 = 4.0;
    /// Full width of the vertical serve range (centered on 0)
    pub const BALL_SERVE_SPREAD: f32 = 4.0;

    /// Speed boost when ball hits a paddle (multiplicative)
    pub const PADDLE_SPEEDUP: f32 = 1.05;
    /// Vertical velocity added per unit of contact offset from paddle center
    pub const SPIN_FACTOR: f32 = 0.15;

    /// AI dead zone scale (reaction delay * this = dead zone in units)
    pub const REACTION_DEAD_ZONE_SCALE: f32 = 100.0;

    /// Nominal display refresh the tick rate is tied to
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Score limits offered on the setup screen
    pub const SCORE_LIMITS: [u32; 4] = [5, 10, 15, 21];
    pub const DEFAULT_SCORE_LIMIT: u32 = 10;
}
