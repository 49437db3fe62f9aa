//! Simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - One fixed step per display frame (no wall-clock scaling)
//! - Randomness only through an injected `RandomSource`
//! - No rendering, storage, or screen dependencies

pub mod ai;
pub mod collision;
pub mod difficulty;
pub mod rng;
pub mod state;
pub mod tick;

pub use ai::{compute_target_y, next_paddle_y, step_toward};
pub use collision::{Contact, Rect, rect_intersect, resolve};
pub use difficulty::{Difficulty, DifficultySettings};
pub use rng::{RandomSource, SequenceRng, SimRng};
pub use state::{Ball, Field, MatchPhase, MatchState, MatchSummary, Paddle, Side, SimulationState};
pub use tick::{Simulation, TickResult, tick};
