//! Fixed per-frame simulation tick
//!
//! Core game loop that advances the match by one display frame.

use super::ai::next_paddle_y;
use super::collision::{Contact, resolve};
use super::difficulty::{Difficulty, DifficultySettings};
use super::rng::{RandomSource, SimRng};
use super::state::{Ball, Field, MatchPhase, MatchState, MatchSummary, Paddle, Side, SimulationState};
use crate::error::SimError;

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Nothing to report (also returned when not running)
    Continue,
    /// A point was scored and the ball was re-served
    PointScored(Side),
    /// The winning point was scored; the match is over
    MatchEnded(Side),
}

/// Advance the state by one tick.
///
/// Order: integrate the ball, resolve collisions, move the AI paddle, then
/// check whether the ball left the field. Does nothing unless running.
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut SimulationState,
    difficulty: Difficulty,
    settings: &DifficultySettings,
    rng: &mut R,
) -> TickResult {
    if state.score.phase != MatchPhase::Running {
        return TickResult::Continue;
    }

    state.ticks += 1;

    let ball = &mut state.ball;
    ball.pos += ball.vel;

    state.last_contact = resolve(ball, &state.left, &state.right, state.field.height);

    state.right.pos.y = next_paddle_y(
        &state.ball,
        &state.right,
        settings,
        difficulty,
        state.field.height,
        rng,
    );

    let scorer = if state.ball.pos.x < -state.ball.size {
        Some(Side::Ai)
    } else if state.ball.pos.x > state.field.width + state.ball.size {
        Some(Side::Player)
    } else {
        None
    };

    let Some(side) = scorer else {
        return TickResult::Continue;
    };

    if state.score.award(side) {
        state.score.phase = MatchPhase::Ended;
        log::info!(
            "Match over: {:?} wins {}-{} after {} ticks",
            side,
            state.score.player_score,
            state.score.ai_score,
            state.ticks
        );
        return TickResult::MatchEnded(side);
    }

    log::debug!(
        "{:?} scored ({}-{}), ball speed was {:.2}",
        side,
        state.score.player_score,
        state.score.ai_score,
        state.ball.speed()
    );
    state.ball.serve(&state.field, settings, rng);
    TickResult::PointScored(side)
}

/// A single-player match against the AI, owned by the host application
#[derive(Debug, Clone)]
pub struct Simulation<R: RandomSource = SimRng> {
    state: SimulationState,
    difficulty: Difficulty,
    settings: DifficultySettings,
    rng: R,
}

impl Simulation<SimRng> {
    /// Idle simulation on the default field with an entropy-seeded RNG
    pub fn new(difficulty: Difficulty, score_limit: u32) -> Result<Self, SimError> {
        Self::with_rng(difficulty, score_limit, SimRng::from_entropy())
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Idle simulation on the default field with the given random source
    pub fn with_rng(difficulty: Difficulty, score_limit: u32, rng: R) -> Result<Self, SimError> {
        Self::with_field(Field::default(), difficulty, score_limit, rng)
    }

    pub fn with_field(
        field: Field,
        difficulty: Difficulty,
        score_limit: u32,
        rng: R,
    ) -> Result<Self, SimError> {
        validate_score_limit(score_limit)?;
        if !(field.width > 0.0 && field.height > 0.0) {
            return Err(SimError::invalid(format!(
                "field must have positive size, got {}x{}",
                field.width, field.height
            )));
        }
        Ok(Self {
            state: SimulationState::new(field, score_limit),
            difficulty,
            settings: difficulty.settings(),
            rng,
        })
    }

    /// Start a fresh match: scores zeroed, paddles centered, ball served
    pub fn reset(&mut self, difficulty: Difficulty, score_limit: u32) -> Result<(), SimError> {
        validate_score_limit(score_limit)?;

        self.difficulty = difficulty;
        self.settings = difficulty.settings();
        self.state = SimulationState::new(self.state.field, score_limit);
        self.state.ball.serve(&self.state.field, &self.settings, &mut self.rng);
        self.state.score.phase = MatchPhase::Running;

        log::info!(
            "New match: difficulty={}, score limit={}",
            difficulty.as_str(),
            score_limit
        );
        Ok(())
    }

    /// Advance one frame
    pub fn step(&mut self) -> TickResult {
        tick(&mut self.state, self.difficulty, &self.settings, &mut self.rng)
    }

    /// Set the player paddle's top edge (clamped). Ignored unless the match
    /// is running and not paused.
    pub fn set_player_paddle_y(&mut self, y: f32) {
        if self.state.score.phase != MatchPhase::Running || !y.is_finite() {
            return;
        }
        let height = self.state.field.height;
        self.state.left.set_y(y, height);
    }

    /// Center the player paddle on a pointer position
    pub fn center_player_paddle_on(&mut self, pointer_y: f32) {
        let half = self.state.left.height / 2.0;
        self.set_player_paddle_y(pointer_y - half);
    }

    /// Flip between running and paused; returns whether the match is now paused
    pub fn toggle_pause(&mut self) -> bool {
        let score = &mut self.state.score;
        score.phase = match score.phase {
            MatchPhase::Running => MatchPhase::Paused,
            MatchPhase::Paused => MatchPhase::Running,
            other => other,
        };
        log::debug!("Pause toggled -> {:?}", score.phase);
        score.paused()
    }

    /// Abandon the match and go idle
    pub fn quit(&mut self) {
        if self.state.score.running() {
            log::info!(
                "Match abandoned at {}-{}",
                self.state.score.player_score,
                self.state.score.ai_score
            );
        }
        self.state = SimulationState::new(self.state.field, self.state.score.score_limit);
    }

    /// Result of the finished match, timed at the nominal tick rate
    pub fn summary(&self) -> Option<MatchSummary> {
        self.summary_with_duration(MatchSummary::ticks_to_ms(self.state.ticks))
    }

    /// Result of the finished match with a measured duration
    pub fn summary_with_duration(&self, duration_ms: u64) -> Option<MatchSummary> {
        let score = &self.state.score;
        let winner = score.winner().filter(|_| score.ended())?;
        Some(MatchSummary {
            difficulty: self.difficulty,
            score_limit: score.score_limit,
            player_score: score.player_score,
            ai_score: score.ai_score,
            player_won: winner == Side::Player,
            duration_ms,
        })
    }

    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    pub fn left_paddle(&self) -> &Paddle {
        &self.state.left
    }

    pub fn right_paddle(&self) -> &Paddle {
        &self.state.right
    }

    pub fn match_state(&self) -> &MatchState {
        &self.state.score
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.score.phase
    }

    pub fn field(&self) -> &Field {
        &self.state.field
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn settings(&self) -> &DifficultySettings {
        &self.settings
    }

    /// Wall and paddle contacts from the most recent tick
    pub fn last_contact(&self) -> Contact {
        self.state.last_contact
    }

    pub fn ticks(&self) -> u64 {
        self.state.ticks
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for debugging tools and tests
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}

fn validate_score_limit(score_limit: u32) -> Result<(), SimError> {
    if score_limit == 0 {
        return Err(SimError::invalid("score limit must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceRng;
    use glam::Vec2;

    fn running(difficulty: Difficulty, limit: u32) -> Simulation<SequenceRng> {
        let mut sim = Simulation::with_rng(difficulty, limit, SequenceRng::new(vec![0.9, 0.5])).unwrap();
        sim.reset(difficulty, limit).unwrap();
        sim
    }

    #[test]
    fn test_new_is_idle() {
        let mut sim = Simulation::with_rng(Difficulty::Easy, 5, SequenceRng::default()).unwrap();
        assert_eq!(sim.phase(), MatchPhase::Idle);
        let before = sim.state().clone();
        assert_eq!(sim.step(), TickResult::Continue);
        assert_eq!(sim.ball(), &before.ball);
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn test_zero_score_limit_rejected() {
        assert!(matches!(
            Simulation::with_rng(Difficulty::Easy, 0, SequenceRng::default()),
            Err(SimError::InvalidConfiguration { .. })
        ));
        let mut sim = running(Difficulty::Easy, 5);
        assert!(sim.reset(Difficulty::Hard, 0).is_err());
        // Failed reset leaves the match untouched
        assert_eq!(sim.difficulty(), Difficulty::Easy);
        assert_eq!(sim.phase(), MatchPhase::Running);
    }

    #[test]
    fn test_bad_field_rejected() {
        let field = Field {
            width: 0.0,
            height: 400.0,
        };
        assert!(Simulation::with_field(field, Difficulty::Easy, 5, SequenceRng::default()).is_err());
    }

    #[test]
    fn test_reset_serves_ball() {
        let sim = running(Difficulty::Medium, 10);
        assert_eq!(sim.phase(), MatchPhase::Running);
        assert_eq!(sim.ball().pos, Vec2::new(394.0, 194.0));
        assert_eq!(sim.ball().vel, Vec2::new(4.0, 0.0));
        assert_eq!(sim.match_state().player_score, 0);
        assert_eq!(sim.match_state().ai_score, 0);
    }

    #[test]
    fn test_step_integrates_velocity() {
        let mut sim = running(Difficulty::Hard, 10);
        sim.state_mut().ball.vel = Vec2::new(3.0, -2.0);
        assert_eq!(sim.step(), TickResult::Continue);
        assert_eq!(sim.ball().pos, Vec2::new(397.0, 192.0));
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn test_step_moves_ai_paddle() {
        // After the serve the next draw is 0.9: track, no jitter on hard
        let mut sim = running(Difficulty::Hard, 10);
        {
            let state = sim.state_mut();
            state.ball.pos = Vec2::new(400.0, 50.0);
            state.ball.vel = Vec2::new(4.0, 0.0);
        }
        assert_eq!(sim.right_paddle().pos.y, 160.0);
        assert_eq!(sim.step(), TickResult::Continue);
        // Target 56 - 40 = 16 is far outside the dead zone: one full step up
        assert_eq!(sim.right_paddle().pos.y, 154.0);
        assert_eq!(sim.step(), TickResult::Continue);
        assert_eq!(sim.right_paddle().pos.y, 148.0);
    }

    #[test]
    fn test_step_reports_paddle_contact() {
        let mut sim = running(Difficulty::Hard, 10);
        {
            let state = sim.state_mut();
            state.ball.pos = Vec2::new(756.0, 194.0);
            state.ball.vel = Vec2::new(5.0, 0.0);
        }
        sim.step();
        assert_eq!(sim.last_contact().paddle, Some(Side::Ai));
        assert!(sim.ball().vel.x < 0.0);
        sim.step();
        assert_eq!(sim.last_contact(), Contact::default());
    }

    #[test]
    fn test_ai_scores_and_ball_resets() {
        let mut sim = running(Difficulty::Hard, 10);
        {
            let state = sim.state_mut();
            state.ball.pos = Vec2::new(-10.0, 50.0);
            state.ball.vel = Vec2::new(-5.0, 0.0);
        }
        assert_eq!(sim.step(), TickResult::PointScored(Side::Ai));
        assert_eq!(sim.match_state().ai_score, 1);
        assert_eq!(sim.match_state().player_score, 0);
        assert_eq!(sim.ball().pos, Vec2::new(394.0, 194.0));
        assert_eq!(sim.phase(), MatchPhase::Running);
    }

    #[test]
    fn test_player_winning_point_ends_match() {
        let mut sim = running(Difficulty::Hard, 10);
        {
            let state = sim.state_mut();
            state.score.player_score = 9;
            state.ball.pos = Vec2::new(810.0, 50.0);
            state.ball.vel = Vec2::new(5.0, 0.0);
        }
        assert_eq!(sim.step(), TickResult::MatchEnded(Side::Player));
        assert_eq!(sim.phase(), MatchPhase::Ended);
        assert_eq!(sim.match_state().player_score, 10);

        let summary = sim.summary().unwrap();
        assert!(summary.player_won);
        assert_eq!(summary.difficulty, Difficulty::Hard);
        assert_eq!(summary.score_limit, 10);

        // Ended is terminal: further steps change nothing
        let frozen = sim.state().clone();
        for _ in 0..10 {
            assert_eq!(sim.step(), TickResult::Continue);
        }
        assert_eq!(sim.ball(), &frozen.ball);
        assert_eq!(sim.match_state(), &frozen.score);
        assert_eq!(sim.ticks(), frozen.ticks);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut sim = running(Difficulty::Easy, 10);
        sim.step();
        assert!(sim.toggle_pause());
        let frozen = sim.state().clone();
        for _ in 0..5 {
            assert_eq!(sim.step(), TickResult::Continue);
        }
        sim.set_player_paddle_y(10.0);
        assert_eq!(sim.ball(), &frozen.ball);
        assert_eq!(sim.left_paddle(), &frozen.left);
        assert_eq!(sim.right_paddle(), &frozen.right);
        assert_eq!(sim.ticks(), frozen.ticks);

        assert!(!sim.toggle_pause());
        sim.step();
        assert_ne!(sim.ball().pos, frozen.ball.pos);
    }

    #[test]
    fn test_toggle_pause_when_idle_is_noop() {
        let mut sim = Simulation::with_rng(Difficulty::Easy, 5, SequenceRng::default()).unwrap();
        assert!(!sim.toggle_pause());
        assert_eq!(sim.phase(), MatchPhase::Idle);
    }

    #[test]
    fn test_player_paddle_input_clamped() {
        let mut sim = running(Difficulty::Easy, 10);
        sim.set_player_paddle_y(-40.0);
        assert_eq!(sim.left_paddle().pos.y, 0.0);
        sim.set_player_paddle_y(999.0);
        assert_eq!(sim.left_paddle().pos.y, 320.0);
        sim.center_player_paddle_on(200.0);
        assert_eq!(sim.left_paddle().pos.y, 160.0);
        sim.set_player_paddle_y(f32::NAN);
        assert_eq!(sim.left_paddle().pos.y, 160.0);
    }

    #[test]
    fn test_quit_goes_idle() {
        let mut sim = running(Difficulty::Easy, 10);
        sim.state_mut().score.ai_score = 3;
        sim.quit();
        assert_eq!(sim.phase(), MatchPhase::Idle);
        assert_eq!(sim.match_state().ai_score, 0);
        assert!(sim.summary().is_none());
    }

    #[test]
    fn test_full_match_ends_exactly_once() {
        let mut sim = Simulation::with_rng(Difficulty::Easy, 3, SimRng::from_seed(2024)).unwrap();
        sim.reset(Difficulty::Easy, 3).unwrap();

        let mut ended = 0;
        let mut points = 0;
        let mut last = (0, 0);
        for _ in 0..200_000 {
            match sim.step() {
                TickResult::MatchEnded(side) => {
                    ended += 1;
                    assert_eq!(sim.match_state().score(side), 3);
                }
                TickResult::PointScored(_) => points += 1,
                TickResult::Continue => {}
            }
            let now = (sim.match_state().player_score, sim.match_state().ai_score);
            assert!(now.0 >= last.0 && now.1 >= last.1);
            assert!(now.0 <= 3 && now.1 <= 3);
            last = now;
        }

        assert_eq!(ended, 1);
        assert_eq!(sim.phase(), MatchPhase::Ended);
        // Every point except the winner reset the ball
        let total = sim.match_state().player_score + sim.match_state().ai_score;
        assert_eq!(points + 1, total);
    }
}
