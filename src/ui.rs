//! Screen flow
//!
//! Headless model of the menu screens. The browser shell shows whichever
//! screen `ScreenFlow::screen` names and forwards button/key events here.

use crate::error::SimError;
use crate::settings::GameSetup;
use crate::sim::{Difficulty, MatchPhase, RandomSource, Side, Simulation, TickResult};
use crate::stats::PlayStats;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Setup,
    Game,
    Pause,
    GameOver,
    Stats,
}

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
}

impl Key {
    /// Map a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// What the game-over screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverInfo {
    pub player_won: bool,
    pub player_score: u32,
    pub ai_score: u32,
    pub difficulty: Difficulty,
    pub score_limit: u32,
}

impl GameOverInfo {
    pub fn title(&self) -> &'static str {
        if self.player_won { "You Won!" } else { "You Lost!" }
    }

    pub fn final_score(&self) -> String {
        format!("{} - {}", self.player_score, self.ai_score)
    }
}

/// Current screen plus the setup it will start matches with
#[derive(Debug, Clone, Default)]
pub struct ScreenFlow {
    screen: Screen,
    setup: GameSetup,
    game_over: Option<GameOverInfo>,
}

impl ScreenFlow {
    pub fn new(setup: GameSetup) -> Self {
        Self {
            screen: Screen::Setup,
            setup,
            game_over: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    /// Last finished match, while the game-over screen is up
    pub fn game_over(&self) -> Option<&GameOverInfo> {
        self.game_over.as_ref()
    }

    fn show(&mut self, screen: Screen) {
        if self.screen != screen {
            log::debug!("Screen {:?} -> {:?}", self.screen, screen);
        }
        self.screen = screen;
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.setup.set_difficulty(difficulty);
        self.setup.save();
    }

    pub fn select_score_limit(&mut self, limit: u32) -> Result<(), SimError> {
        self.setup.set_score_limit(limit)?;
        self.setup.save();
        Ok(())
    }

    /// Start (or restart) a match with the current setup
    pub fn start_game<R: RandomSource>(&mut self, sim: &mut Simulation<R>) -> Result<(), SimError> {
        sim.reset(self.setup.difficulty, self.setup.score_limit)?;
        self.game_over = None;
        self.show(Screen::Game);
        Ok(())
    }

    /// Pause button: toggles pause and shows the pause screen when paused
    pub fn pause<R: RandomSource>(&mut self, sim: &mut Simulation<R>) {
        if self.screen != Screen::Game {
            return;
        }
        if sim.toggle_pause() {
            self.show(Screen::Pause);
        }
    }

    pub fn resume<R: RandomSource>(&mut self, sim: &mut Simulation<R>) {
        if self.screen != Screen::Pause {
            return;
        }
        if sim.phase() == MatchPhase::Paused {
            sim.toggle_pause();
        }
        self.show(Screen::Game);
    }

    /// Leave the match for the setup screen
    pub fn quit<R: RandomSource>(&mut self, sim: &mut Simulation<R>) {
        sim.quit();
        self.show(Screen::Setup);
    }

    pub fn show_stats(&mut self) {
        if self.screen == Screen::Setup {
            self.show(Screen::Stats);
        }
    }

    /// Main-menu / back buttons
    pub fn back_to_menu<R: RandomSource>(&mut self, sim: &mut Simulation<R>) {
        sim.quit();
        self.game_over = None;
        self.show(Screen::Setup);
    }

    pub fn on_key<R: RandomSource>(&mut self, key: Key, sim: &mut Simulation<R>) {
        match (key, self.screen) {
            (Key::Space | Key::Escape, Screen::Game) => self.pause(sim),
            (Key::Escape, Screen::Pause) => self.resume(sim),
            _ => {}
        }
    }

    /// React to a simulation tick. A finished match is recorded in `stats`
    /// (and saved) and the game-over screen is shown.
    pub fn on_tick<R: RandomSource>(
        &mut self,
        result: TickResult,
        sim: &Simulation<R>,
        stats: &mut PlayStats,
        duration_ms: Option<u64>,
    ) -> Option<&GameOverInfo> {
        let TickResult::MatchEnded(winner) = result else {
            return None;
        };

        let summary = match duration_ms {
            Some(ms) => sim.summary_with_duration(ms),
            None => sim.summary(),
        }?;
        stats.record_game(&summary);
        stats.save();

        self.game_over = Some(GameOverInfo {
            player_won: winner == Side::Player,
            player_score: summary.player_score,
            ai_score: summary.ai_score,
            difficulty: summary.difficulty,
            score_limit: summary.score_limit,
        });
        self.show(Screen::GameOver);
        self.game_over.as_ref()
    }
}
