//! Canvas Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlSelectElement, MouseEvent};

    use canvas_pong::platform;
    use canvas_pong::sim::{Difficulty, Field, Side, SimRng, Simulation, TickResult};
    use canvas_pong::ui::Key;
    use canvas_pong::{GameSetup, PlayStats, Screen, ScreenFlow};

    const SCREENS: [(Screen, &str); 5] = [
        (Screen::Setup, "setupScreen"),
        (Screen::Game, "gameScreen"),
        (Screen::Pause, "pauseScreen"),
        (Screen::GameOver, "gameOverScreen"),
        (Screen::Stats, "statsScreen"),
    ];

    /// Frames a paddle stays highlighted after returning the ball
    const HIT_FLASH_FRAMES: u32 = 6;

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        flow: ScreenFlow,
        stats: PlayStats,
        ctx: CanvasRenderingContext2d,
        document: Document,
        /// Wall-clock start of the current match
        match_started_ms: f64,
        /// Screen currently shown in the DOM
        shown: Option<Screen>,
        /// Paddle that last returned the ball, with frames left to highlight it
        hit_flash: Option<(Side, u32)>,
    }

    impl Game {
        fn start_game(&mut self) {
            match self.flow.start_game(&mut self.sim) {
                Ok(()) => self.match_started_ms = platform::now_ms(),
                Err(e) => log::error!("Cannot start match: {}", e),
            }
            self.update_hud();
        }

        /// Advance one frame and react to its result
        fn update(&mut self) {
            let result = self.sim.step();
            self.hit_flash = match self.sim.last_contact().paddle {
                Some(side) => Some((side, HIT_FLASH_FRAMES)),
                None => self
                    .hit_flash
                    .and_then(|(side, n)| n.checked_sub(1).filter(|&n| n > 0).map(|n| (side, n))),
            };
            match result {
                TickResult::Continue => {}
                TickResult::PointScored(_) => self.update_hud(),
                TickResult::MatchEnded(_) => {
                    let duration = platform::elapsed_ms(self.match_started_ms);
                    if let Some(info) =
                        self.flow
                            .on_tick(result, &self.sim, &mut self.stats, Some(duration))
                    {
                        set_text(&self.document, "gameOverTitle", info.title());
                        if let Some(el) = self.document.get_element_by_id("finalScore") {
                            el.set_inner_html(&format!(
                                "Final Score: {}<br>Difficulty: {}<br>Score Limit: {}",
                                info.final_score(),
                                info.difficulty.label(),
                                info.score_limit
                            ));
                        }
                    }
                    self.update_hud();
                }
            }
        }

        /// Show the flow's current screen, hide the rest
        fn sync_screen(&mut self) {
            let screen = self.flow.screen();
            if self.shown == Some(screen) {
                return;
            }
            for (s, id) in SCREENS {
                if let Some(el) = self.document.get_element_by_id(id) {
                    let _ = if s == screen {
                        el.class_list().remove_1("hidden")
                    } else {
                        el.class_list().add_1("hidden")
                    };
                }
            }
            if screen == Screen::Stats {
                self.render_stats();
            }
            self.shown = Some(screen);
        }

        fn update_hud(&self) {
            let score = self.sim.match_state();
            set_text(&self.document, "playerScore", &score.player_score.to_string());
            set_text(&self.document, "aiScore", &score.ai_score.to_string());
            set_text(&self.document, "difficultyDisplay", self.sim.difficulty().label());
            set_text(&self.document, "scoreLimitDisplay", &score.score_limit.to_string());
        }

        fn render_stats(&self) {
            let Some(el) = self.document.get_element_by_id("statsContent") else {
                return;
            };
            let html: String = self
                .stats
                .stats_lines()
                .iter()
                .map(|(label, value)| format!("<div><strong>{label}:</strong> {value}</div>"))
                .collect();
            el.set_inner_html(&html);
        }

        /// Paint the field. Only the game and pause screens show the canvas.
        fn render(&self) {
            if !matches!(self.flow.screen(), Screen::Game | Screen::Pause) {
                return;
            }
            let ctx = &self.ctx;
            let field = self.sim.field();
            let (w, h) = (field.width as f64, field.height as f64);
            ctx.clear_rect(0.0, 0.0, w, h);

            // Midline
            ctx.set_stroke_style_str("#333");
            ctx.set_line_width(2.0);
            let dash = js_sys::Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(10.0));
            let _ = ctx.set_line_dash(&dash);
            ctx.begin_path();
            ctx.move_to(w / 2.0, 0.0);
            ctx.line_to(w / 2.0, h);
            ctx.stroke();
            let _ = ctx.set_line_dash(&js_sys::Array::new());

            // Paddles
            for (side, paddle) in [
                (Side::Player, self.sim.left_paddle()),
                (Side::Ai, self.sim.right_paddle()),
            ] {
                let flashing = matches!(self.hit_flash, Some((s, _)) if s == side);
                ctx.set_fill_style_str(if flashing { "#4af" } else { "#fff" });
                ctx.fill_rect(
                    paddle.pos.x as f64,
                    paddle.pos.y as f64,
                    paddle.width as f64,
                    paddle.height as f64,
                );
            }

            // Ball
            ctx.set_fill_style_str("#fff");
            let ball = self.sim.ball();
            let r = ball.size as f64 / 2.0;
            ctx.begin_path();
            let _ = ctx.arc(
                ball.pos.x as f64 + r,
                ball.pos.y as f64 + r,
                r,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();

            if self.sim.match_state().paused() {
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
                ctx.set_font("48px Courier New");
                ctx.set_text_align("center");
                let _ = ctx.fill_text("PAUSED", w / 2.0, h / 2.0);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        platform::init_logging();
        log::info!("Canvas Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("pongCanvas")
            .ok_or("no #pongCanvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let setup = GameSetup::load();
        // The field matches the canvas' drawing buffer
        let field = Field {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        };
        let sim = Simulation::with_field(field, setup.difficulty, setup.score_limit, SimRng::from_entropy())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            sim,
            flow: ScreenFlow::new(setup),
            stats: PlayStats::load(),
            ctx,
            document: document.clone(),
            match_started_ms: 0.0,
            shown: None,
            hit_flash: None,
        }));
        game.borrow_mut().sync_screen();

        setup_input(game.clone(), &canvas, &document);
        setup_buttons(game.clone(), &document);
        request_animation_frame(game);
        Ok(())
    }

    fn setup_input(game: Rc<RefCell<Game>>, canvas: &HtmlCanvasElement, document: &Document) {
        // Mouse move: paddle centered on the cursor, in canvas units
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let scale = if rect.height() > 0.0 {
                    canvas_clone.height() as f64 / rect.height()
                } else {
                    1.0
                };
                let y = (event.client_y() as f64 - rect.top()) * scale;
                game.borrow_mut().sim.center_player_paddle_on(y as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(key) = Key::from_code(&event.code()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if key == Key::Space && g.flow.screen() == Screen::Game {
                    event.prevent_default();
                }
                let g = &mut *g;
                g.flow.on_key(key, &mut g.sim);
                g.sync_screen();
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, action: fn(&mut Game)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            action(&mut g);
            g.sync_screen();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>, document: &Document) {
        on_click(document, "startGameBtn", game.clone(), |g| g.start_game());
        on_click(document, "playAgainBtn", game.clone(), |g| g.start_game());
        on_click(document, "viewStatsBtn", game.clone(), |g| g.flow.show_stats());
        on_click(document, "pauseBtn", game.clone(), |g| g.flow.pause(&mut g.sim));
        on_click(document, "resumeBtn", game.clone(), |g| g.flow.resume(&mut g.sim));
        on_click(document, "quitBtn", game.clone(), |g| g.flow.quit(&mut g.sim));
        on_click(document, "pauseQuitBtn", game.clone(), |g| g.flow.back_to_menu(&mut g.sim));
        on_click(document, "mainMenuBtn", game.clone(), |g| g.flow.back_to_menu(&mut g.sim));
        on_click(document, "backToMenuBtn", game.clone(), |g| g.flow.back_to_menu(&mut g.sim));

        // Difficulty buttons
        for difficulty in Difficulty::ALL {
            let selector = format!(".difficulty-btn[data-difficulty='{}']", difficulty.as_str());
            let Some(btn) = document.query_selector(&selector).ok().flatten() else {
                continue;
            };
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                for d in Difficulty::ALL {
                    let sel = format!(".difficulty-btn[data-difficulty='{}']", d.as_str());
                    if let Some(el) = doc.query_selector(&sel).ok().flatten() {
                        let _ = if d == difficulty {
                            el.class_list().add_1("active")
                        } else {
                            el.class_list().remove_1("active")
                        };
                    }
                }
                game.borrow_mut().flow.select_difficulty(difficulty);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Score limit select
        if let Some(select) = document
            .get_element_by_id("scoreLimit")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let parsed = GameSetup::parse_score_limit(&select_clone.value());
                let result = parsed.and_then(|limit| game.borrow_mut().flow.select_score_limit(limit));
                if let Err(e) = result {
                    log::warn!("{}", e);
                }
            });
            let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.sync_screen();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    canvas_pong::platform::init_logging();
    log::info!("Canvas Pong (native) starting...");
    log::info!("Native mode runs a headless demo match - serve the wasm build for the browser game");

    if let Err(e) = demo::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless match: a tracking player against the AI
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use canvas_pong::sim::{Difficulty, Simulation, TickResult};
    use canvas_pong::{GameSetup, PlayStats, ScreenFlow, SimError};

    /// Give up after ten simulated minutes
    const MAX_TICKS: u64 = 60 * 60 * 10;

    pub fn run() -> Result<(), SimError> {
        let mut setup = GameSetup::default();
        if let Some(arg) = std::env::args().nth(1) {
            setup.set_difficulty(arg.parse::<Difficulty>()?);
        }
        if let Some(arg) = std::env::args().nth(2) {
            setup.set_score_limit(GameSetup::parse_score_limit(&arg)?)?;
        }

        let mut sim = Simulation::new(setup.difficulty, setup.score_limit)?;
        let mut flow = ScreenFlow::new(setup);
        let mut stats = PlayStats::load();
        flow.start_game(&mut sim)?;
        let mut rally = 0u32;

        while sim.ticks() < MAX_TICKS {
            // The "player" lags a little behind the ball
            let target = sim.ball().center_y();
            let current = sim.left_paddle().center_y();
            sim.center_player_paddle_on(current + (target - current).clamp(-3.0, 3.0));

            let result = sim.step();
            if sim.last_contact().paddle.is_some() {
                rally += 1;
            }
            if let TickResult::PointScored(side) | TickResult::MatchEnded(side) = result {
                let score = sim.match_state();
                log::info!(
                    "{:?} scores: {} - {} after a {}-hit rally",
                    side,
                    score.player_score,
                    score.ai_score,
                    rally
                );
                rally = 0;
            }
            if let Some(info) = flow.on_tick(result, &sim, &mut stats, None) {
                log::info!(
                    "{} Final score {} on {} to {}",
                    info.title(),
                    info.final_score(),
                    info.difficulty.label(),
                    info.score_limit
                );
                for (label, value) in stats.stats_lines() {
                    log::info!("  {}: {}", label, value);
                }
                return Ok(());
            }
        }

        log::warn!("Demo match hit the tick cap at {} ticks", sim.ticks());
        Ok(())
    }
}
