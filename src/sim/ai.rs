//! AI opponent for the right paddle
//!
//! Each tick the AI either aims at where the ball will cross its paddle
//! line (linear extrapolation, no wall bounces) or simply tracks the ball,
//! then adds difficulty-based jitter. The paddle only moves when the
//! target leaves a dead zone, and never faster than `ai_speed`.

use super::difficulty::{Difficulty, DifficultySettings};
use super::rng::RandomSource;
use super::state::{Ball, Paddle};

/// Where the AI wants the top of its paddle this tick.
///
/// Draws one value for the predict/track choice and, for difficulties with
/// jitter, a second one for the offset. Prediction is skipped when the
/// ball has no horizontal speed.
pub fn compute_target_y<R: RandomSource + ?Sized>(
    ball: &Ball,
    paddle: &Paddle,
    settings: &DifficultySettings,
    difficulty: Difficulty,
    rng: &mut R,
) -> f32 {
    let predict = rng.next_f32() < settings.ai_prediction;

    let mut target = if predict && ball.vel.x.abs() >= f32::EPSILON {
        let steps = ((paddle.pos.x - ball.pos.x) / ball.vel.x).abs();
        let predicted_y = ball.pos.y + ball.vel.y * steps;
        predicted_y - paddle.height / 2.0
    } else {
        ball.center_y() - paddle.height / 2.0
    };

    let span = difficulty.jitter_span();
    if span > 0.0 {
        target += (rng.next_f32() - 0.5) * span;
    }

    target
}

/// Move `current` toward `target`, honoring the dead zone and speed cap
pub fn step_toward(current: f32, target: f32, settings: &DifficultySettings) -> f32 {
    let diff = target - current;
    if diff.abs() > settings.dead_zone() {
        current + diff.clamp(-settings.ai_speed, settings.ai_speed)
    } else {
        current
    }
}

/// The AI paddle's `y` after this tick, clamped to the field
pub fn next_paddle_y<R: RandomSource + ?Sized>(
    ball: &Ball,
    paddle: &Paddle,
    settings: &DifficultySettings,
    difficulty: Difficulty,
    field_height: f32,
    rng: &mut R,
) -> f32 {
    let target = compute_target_y(ball, paddle, settings, difficulty, rng);
    let moved = step_toward(paddle.pos.y, target, settings);
    if moved.is_nan() {
        return paddle.clamp_y(paddle.pos.y, field_height);
    }
    paddle.clamp_y(moved, field_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceRng;
    use crate::sim::state::Field;
    use glam::Vec2;
    use proptest::prelude::*;

    fn ai_paddle() -> Paddle {
        Paddle::right(&Field::default())
    }

    fn ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size: 12.0,
        }
    }

    #[test]
    fn test_tracking_target() {
        let settings = Difficulty::Hard.settings();
        // 0.9 >= 0.7 prediction chance -> track
        let mut rng = SequenceRng::new(vec![0.9]);
        let target = compute_target_y(
            &ball(400.0, 100.0, 5.0, 2.0),
            &ai_paddle(),
            &settings,
            Difficulty::Hard,
            &mut rng,
        );
        assert_eq!(target, 100.0 + 6.0 - 40.0);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_prediction_target() {
        let settings = Difficulty::Hard.settings();
        let mut rng = SequenceRng::new(vec![0.1]);
        // 368 units away at 4/tick -> 92 ticks; y = 100 + 1 * 92
        let target = compute_target_y(
            &ball(400.0, 100.0, 4.0, 1.0),
            &ai_paddle(),
            &settings,
            Difficulty::Hard,
            &mut rng,
        );
        assert!((target - (192.0 - 40.0)).abs() < 1e-3);
    }

    #[test]
    fn test_prediction_skipped_without_horizontal_speed() {
        let settings = Difficulty::Hard.settings();
        let mut rng = SequenceRng::new(vec![0.0]);
        let target = compute_target_y(
            &ball(400.0, 100.0, 0.0, 3.0),
            &ai_paddle(),
            &settings,
            Difficulty::Hard,
            &mut rng,
        );
        assert!(target.is_finite());
        assert_eq!(target, 66.0);
    }

    #[test]
    fn test_jitter_bounds() {
        let settings = Difficulty::Easy.settings();
        let b = ball(400.0, 100.0, 5.0, 0.0);
        let base = 66.0;

        let mut low = SequenceRng::new(vec![0.99, 0.0]);
        let t = compute_target_y(&b, &ai_paddle(), &settings, Difficulty::Easy, &mut low);
        assert!((t - (base - 30.0)).abs() < 1e-4);

        let mut high = SequenceRng::new(vec![0.99, 0.999]);
        let t = compute_target_y(&b, &ai_paddle(), &settings, Difficulty::Easy, &mut high);
        assert!(t < base + 30.0 && t > base + 29.0);

        let medium = Difficulty::Medium.settings();
        let mut low = SequenceRng::new(vec![0.99, 0.0]);
        let t = compute_target_y(&b, &ai_paddle(), &medium, Difficulty::Medium, &mut low);
        assert!((t - (base - 15.0)).abs() < 1e-4);
    }

    #[test]
    fn test_hard_dead_zone_and_speed() {
        let hard = Difficulty::Hard.settings();
        // Inside the 5 unit dead zone: hold still
        assert_eq!(step_toward(100.0, 104.0, &hard), 100.0);
        assert_eq!(step_toward(100.0, 95.0, &hard), 100.0);
        // Just outside: move the whole distance when within one step
        assert_eq!(step_toward(100.0, 105.5, &hard), 105.5);
        // Far away: capped at 6 per tick
        assert_eq!(step_toward(100.0, 200.0, &hard), 106.0);
        assert_eq!(step_toward(100.0, 0.0, &hard), 94.0);
    }

    #[test]
    fn test_easy_dead_zone() {
        let easy = Difficulty::Easy.settings();
        assert_eq!(step_toward(100.0, 129.0, &easy), 100.0);
        assert_eq!(step_toward(100.0, 131.0, &easy), 102.5);
    }

    #[test]
    fn test_clamped_at_edges() {
        let hard = Difficulty::Hard.settings();
        let mut paddle = ai_paddle();
        paddle.pos.y = 2.0;
        let mut rng = SequenceRng::new(vec![0.9]);
        let y = next_paddle_y(&ball(400.0, -50.0, 5.0, 0.0), &paddle, &hard, Difficulty::Hard, 400.0, &mut rng);
        assert_eq!(y, 0.0);

        paddle.pos.y = 318.0;
        let y = next_paddle_y(&ball(400.0, 500.0, 5.0, 0.0), &paddle, &hard, Difficulty::Hard, 400.0, &mut rng);
        assert_eq!(y, 320.0);
    }

    proptest! {
        #[test]
        fn prop_output_within_field(
            bx in -100.0f32..900.0,
            by in -100.0f32..500.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            py in 0.0f32..320.0,
            r1 in 0.0f32..1.0,
            r2 in 0.0f32..1.0,
            level in 0usize..3,
        ) {
            let difficulty = Difficulty::ALL[level];
            let settings = difficulty.settings();
            let mut paddle = ai_paddle();
            paddle.pos.y = py;
            let mut rng = SequenceRng::new(vec![r1, r2]);
            let y = next_paddle_y(&ball(bx, by, vx, vy), &paddle, &settings, difficulty, 400.0, &mut rng);
            prop_assert!((0.0..=320.0).contains(&y));
        }

        #[test]
        fn prop_never_moves_more_than_speed(
            current in 0.0f32..320.0,
            target in -500.0f32..900.0,
            level in 0usize..3,
        ) {
            let settings = Difficulty::ALL[level].settings();
            let next = step_toward(current, target, &settings);
            prop_assert!((next - current).abs() <= settings.ai_speed + 1e-4);
            // Never overshoots the target
            prop_assert!((target - next).abs() <= (target - current).abs() + 1e-4);
        }
    }
}
