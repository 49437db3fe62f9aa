//! Collision detection and response
//!
//! Everything is an axis-aligned rectangle: the ball is treated as its
//! bounding square.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::{PADDLE_SPEEDUP, SPIN_FACTOR};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Strict overlap test: rectangles that only share an edge do not intersect
#[inline]
pub fn rect_intersect(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.max().x && a.max().x > b.pos.x && a.pos.y < b.max().y && a.max().y > b.pos.y
}

/// What the ball touched during a resolve pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Bounced off the top or bottom wall
    pub wall: bool,
    /// Returned by a paddle
    pub paddle: Option<Side>,
}

/// Bounce off the top/bottom walls. Returns true on contact.
pub fn resolve_walls(ball: &mut Ball, field_height: f32) -> bool {
    let mut hit = false;
    if ball.pos.y < 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = -ball.vel.y;
        hit = true;
    }
    if ball.pos.y + ball.size > field_height {
        ball.pos.y = field_height - ball.size;
        ball.vel.y = -ball.vel.y;
        hit = true;
    }
    hit
}

/// Reflect off a paddle: speed up horizontally and add spin from the
/// contact offset relative to the paddle center.
fn paddle_response(ball: &mut Ball, paddle: &Paddle, flush_x: f32) {
    ball.pos.x = flush_x;
    ball.vel.x *= -PADDLE_SPEEDUP;
    ball.vel.y += (ball.center_y() - paddle.center_y()) * SPIN_FACTOR;
}

/// Resolve wall and paddle collisions for this tick, mutating the ball.
///
/// A paddle only returns a ball that is travelling toward it, so a ball
/// still overlapping after a hit is not reflected twice.
pub fn resolve(ball: &mut Ball, left: &Paddle, right: &Paddle, field_height: f32) -> Contact {
    let mut contact = Contact {
        wall: resolve_walls(ball, field_height),
        paddle: None,
    };

    if ball.vel.x < 0.0 && rect_intersect(&ball.rect(), &left.rect()) {
        paddle_response(ball, left, left.pos.x + left.width);
        contact.paddle = Some(Side::Player);
    }

    if ball.vel.x > 0.0 && rect_intersect(&ball.rect(), &right.rect()) {
        paddle_response(ball, right, right.pos.x - ball.size);
        contact.paddle = Some(Side::Ai);
    }

    contact
}
