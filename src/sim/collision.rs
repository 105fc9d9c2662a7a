//! Collision detection and response for the ball
//!
//! The overlap test is the cheap "rounded rectangle" approximation: measure
//! how far the ball center sits outside the rectangle on each axis and call
//! it a hit when both distances are under the ball radius. Which face was
//! struck is then read off a small table keyed by the velocity signs, not by
//! exact geometry.
//!
//! Resolution order per tick: walls first (always), then the paddle, then
//! blocks in registration order. At most one object is resolved per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Ball, GameState};

/// Face of a rectangle the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    Corner,
}

impl Side {
    /// Classify the struck face from the velocity signs and the per-axis
    /// separation. An exact tie is always a corner.
    pub fn classify(vel: Vec2, x_dist: f32, y_dist: f32) -> Side {
        if x_dist == y_dist {
            return Side::Corner;
        }
        let vertical_face = x_dist < y_dist;
        match (vel.x < 0.0, vel.y < 0.0) {
            (true, true) if vertical_face => Side::Bottom,
            (true, true) => Side::Right,
            (true, false) if vertical_face => Side::Top,
            (true, false) => Side::Right,
            (false, true) if vertical_face => Side::Bottom,
            (false, true) => Side::Left,
            (false, false) if vertical_face => Side::Top,
            (false, false) => Side::Left,
        }
    }

    /// Left/right hits flip vx; everything else (corners too) flips vy
    pub fn flips_horizontal(&self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Per-axis distance from the ball center to the rectangle's edges
///
/// Negative on an axis means the center is within the rectangle's span there.
#[inline]
pub fn separation(center: Vec2, rect: &Rect) -> Vec2 {
    (center - rect.center()).abs() - rect.half_extents()
}

/// Rounded-rectangle overlap test
#[inline]
pub fn overlaps(separation: Vec2, radius: f32) -> bool {
    separation.x < radius && separation.y < radius
}

/// Result of clamping a tentative ball position against the field walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallResolution {
    pub ball: Ball,
    /// The ball crossed the floor (episode loss)
    pub floor_hit: bool,
    /// Any wall reflected the ball
    pub bounced: bool,
}

/// Reflect a tentative ball position off the field walls
///
/// Penetration past a wall is mirrored back inside and the matching velocity
/// component is negated, so speed is preserved. Only the floor is terminal.
pub fn resolve_walls(ball: Ball, width: f32, height: f32) -> WallResolution {
    let body = ball.body;
    let r = body.radius;
    let mut pos = body.center;
    let mut vel = ball.vel;
    let mut floor_hit = false;
    let mut bounced = false;

    if body.left() <= 0.0 {
        pos.x = r + body.left().abs();
        vel.x = -vel.x;
        bounced = true;
    } else if body.right() >= width {
        pos.x = width - (body.right() - width).abs() - r;
        vel.x = -vel.x;
        bounced = true;
    }

    if body.top() <= 0.0 {
        pos.y = r + body.top().abs();
        vel.y = -vel.y;
        bounced = true;
    } else if body.bottom() >= height {
        pos.y = height - (body.bottom() - height).abs() - r;
        vel.y = -vel.y;
        floor_hit = true;
        bounced = true;
    }

    WallResolution {
        ball: ball.with_center(pos).with_vel(vel),
        floor_hit,
        bounced,
    }
}

/// True when the ball moves toward the paddle half it did not strike
///
/// Moving right into the left half, or left into the right half.
#[inline]
pub fn strikes_against_motion(vx: f32, strike: f32) -> bool {
    (vx > 0.0 && strike < 0.5) || (vx < 0.0 && strike >= 0.5)
}

/// Paddle bounce: vy always flips; vx flips with a random rescale when the
/// ball strikes against its motion
pub fn paddle_rebound<R: Rng>(vel: Vec2, strike: f32, jitter: i32, rng: &mut R) -> Vec2 {
    let mut out = Vec2::new(vel.x, -vel.y);
    if strikes_against_motion(vel.x, strike) {
        let jitter = jitter.abs();
        let r = rng.random_range(-jitter..=jitter);
        out.x = -vel.x * ((100 + r) as f32 / 100.0).abs();
    }
    out
}

/// Block bounce by struck side
#[inline]
pub fn block_rebound(vel: Vec2, side: Side) -> Vec2 {
    if side.flips_horizontal() {
        Vec2::new(-vel.x, vel.y)
    } else {
        Vec2::new(vel.x, -vel.y)
    }
}

/// The object the ball hit this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    Paddle {
        side: Side,
        strike: f32,
    },
    Block {
        /// Index in the block list before the hit
        index: usize,
        side: Side,
        destroyed: bool,
    },
}

/// Outcome of advancing a free ball one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Advance {
    pub floor_hit: bool,
    pub score_delta: u32,
    pub reward: i32,
    pub contact: Option<Contact>,
}

/// Move the ball one tick and resolve wall, paddle and block collisions
pub fn advance(state: &mut GameState) -> Advance {
    let mut report = Advance::default();
    if !state.ball.is_moving() {
        return report;
    }

    let ball = state.ball;
    let tentative = ball.with_center(ball.center() + ball.vel);
    let walls = resolve_walls(tentative, state.config.field_width, state.config.field_height);
    report.floor_hit = walls.floor_hit;
    let mut ball = walls.ball;
    let radius = ball.radius();

    let sep = separation(ball.center(), &state.paddle.rect);
    if overlaps(sep, radius) {
        let side = Side::classify(ball.vel, sep.x, sep.y);
        let strike = state.paddle.strike_coefficient(ball.center().x);
        let vel = paddle_rebound(ball.vel, strike, state.config.spin_jitter, &mut state.rng);
        if vel.x != ball.vel.x {
            log::debug!(
                "Paddle spin at strike {:.3}: vx {} -> {}",
                strike,
                ball.vel.x,
                vel.x
            );
        }
        ball = ball.with_vel(vel);
        report.reward += state.config.rewards.paddle_hit;
        report.contact = Some(Contact::Paddle { side, strike });
    } else if let Some((index, side)) = first_block_hit(state, &ball) {
        let block = state.blocks[index];
        let destroyed = match block.hit() {
            Some(weakened) => {
                state.blocks[index] = weakened;
                false
            }
            None => {
                state.blocks.remove(index);
                log::debug!(
                    "Block at ({}, {}) destroyed, {} left",
                    block.rect.x0,
                    block.rect.y0,
                    state.blocks.len()
                );
                true
            }
        };
        ball = ball.with_vel(block_rebound(ball.vel, side));
        state.score += 1;
        report.score_delta = 1;
        report.reward += state.config.rewards.block_hit;
        report.contact = Some(Contact::Block {
            index,
            side,
            destroyed,
        });
    }

    state.ball = ball;
    report
}

/// First block (in list order) overlapping the ball, with the struck side
fn first_block_hit(state: &GameState, ball: &Ball) -> Option<(usize, Side)> {
    state.blocks.iter().enumerate().find_map(|(index, block)| {
        let sep = separation(ball.center(), &block.rect);
        overlaps(sep, ball.radius()).then(|| (index, Side::classify(ball.vel, sep.x, sep.y)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::rect::Circle;
    use crate::sim::state::{BallState, Block};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn free_ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            body: Circle::new(Vec2::new(x, y), 10.0),
            vel: Vec2::new(vx, vy),
            state: BallState::Free,
        }
    }

    /// Episode with no blocks unless the test adds some
    fn open_field() -> GameState {
        let mut config = GameConfig::default();
        config.layout.base_row_count = 0;
        config.layout.extra_blocks = 0;
        GameState::new(config, 1)
    }

    #[test]
    fn test_side_table() {
        let left_up = Vec2::new(-1.0, -1.0);
        let left_down = Vec2::new(-1.0, 1.0);
        let right_up = Vec2::new(1.0, -1.0);
        let right_down = Vec2::new(1.0, 1.0);
        let cases = [
            // (velocity, x < y, x == y, x > y)
            (left_up, Side::Bottom, Side::Corner, Side::Right),
            (left_down, Side::Top, Side::Corner, Side::Right),
            (right_up, Side::Bottom, Side::Corner, Side::Left),
            (right_down, Side::Top, Side::Corner, Side::Left),
        ];
        for (vel, less, tie, greater) in cases {
            assert_eq!(Side::classify(vel, 1.0, 5.0), less, "{vel:?} x<y");
            assert_eq!(Side::classify(vel, 3.0, 3.0), tie, "{vel:?} x==y");
            assert_eq!(Side::classify(vel, 5.0, 1.0), greater, "{vel:?} x>y");
        }
    }

    #[test]
    fn test_side_table_zero_velocity_counts_as_non_negative() {
        assert_eq!(Side::classify(Vec2::ZERO, 1.0, 2.0), Side::Top);
        assert_eq!(Side::classify(Vec2::new(0.0, -2.0), 2.0, 1.0), Side::Left);
        assert_eq!(Side::classify(Vec2::new(-2.0, 0.0), 1.0, 2.0), Side::Top);
    }

    #[test]
    fn test_separation_and_overlap() {
        let rect = Rect::new(100.0, 140.0, 100.0, 120.0);
        let sep = separation(Vec2::new(120.0, 95.0), &rect);
        assert_eq!(sep, Vec2::new(-20.0, 5.0));
        assert!(overlaps(sep, 10.0));

        let sep = separation(Vec2::new(150.0, 110.0), &rect);
        assert_eq!(sep, Vec2::new(10.0, -10.0));
        assert!(!overlaps(sep, 10.0), "touching is not overlapping");
    }

    #[test]
    fn test_wall_left_reflection() {
        let res = resolve_walls(free_ball(7.0, 200.0, -4.0, 3.0), 640.0, 480.0);
        assert_eq!(res.ball.center(), Vec2::new(13.0, 200.0));
        assert_eq!(res.ball.vel, Vec2::new(4.0, 3.0));
        assert!(res.bounced);
        assert!(!res.floor_hit);
    }

    #[test]
    fn test_wall_right_and_top_reflection() {
        let res = resolve_walls(free_ball(636.0, 4.0, 4.0, -3.0), 640.0, 480.0);
        assert_eq!(res.ball.center(), Vec2::new(624.0, 16.0));
        assert_eq!(res.ball.vel, Vec2::new(-4.0, 3.0));
        assert!(!res.floor_hit);
    }

    #[test]
    fn test_floor_is_terminal() {
        let res = resolve_walls(free_ball(320.0, 473.0, 1.0, 3.0), 640.0, 480.0);
        assert!(res.floor_hit);
        assert_eq!(res.ball.center().y, 467.0);
        assert_eq!(res.ball.vel.y, -3.0);
    }

    #[test]
    fn test_no_wall_contact() {
        let ball = free_ball(320.0, 240.0, 2.0, -3.0);
        let res = resolve_walls(ball, 640.0, 480.0);
        assert_eq!(res.ball, ball);
        assert!(!res.bounced);
    }

    #[test]
    fn test_paddle_rebound_spins_against_motion() {
        // Paddle [290, 350], strike at x=300 moving right
        let strike = (300.0 - 290.0) / 60.0;
        assert!(strike < 0.5);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let vel = paddle_rebound(Vec2::new(3.0, 3.0), strike, 40, &mut rng);
            assert_eq!(vel.y, -3.0);
            assert!(vel.x < 0.0);
            assert!((-4.21..=-1.79).contains(&vel.x), "vx {}", vel.x);
        }
    }

    #[test]
    fn test_paddle_rebound_with_motion_keeps_vx() {
        let mut rng = Pcg32::seed_from_u64(11);
        // Moving right into the right half
        let vel = paddle_rebound(Vec2::new(3.0, 3.0), 0.8, 40, &mut rng);
        assert_eq!(vel, Vec2::new(3.0, -3.0));
        // Moving left into the left half
        let vel = paddle_rebound(Vec2::new(-2.0, 3.0), 0.2, 40, &mut rng);
        assert_eq!(vel, Vec2::new(-2.0, -3.0));
        // Straight down never spins
        let vel = paddle_rebound(Vec2::new(0.0, 3.0), 0.1, 40, &mut rng);
        assert_eq!(vel, Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_strike_against_motion_boundary() {
        assert!(strikes_against_motion(-1.0, 0.5));
        assert!(!strikes_against_motion(1.0, 0.5));
    }

    #[test]
    fn test_block_rebound() {
        let vel = Vec2::new(2.0, -3.0);
        assert_eq!(block_rebound(vel, Side::Left), Vec2::new(-2.0, -3.0));
        assert_eq!(block_rebound(vel, Side::Right), Vec2::new(-2.0, -3.0));
        assert_eq!(block_rebound(vel, Side::Top), Vec2::new(2.0, 3.0));
        assert_eq!(block_rebound(vel, Side::Bottom), Vec2::new(2.0, 3.0));
        assert_eq!(block_rebound(vel, Side::Corner), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_advance_paddle_hit() {
        let mut state = open_field();
        // Falling onto the paddle's right half, moving right
        state.ball = free_ball(335.0, 418.0, 2.0, 3.0);
        let report = advance(&mut state);

        assert!(matches!(report.contact, Some(Contact::Paddle { .. })));
        assert_eq!(report.reward, 10);
        assert_eq!(report.score_delta, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.center(), Vec2::new(337.0, 421.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn test_advance_block_from_below() {
        let mut state = open_field();
        let rect = Rect::new(300.0, 340.0, 100.0, 120.0);
        state.blocks.push(Block::new(rect, 2));
        state.ball = free_ball(320.0, 132.0, 1.0, -3.0);

        let report = advance(&mut state);
        assert_eq!(
            report.contact,
            Some(Contact::Block {
                index: 0,
                side: Side::Bottom,
                destroyed: false
            })
        );
        assert_eq!(report.reward, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.blocks, vec![Block::new(rect, 1)]);
        assert_eq!(state.ball.vel, Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_advance_side_hit_destroys_block() {
        let mut state = open_field();
        let rect = Rect::new(300.0, 340.0, 100.0, 120.0);
        state.blocks.push(Block::new(rect, 1));
        // Approaching the left face, moving right and up
        state.ball = free_ball(288.0, 110.0, 4.0, -1.0);

        let report = advance(&mut state);
        assert!(matches!(
            report.contact,
            Some(Contact::Block {
                side: Side::Left,
                destroyed: true,
                ..
            })
        ));
        assert!(state.blocks.is_empty());
        assert_eq!(state.ball.vel, Vec2::new(-4.0, -1.0));
    }

    #[test]
    fn test_advance_only_first_block_is_hit() {
        let mut state = open_field();
        let a = Rect::new(280.0, 320.0, 100.0, 120.0);
        let b = Rect::new(322.0, 362.0, 100.0, 120.0);
        state.blocks.push(Block::new(a, 1));
        state.blocks.push(Block::new(b, 1));
        state.ball = free_ball(321.0, 131.0, 0.0, -3.0);

        advance(&mut state);
        assert_eq!(state.blocks, vec![Block::new(b, 1)]);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_advance_attached_ball_is_noop() {
        let mut state = open_field();
        let before = state.ball;
        assert_eq!(advance(&mut state), Advance::default());
        assert_eq!(state.ball, before);
    }

    #[test]
    fn test_advance_wall_then_object_in_one_tick() {
        let mut state = open_field();
        let rect = Rect::new(6.0, 46.0, 100.0, 120.0);
        state.blocks.push(Block::new(rect, 1));
        // Bounces off the left wall and lands under the block
        state.ball = free_ball(12.0, 132.0, -4.0, -3.0);

        let report = advance(&mut state);
        assert_eq!(state.ball.center(), Vec2::new(12.0, 129.0));
        assert!(matches!(report.contact, Some(Contact::Block { .. })));
        // vx flipped by the wall, vy flipped by the block bottom
        assert_eq!(state.ball.vel, Vec2::new(4.0, 3.0));
    }
}
