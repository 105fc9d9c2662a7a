//! Game state and core simulation types
//!
//! One `GameState` is one episode. A reset builds a fresh value; nothing is
//! shared between episodes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::generate_layout;
use super::rect::{Circle, Rect};
use crate::settings::GameConfig;

/// Current phase of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on paddle, waiting for launch
    Serve,
    /// Ball in flight
    Playing,
    /// Every block destroyed
    Won,
    /// Ball left through the floor
    Lost,
    /// Tick limit reached without a win or loss
    Stalled,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost | GamePhase::Stalled)
    }
}

/// Ball state - resting on the paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Rides on top of the paddle with zero velocity
    Attached,
    Free,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Circle,
    /// Pixels per tick
    pub vel: Vec2,
    pub state: BallState,
}

impl Ball {
    /// A ball resting on top of the paddle, centered
    pub fn resting_on(paddle: &Paddle, radius: f32) -> Self {
        let center = Vec2::new(paddle.rect.center().x, paddle.rect.y0 - radius);
        Self {
            body: Circle::new(center, radius),
            vel: Vec2::ZERO,
            state: BallState::Attached,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.body.radius
    }

    pub fn is_moving(&self) -> bool {
        self.state == BallState::Free
    }

    pub fn with_center(&self, center: Vec2) -> Self {
        Self {
            body: self.body.with_center(center),
            ..*self
        }
    }

    pub fn with_vel(&self, vel: Vec2) -> Self {
        Self { vel, ..*self }
    }

    /// Switch to free flight with the given velocity
    pub fn launched(&self, vel: Vec2) -> Self {
        Self {
            vel,
            state: BallState::Free,
            ..*self
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    /// Centered horizontally, resting `floor_gap` above the floor
    pub fn centered(config: &GameConfig) -> Self {
        let x0 = config.field_width / 2.0 - config.paddle_width / 2.0;
        let rect = Rect::from_origin(
            x0,
            config.paddle_top(),
            config.paddle_width,
            config.paddle_height,
        );
        Self { rect }
    }

    /// The paddle moved by `dx`, or `None` if it would leave [0, field_width]
    pub fn shifted(&self, dx: f32, field_width: f32) -> Option<Self> {
        let rect = self.rect.translated(dx, 0.0);
        rect.within_span(field_width).then_some(Self { rect })
    }

    /// Normalized strike position: 0 at the left edge, 1 at the right edge
    pub fn strike_coefficient(&self, x: f32) -> f32 {
        (x - self.rect.x0) / self.rect.width()
    }
}

/// A destructible block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    /// Hits remaining (always >= 1 while the block exists)
    pub durability: u8,
}

impl Block {
    pub fn new(rect: Rect, durability: u8) -> Self {
        Self { rect, durability }
    }

    /// Register one hit: `None` if the block breaks, else the weakened block
    pub fn hit(&self) -> Option<Self> {
        (self.durability > 1).then(|| Self {
            durability: self.durability - 1,
            ..*self
        })
    }
}

/// Read-only view of a block for frontends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockView {
    pub rect: Rect,
    pub durability: u8,
}

/// Per-tick state handed to the render/input adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball: Circle,
    pub ball_moving: bool,
    pub blocks: Vec<BlockView>,
    pub score: u32,
    pub ticks: u64,
    pub phase: GamePhase,
}

/// Complete episode state (deterministic for a given config and seed)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Episode seed for reproducibility
    pub seed: u64,
    /// Source of launch, spin and layout randomness
    pub rng: Pcg32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Active blocks, in registration order
    pub blocks: Vec<Block>,
    /// Blocks hit this episode
    pub score: u32,
    /// Simulation tick counter
    pub ticks: u64,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new episode with the given seed
    ///
    /// The config should pass [`GameConfig::validate`]; one that does not
    /// still yields an episode, possibly with an empty field.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::centered(&config);
        let ball = Ball::resting_on(&paddle, config.ball_radius);
        let blocks = generate_layout(&config, &mut rng);

        log::info!("Episode seed {}: {} blocks placed", seed, blocks.len());

        Self {
            config,
            seed,
            rng,
            paddle,
            ball,
            blocks,
            score: 0,
            ticks: 0,
            phase: GamePhase::Serve,
        }
    }

    /// Replace this episode with a fresh one
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.config.clone(), seed);
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paddle: self.paddle.rect,
            ball: self.ball.body,
            ball_moving: self.ball.is_moving(),
            blocks: self
                .blocks
                .iter()
                .map(|b| BlockView {
                    rect: b.rect,
                    durability: b.durability,
                })
                .collect(),
            score: self.score,
            ticks: self.ticks,
            phase: self.phase,
        }
    }
}
