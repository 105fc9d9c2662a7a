//! Brickfall - a brick-breaker physics core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, layout, step driver)
//! - `agent`: Reset/step environment with heading-relative actions
//! - `frontend`: Render/input adapter contract and episode loop
//! - `autopilot`: Headless ball-tracking frontend
//! - `settings`: Data-driven game configuration and variant presets
//! - `highscores`: In-memory session leaderboard

pub mod agent;
pub mod autopilot;
pub mod frontend;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use agent::{AgentAction, AgentEnv, Heading, StepResult};
pub use frontend::{Control, EpisodeEnd, Frontend, run_episode};
pub use highscores::HighScores;
pub use settings::{GameConfig, Variant};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Base grid unit: block height, ball diameter and paddle step
    pub const BLOCK_SIZE: f32 = 20.0;
    /// Bricks are two units wide
    pub const BLOCK_WIDTH: f32 = BLOCK_SIZE * 2.0;
    /// Gap between neighbouring bricks
    pub const BLOCK_GAP: f32 = 2.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const ARCADE_PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = BLOCK_SIZE;
    /// Gap between paddle bottom and the floor
    pub const PADDLE_FLOOR_GAP: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = BLOCK_SIZE / 2.0;
    /// Launch vx is drawn from [-LAUNCH_VX_MAX, LAUNCH_VX_MAX]
    pub const LAUNCH_VX_MAX: i32 = 4;
    /// Launch vy (negative is up)
    pub const LAUNCH_VY: f32 = -3.0;
    /// Paddle spin rescales vx by |100 + r| / 100, r in [-SPIN_JITTER, SPIN_JITTER]
    pub const SPIN_JITTER: i32 = 40;

    /// Layout defaults
    pub const BASE_ROW_START: u32 = 6;
    pub const BASE_ROW_COUNT: u32 = 2;
    pub const EXTRA_BLOCKS: u32 = 8;
    pub const ARCADE_EXTRA_BLOCKS: u32 = 25;
    pub const EXTRA_ROW_SPAN: u32 = 6;

    /// Rewards
    pub const PADDLE_HIT_REWARD: i32 = 10;
    pub const BLOCK_HIT_REWARD: i32 = 1;
    pub const LOSS_PENALTY: i32 = -10;
    pub const WIN_BONUS: i32 = 30;

    /// Ticks per second for each frontend style
    pub const AGENT_TICK_RATE: u32 = 40;
    pub const ARCADE_TICK_RATE: u32 = 20;
}
