//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` is one fixed step
//! - Seeded RNG only (owned by the episode)
//! - Stable iteration order (blocks in registration order)
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod layout;
pub mod motion;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{
    Advance, Contact, Side, WallResolution, advance, block_rebound, overlaps, paddle_rebound,
    resolve_walls, separation,
};
pub use layout::{BlockGrid, generate_layout};
pub use motion::{Command, apply_command, launch};
pub use rect::{Circle, Rect};
pub use state::{Ball, BallState, Block, BlockView, GamePhase, GameState, Paddle, Snapshot};
pub use tick::{Outcome, StepOutcome, tick};
