//! Paddle movement and ball launch
//!
//! Commands move the paddle one step at a time. A move that would push the
//! paddle out of the field is ignored. While the ball rests on the paddle it
//! moves with it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Input command for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Command {
    #[default]
    Hold,
    Launch,
    MoveLeft,
    MoveRight,
}

impl Command {
    /// Decode a wire/command code; unknown codes hold
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Command::Launch,
            2 => Command::MoveLeft,
            3 => Command::MoveRight,
            _ => Command::Hold,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Command::Hold => 0,
            Command::Launch => 1,
            Command::MoveLeft => 2,
            Command::MoveRight => 3,
        }
    }
}

/// Apply one command to the paddle and (if resting) the ball
pub fn apply_command(state: &mut GameState, command: Command) {
    let step = state.config.paddle_step;
    match command {
        Command::Hold => {}
        Command::MoveLeft => shift_paddle(state, -step),
        Command::MoveRight => shift_paddle(state, step),
        Command::Launch => launch(state),
    }
}

fn shift_paddle(state: &mut GameState, dx: f32) {
    let Some(paddle) = state.paddle.shifted(dx, state.config.field_width) else {
        return;
    };
    state.paddle = paddle;
    if !state.ball.is_moving() {
        let center = state.ball.center() + Vec2::new(dx, 0.0);
        state.ball = state.ball.with_center(center);
    }
}

/// Release a resting ball with a random horizontal speed
pub fn launch(state: &mut GameState) {
    if state.ball.is_moving() {
        return;
    }
    let max = state.config.launch_vx_max.abs();
    let vx = state.rng.random_range(-max..=max) as f32;
    let vel = Vec2::new(vx, state.config.launch_vy);
    state.ball = state.ball.launched(vel);
    log::debug!("Ball launched at tick {} with velocity {:?}", state.ticks, vel);
}
