//! Headless ball-tracking frontend
//!
//! Plays from snapshots alone: velocity is inferred from consecutive ball
//! positions, and the paddle chases the predicted landing point.

use glam::Vec2;

use crate::frontend::{Control, Frontend};
use crate::settings::GameConfig;
use crate::sim::{Command, Contact, Snapshot, StepOutcome};

/// Simple tracking player
#[derive(Debug, Clone)]
pub struct Autopilot {
    field_width: f32,
    paddle_step: f32,
    last_center: Option<Vec2>,
    /// Running reward, for reporting
    pub reward: i64,
    pub paddle_hits: u32,
}

impl Autopilot {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            field_width: config.field_width,
            paddle_step: config.paddle_step,
            last_center: None,
            reward: 0,
            paddle_hits: 0,
        }
    }

    /// Predicted ball x when it comes down to `target_y`, folding wall bounces
    fn landing_x(&self, pos: Vec2, vel: Vec2, radius: f32, target_y: f32) -> f32 {
        if vel.y <= 0.0 {
            // Going up: just shadow the ball
            return pos.x;
        }
        let ticks = ((target_y - pos.y) / vel.y).max(0.0);
        let raw = pos.x + vel.x * ticks;

        // Reflect into [radius, width - radius]
        let lo = radius;
        let span = (self.field_width - 2.0 * radius).max(1.0);
        let folded = (raw - lo).rem_euclid(2.0 * span);
        lo + if folded > span { 2.0 * span - folded } else { folded }
    }
}

impl Frontend for Autopilot {
    fn poll(&mut self, snapshot: &Snapshot) -> Control {
        let center = snapshot.ball.center;
        if !snapshot.ball_moving {
            self.last_center = None;
            return Command::Launch.into();
        }

        let vel = self
            .last_center
            .map(|prev| center - prev)
            .unwrap_or(Vec2::ZERO);
        self.last_center = Some(center);

        let target_y = snapshot.paddle.y0 - snapshot.ball.radius;
        let mut target = self.landing_x(center, vel, snapshot.ball.radius, target_y);

        // Vary the strike point so rallies do not loop forever
        let time_factor = snapshot.ticks as f32 * 0.01;
        let offset = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15)
            * snapshot.paddle.width();
        target += offset;

        let paddle_center = snapshot.paddle.center().x;
        let delta = target - paddle_center;
        if delta.abs() < self.paddle_step / 2.0 {
            Command::Hold.into()
        } else if delta > 0.0 {
            Command::MoveRight.into()
        } else {
            Command::MoveLeft.into()
        }
    }

    fn present(&mut self, snapshot: &Snapshot, outcome: &StepOutcome) {
        self.reward += i64::from(outcome.reward);
        if matches!(outcome.contact, Some(Contact::Paddle { .. })) {
            self.paddle_hits += 1;
            log::trace!("Paddle hit at tick {}", snapshot.ticks);
        }
    }
}
