//! Fixed timestep simulation tick
//!
//! One call advances the episode by exactly one tick. Pacing against the
//! wall clock belongs to whoever calls this.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, advance};
use super::motion::{Command, apply_command};
use super::state::{GamePhase, GameState};

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    Stalled,
}

impl Outcome {
    fn from_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Won => Some(Outcome::Won),
            GamePhase::Lost => Some(Outcome::Lost),
            GamePhase::Stalled => Some(Outcome::Stalled),
            GamePhase::Serve | GamePhase::Playing => None,
        }
    }
}

/// What one tick produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Reward earned this tick
    pub reward: i32,
    pub terminal: bool,
    /// Episode score after this tick
    pub score: u32,
    pub outcome: Option<Outcome>,
    /// Object the ball hit this tick
    pub contact: Option<Contact>,
}

/// Advance the episode by one tick
pub fn tick(state: &mut GameState, command: Command) -> StepOutcome {
    // Finished episodes stay finished
    if state.is_terminal() {
        return StepOutcome {
            reward: 0,
            terminal: true,
            score: state.score,
            outcome: Outcome::from_phase(state.phase),
            contact: None,
        };
    }

    state.ticks += 1;

    apply_command(state, command);
    if state.ball.is_moving() && state.phase == GamePhase::Serve {
        state.phase = GamePhase::Playing;
    }

    let report = advance(state);
    let mut reward = report.reward;

    if report.floor_hit {
        // The loss penalty replaces anything earned this tick
        reward = state.config.rewards.loss;
        state.phase = GamePhase::Lost;
    }

    if state.blocks.is_empty() {
        reward += state.config.rewards.win;
        state.phase = GamePhase::Won;
    }

    if !state.is_terminal() {
        if let Some(limit) = state.config.stall_limit {
            if state.ticks >= limit {
                reward += state.config.rewards.loss;
                state.phase = GamePhase::Stalled;
            }
        }
    }

    let outcome = Outcome::from_phase(state.phase);
    if let Some(outcome) = outcome {
        log::info!(
            "Episode seed {} ended {:?} after {} ticks, score {}",
            state.seed,
            outcome,
            state.ticks,
            state.score
        );
    }

    StepOutcome {
        reward,
        terminal: outcome.is_some(),
        score: state.score,
        outcome,
        contact: report.contact,
    }
}
