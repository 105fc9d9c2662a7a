//! Reset/step environment for automated agents
//!
//! Agents do not send absolute commands. They steer a persistent heading
//! around a ring of four moves with one-hot actions:
//!
//! ```text
//! [Idle, Launch, Right, Left]
//!   [1,0,0,0] keep      [0,0,1,0] one step on
//!   [0,0,0,1] two steps [0,1,0,0] one step back
//! ```
//!
//! The heading stays in force until changed, so a `Right` heading keeps the
//! paddle sliding right every tick.

use serde::{Deserialize, Serialize};

use crate::settings::GameConfig;
use crate::sim::{Command, GameState, Snapshot, StepOutcome, tick};

/// Persistent movement heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Idle,
    Launch,
    Right,
    Left,
}

impl Heading {
    const RING: [Heading; 4] = [Heading::Idle, Heading::Launch, Heading::Right, Heading::Left];

    fn index(&self) -> usize {
        match self {
            Heading::Idle => 0,
            Heading::Launch => 1,
            Heading::Right => 2,
            Heading::Left => 3,
        }
    }

    /// Rotate by `steps` positions around the ring
    pub fn rotated(&self, steps: i32) -> Self {
        let idx = (self.index() as i32 + steps).rem_euclid(4) as usize;
        Self::RING[idx]
    }

    pub fn command(&self) -> Command {
        match self {
            Heading::Idle => Command::Hold,
            Heading::Launch => Command::Launch,
            Heading::Right => Command::MoveRight,
            Heading::Left => Command::MoveLeft,
        }
    }
}

/// Heading change requested by an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentAction {
    Keep,
    Clockwise,
    Reverse,
    CounterClockwise,
}

impl AgentAction {
    /// Decode a one-hot action; anything malformed keeps the heading
    pub fn from_one_hot(action: [u8; 4]) -> Self {
        match action {
            [1, 0, 0, 0] => AgentAction::Keep,
            [0, 1, 0, 0] => AgentAction::CounterClockwise,
            [0, 0, 1, 0] => AgentAction::Clockwise,
            [0, 0, 0, 1] => AgentAction::Reverse,
            _ => AgentAction::Keep,
        }
    }

    fn steps(&self) -> i32 {
        match self {
            AgentAction::Keep => 0,
            AgentAction::Clockwise => 1,
            AgentAction::Reverse => 2,
            AgentAction::CounterClockwise => -1,
        }
    }

    pub fn apply(&self, heading: Heading) -> Heading {
        heading.rotated(self.steps())
    }
}

/// Result of one agent step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Field after the step
    pub snapshot: Snapshot,
    pub reward: i32,
    pub done: bool,
    pub score: u32,
}

impl StepResult {
    fn new(outcome: &StepOutcome, snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            reward: outcome.reward,
            done: outcome.terminal,
            score: outcome.score,
        }
    }
}

/// Episode wrapper exposing reset/step/reward/done
#[derive(Debug, Clone)]
pub struct AgentEnv {
    state: GameState,
    heading: Heading,
    /// Sum of rewards this episode
    total_reward: i64,
}

impl AgentEnv {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            state: GameState::new(config, seed),
            heading: Heading::Launch,
            total_reward: 0,
        }
    }

    /// Start a fresh episode and return its first snapshot
    pub fn reset(&mut self, seed: u64) -> Snapshot {
        self.state.reset(seed);
        self.heading = Heading::Launch;
        self.total_reward = 0;
        self.state.snapshot()
    }

    /// Turn the heading by `action`, then run one tick with its command
    pub fn step(&mut self, action: [u8; 4]) -> StepResult {
        self.heading = AgentAction::from_one_hot(action).apply(self.heading);
        let outcome = tick(&mut self.state, self.heading.command());
        self.total_reward += i64::from(outcome.reward);
        StepResult::new(&outcome, self.state.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn total_reward(&self) -> i64 {
        self.total_reward
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
