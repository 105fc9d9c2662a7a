//! Render/input adapter contract
//!
//! The simulation never draws, polls devices or sleeps. A frontend gets a
//! read-only snapshot each tick, answers with one command (or a quit), and is
//! shown the result afterwards.

use crate::sim::{Command, GameState, Snapshot, StepOutcome, tick};

/// What a frontend wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Command(Command),
    /// Stop the episode loop before the next tick
    Quit,
}

impl From<Command> for Control {
    fn from(command: Command) -> Self {
        Control::Command(command)
    }
}

/// A render/input collaborator
pub trait Frontend {
    /// Produce the command for the next tick
    fn poll(&mut self, snapshot: &Snapshot) -> Control;

    /// Show the state after a tick
    fn present(&mut self, _snapshot: &Snapshot, _outcome: &StepOutcome) {}
}

/// Why `run_episode` returned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpisodeEnd {
    /// The episode reached a terminal state; carries the final tick
    Finished(StepOutcome),
    /// The frontend asked to stop
    Quit,
}

/// Drive `state` with `frontend` until the episode ends or the frontend quits
pub fn run_episode<F: Frontend + ?Sized>(state: &mut GameState, frontend: &mut F) -> EpisodeEnd {
    let mut snapshot = state.snapshot();
    loop {
        let command = match frontend.poll(&snapshot) {
            Control::Command(command) => command,
            Control::Quit => {
                log::info!("Frontend quit at tick {}", state.ticks);
                return EpisodeEnd::Quit;
            }
        };

        let outcome = tick(state, command);
        snapshot = state.snapshot();
        frontend.present(&snapshot, &outcome);

        if outcome.terminal {
            return EpisodeEnd::Finished(outcome);
        }
    }
}
