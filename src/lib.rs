#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

pub mod types;

/// Move-source (agent) capability and the uniform-random agent.
pub mod agent;

/// Implementation for the rule-based mancala player.
pub mod rule_based;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `rand` crate
pub use rand;

/// Re-exports the `thiserror` crate
pub use thiserror;

pub mod prelude {
    pub use crate::agent::{Choice, MoveSource, RandomAgent, SearchCounter};
    pub use crate::rule_based::HeuristicAgent;
    pub use crate::types::board::{Board, PitId, SowError, Sown, HOUSES_PER_SIDE, NUM_PITS};
    pub use crate::types::by_player::ByPlayer;
    pub use crate::types::game_state::{GameState, Outcome, PlayerId};
}

#[cfg(test)]
mod tests;
