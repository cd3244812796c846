use std::ops::Add;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::types::board::{Board, PitId};
use crate::types::game_state::PlayerId;

/// Work counters accumulated while choosing a move.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCounter {
    /// Number of board states visited through `sow` transitions.
    pub states_visited: u64,
    /// Number of static evaluations of a board position.
    pub evals: u64,
    /// Number of random playouts run to a terminal position.
    pub playouts: u64,
}

impl SearchCounter {
    #[inline]
    pub fn add_in_place(&mut self, c: &SearchCounter) {
        self.states_visited += c.states_visited;
        self.evals += c.evals;
        self.playouts += c.playouts;
    }

    pub fn summary(&self, dt_ns: u128) -> String {
        let dt_ms: f64 = 1e-6 * (dt_ns as f64);
        let rate: f64 = (1e-6_f64 * 1e9_f64) * (self.states_visited as f64) / (dt_ns as f64);
        format!("dt={dt_ms:.2}ms rate={rate:.4} Mstates/s")
    }
}

impl Add for SearchCounter {
    type Output = SearchCounter;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut a = self;
        a.add_in_place(&rhs);
        a
    }
}

/// A chosen move plus the work it took to find it.
#[derive(Debug, Clone, Copy)]
pub struct Choice {
    pub pit: PitId,
    pub counter: SearchCounter,
}

impl Choice {
    #[inline]
    pub fn new(pit: PitId) -> Self {
        Self {
            pit,
            counter: SearchCounter::default(),
        }
    }
}

/// Capability to select a move for a player on a given board.
///
/// Returns `None` exactly when the player has no legal move; in a
/// conformant game loop the caller checks for a terminal board before
/// asking, so `None` never occurs there.
pub trait MoveSource {
    fn choose_move(&mut self, player: PlayerId, board: &Board) -> Option<Choice>;
}

/// Selects uniformly among the legal moves.
///
/// Owns its RNG so runs seeded with [`RandomAgent::seeded`] replay
/// identically.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl MoveSource for RandomAgent {
    fn choose_move(&mut self, player: PlayerId, board: &Board) -> Option<Choice> {
        let moves = board.legal_moves(player);
        if moves.is_empty() {
            return None;
        }
        Some(Choice::new(moves[self.rng.gen_range(0..moves.len())]))
    }
}
