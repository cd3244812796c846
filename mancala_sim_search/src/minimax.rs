use mancala_sim::rand::{rngs::SmallRng, Rng, SeedableRng};
use mancala_sim::smallvec::SmallVec;

use mancala_sim::agent::{Choice, MoveSource, SearchCounter};
use mancala_sim::prelude::*;

/// Evaluation of a terminal position won by the searching player.
/// Tuned for the 6-house, 4-seed board; not derived from board size.
pub const WIN_EVAL: i32 = 24;

/// Evaluation of a terminal position lost by the searching player.
pub const LOSS_EVAL: i32 = -24;

/// Evaluation of a terminal draw. Slightly above zero so a certain draw
/// beats an even store differential.
pub const DRAW_EVAL: i32 = 1;

/// Default search depth below the root's immediate children.
pub const SEARCH_DEPTH: u8 = 1;

/// Static evaluation of `board` from `player`'s fixed perspective.
/// Returns the score and whether the position is terminal.
fn evaluate(player: PlayerId, board: &Board) -> (i32, bool) {
    match board.outcome() {
        Some(Outcome::Winner(winner)) if winner == player => (WIN_EVAL, true),
        Some(Outcome::Winner(_)) => (LOSS_EVAL, true),
        Some(Outcome::Draw) => (DRAW_EVAL, true),
        None => (
            board.score(player) as i32 - board.score(player.opposite()) as i32,
            false,
        ),
    }
}

/// Depth-bounded minimax with alpha-beta pruning.
///
/// The evaluator's perspective stays fixed on `player`: the maximizing
/// ply generates and sows `player`'s moves, the minimizing ply the
/// opponent's. Plies alternate strictly; extra turns below the root are
/// not followed. Leaf scores are scaled by `depth + 1` so terminal
/// outcomes found closer to the root dominate deeper ones.
fn search(
    player: PlayerId,
    board: &Board,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    counter: &mut SearchCounter,
) -> i32 {
    let (eval, is_terminal) = evaluate(player, board);
    if depth == 0 || is_terminal {
        counter.evals += 1;
        return eval * (i32::from(depth) + 1);
    }

    let side = if maximizing { player } else { player.opposite() };
    if maximizing {
        let mut best = i32::MIN;
        for pit in board.legal_moves(side) {
            let sown = board.sow(pit, side).unwrap();
            counter.states_visited += 1;
            let score = search(player, &sown.board, depth - 1, false, alpha, beta, counter);
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for pit in board.legal_moves(side) {
            let sown = board.sow(pit, side).unwrap();
            counter.states_visited += 1;
            let score = search(player, &sown.board, depth - 1, true, alpha, beta, counter);
            best = best.min(score);
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimaxConfig {
    /// Search depth below the root's immediate children.
    pub depth: u8,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self { depth: SEARCH_DEPTH }
    }
}

/// Chooses the move whose resulting position maximizes the alpha-beta
/// search value; ties are broken uniformly at random.
#[derive(Debug, Clone)]
pub struct MinimaxAgent {
    pub config: MinimaxConfig,
    rng: SmallRng,
}

impl MinimaxAgent {
    pub fn new(config: MinimaxConfig, rng: SmallRng) -> Self {
        Self { config, rng }
    }

    pub fn seeded(config: MinimaxConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl MoveSource for MinimaxAgent {
    fn choose_move(&mut self, player: PlayerId, board: &Board) -> Option<Choice> {
        let mut counter = SearchCounter::default();
        let scored: SmallVec<[(PitId, i32); HOUSES_PER_SIDE]> = board
            .legal_moves(player)
            .into_iter()
            .map(|pit| {
                let sown = board.sow(pit, player).unwrap();
                counter.states_visited += 1;
                let score = search(
                    player,
                    &sown.board,
                    self.config.depth,
                    false,
                    i32::MIN,
                    i32::MAX,
                    &mut counter,
                );
                (pit, score)
            })
            .collect();
        let best_score = scored.iter().map(|&(_, score)| score).max()?;
        let best: SmallVec<[PitId; HOUSES_PER_SIDE]> = scored
            .iter()
            .filter(|&&(_, score)| score == best_score)
            .map(|&(pit, _)| pit)
            .collect();
        let pit = best[self.rng.gen_range(0..best.len())];
        Some(Choice { pit, counter })
    }
}
