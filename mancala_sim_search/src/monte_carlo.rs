use rayon::prelude::*;

use mancala_sim::rand::{rngs::SmallRng, Rng, SeedableRng};

use mancala_sim::agent::{Choice, MoveSource, SearchCounter};
use mancala_sim::prelude::*;

/// Default number of random playouts per candidate move.
pub const PLAYOUT_ITERS: u32 = 100;

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    /// Random playouts per candidate move.
    pub playout_iters: u32,
    /// Fan playouts out across threads. Playouts are independent, so
    /// this does not change the result for a given seed.
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            playout_iters: PLAYOUT_ITERS,
            parallel: false,
        }
    }
}

/// Runs one uniformly random rollout from `board` to a terminal position
/// and reports the number of sows made and whether `player` wins it.
///
/// The rollout starts with `player`'s opponent to move (the caller has
/// already applied `player`'s candidate move) and alternates sides
/// strictly after every sow.
pub fn playout(player: PlayerId, board: &Board, seed: u64) -> (u64, bool) {
    let mut rollout = RandomAgent::seeded(seed);
    let mut board = *board;
    let mut to_move = player.opposite();
    let mut states = 0u64;
    loop {
        if let Some(outcome) = board.outcome() {
            return (states, outcome == Outcome::Winner(player));
        }
        let choice = rollout
            .choose_move(to_move, &board)
            .expect("non-terminal board must offer a move");
        board = board.sow(choice.pit, to_move).unwrap().board;
        to_move = to_move.opposite();
        states += 1;
    }
}

/// Estimates each candidate move by the number of random playouts won
/// from the resulting position and picks the highest count. Ties keep
/// the earliest candidate, so seeded runs replay move-for-move.
#[derive(Debug, Clone)]
pub struct MonteCarloAgent {
    pub config: MonteCarloConfig,
    rng: SmallRng,
}

impl MonteCarloAgent {
    pub fn new(config: MonteCarloConfig, rng: SmallRng) -> Self {
        Self { config, rng }
    }

    pub fn seeded(config: MonteCarloConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl MoveSource for MonteCarloAgent {
    fn choose_move(&mut self, player: PlayerId, board: &Board) -> Option<Choice> {
        let iters = self.config.playout_iters.max(1);
        let mut counter = SearchCounter::default();
        let mut best: Option<(PitId, u32)> = None;
        for pit in board.legal_moves(player) {
            let sown = board.sow(pit, player).unwrap();
            counter.states_visited += 1;
            // Per-playout seeds derive from the agent's own RNG, so the
            // parallel and sequential paths count the same wins.
            let base_seed = self.rng.gen::<u64>();
            let (states, wins) = if self.config.parallel {
                (0..iters)
                    .into_par_iter()
                    .map(|i| {
                        let (n, win) = playout(player, &sown.board, base_seed.wrapping_add(u64::from(i)));
                        (n, u32::from(win))
                    })
                    .reduce(|| (0, 0), |(a, b), (c, d)| (a + c, b + d))
            } else {
                (0..iters)
                    .map(|i| {
                        let (n, win) = playout(player, &sown.board, base_seed.wrapping_add(u64::from(i)));
                        (n, u32::from(win))
                    })
                    .fold((0, 0), |(a, b), (c, d)| (a + c, b + d))
            };
            counter.states_visited += states;
            counter.playouts += u64::from(iters);
            match best {
                Some((_, top)) if wins <= top => {}
                _ => best = Some((pit, wins)),
            }
        }
        best.map(|(pit, _)| Choice { pit, counter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_on_terminal_board_reports_outcome() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 30, 1, 0, 0, 0, 0, 0, 17]);
        let (states, first_wins) = playout(PlayerId::PlayerFirst, &board, 0);
        assert_eq!(states, 0);
        assert!(first_wins);
        let (_, second_wins) = playout(PlayerId::PlayerSecond, &board, 0);
        assert!(!second_wins);
    }

    #[test]
    fn test_playout_is_deterministic_per_seed() {
        let board = Board::new(4);
        for seed in 0..20 {
            assert_eq!(
                playout(PlayerId::PlayerFirst, &board, seed),
                playout(PlayerId::PlayerFirst, &board, seed)
            );
        }
    }

    #[test]
    fn test_tie_break_keeps_earliest_candidate() {
        // Player 1's store already holds more than half of all seeds, so
        // every playout is a win and all candidates tie.
        let board = Board::from_pits([1, 1, 0, 0, 0, 0, 30, 4, 4, 4, 0, 0, 0, 4]);
        let mut agent = MonteCarloAgent::seeded(
            MonteCarloConfig {
                playout_iters: 10,
                parallel: false,
            },
            5,
        );
        let choice = agent.choose_move(PlayerId::PlayerFirst, &board).unwrap();
        assert_eq!(choice.pit, 0);
        assert_eq!(choice.counter.playouts, 20);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let board = Board::new(4);
        let config = MonteCarloConfig {
            playout_iters: 20,
            parallel: false,
        };
        let mut sequential = MonteCarloAgent::seeded(config, 9);
        let mut parallel = MonteCarloAgent::seeded(
            MonteCarloConfig {
                parallel: true,
                ..config
            },
            9,
        );
        let a = sequential.choose_move(PlayerId::PlayerFirst, &board).unwrap();
        let b = parallel.choose_move(PlayerId::PlayerFirst, &board).unwrap();
        assert_eq!(a.pit, b.pit);
        assert_eq!(a.counter.playouts, b.counter.playouts);
        assert_eq!(a.counter.states_visited, b.counter.states_visited);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let board = Board::from_pits([0, 0, 0, 0, 0, 0, 9, 4, 4, 4, 4, 4, 4, 0]);
        let mut agent = MonteCarloAgent::seeded(MonteCarloConfig::default(), 1);
        assert!(agent.choose_move(PlayerId::PlayerFirst, &board).is_none());
    }
}
