use crate::agent::{Choice, MoveSource};
use crate::types::board::Board;
use crate::types::game_state::PlayerId;

/// Fixed-policy player: sows the lowest house whose seeds land the last
/// one exactly in the player's own store (earning an extra turn);
/// otherwise sows the highest-indexed legal house.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAgent;

impl MoveSource for HeuristicAgent {
    fn choose_move(&mut self, player: PlayerId, board: &Board) -> Option<Choice> {
        let moves = board.legal_moves(player);
        let store = Board::store(player);
        moves
            .iter()
            .copied()
            .find(|&pit| pit + board.seeds(pit) as usize == store)
            .or_else(|| moves.last().copied())
            .map(Choice::new)
    }
}
