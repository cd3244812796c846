use std::fmt::{self, Display};

use super::board::{Board, PitId, SowError};

/// One of the two players. Player 1 owns pits 0-6, player 2 owns
/// pits 7-13.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    #[default]
    PlayerFirst = 0,
    PlayerSecond = 1,
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::PlayerFirst => f.write_fmt(format_args!("P1")),
            PlayerId::PlayerSecond => f.write_fmt(format_args!("P2")),
        }
    }
}

impl PlayerId {
    #[inline]
    pub fn opposite(self) -> PlayerId {
        match self {
            PlayerId::PlayerFirst => PlayerId::PlayerSecond,
            PlayerId::PlayerSecond => PlayerId::PlayerFirst,
        }
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Winner(PlayerId),
    Draw,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{player} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// A board together with the side to move: the surface the game loop
/// consumes. Each [`GameState::advance`] applies one sow for the player
/// to move and takes the extra-turn rule into account.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    board: Board,
    to_move: PlayerId,
}

impl GameState {
    pub fn new(seeds_per_house: u32, start_player: PlayerId) -> Self {
        Self {
            board: Board::new(seeds_per_house),
            to_move: start_player,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> PlayerId {
        self.to_move
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.board.outcome()
    }

    /// Sows `pit` for the player to move. On success the board is
    /// replaced and the turn passes (or stays, after a store landing).
    pub fn advance(&mut self, pit: PitId) -> Result<(), SowError> {
        let sown = self.board.sow(pit, self.to_move)?;
        self.board = sown.board;
        self.to_move = sown.next_player;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_flips_turn_unless_store_landing() {
        let mut game = GameState::new(4, PlayerId::PlayerFirst);
        // Four seeds from pit 2 land in pits 3, 4, 5 and the store.
        game.advance(2).unwrap();
        assert_eq!(game.to_move(), PlayerId::PlayerFirst);
        assert_eq!(game.board().score(PlayerId::PlayerFirst), 1);
        game.advance(1).unwrap();
        assert_eq!(game.to_move(), PlayerId::PlayerSecond);
    }

    #[test]
    fn test_advance_rejects_opponent_houses() {
        let mut game = GameState::new(4, PlayerId::PlayerFirst);
        let before = game.clone();
        assert!(game.advance(9).is_err());
        assert_eq!(game, before);
    }
}
