use crate::prelude::*;



#[cfg(feature = "serde")]
pub mod serialization;

/// Sows a move that the test expects to be legal.
pub(crate) fn sow_ok(board: &Board, pit: PitId, player: PlayerId) -> Sown {
    board
        .sow(pit, player)
        .unwrap_or_else(|e| panic!("sow({pit}, {player}): {e}"))
}
