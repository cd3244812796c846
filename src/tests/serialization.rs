use proptest::prelude::*;

use crate::prelude::*;

prop_compose! {
    fn arb_board()(pits in proptest::array::uniform14(0u32..=24)) -> Board {
        Board::from_pits(pits)
    }
}

proptest! {
    #[test]
    fn test_json_round_trip_preserves_board(board in arb_board()) {
        let ser = serde_json::to_string(&board).unwrap();
        let de: Board = serde_json::from_str(&ser).unwrap();
        prop_assert_eq!(board, de);
    }
}

#[test]
fn test_json_round_trip_preserves_game_state() {
    let mut game = GameState::new(4, PlayerId::PlayerFirst);
    game.advance(2).unwrap();
    let ser = serde_json::to_string(&game).unwrap();
    let de: GameState = serde_json::from_str(&ser).unwrap();
    assert_eq!(game, de);
}
