pub mod board;

pub mod by_player;

pub mod game_state;
