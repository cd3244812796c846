use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use mancala_sim::agent::{MoveSource, SearchCounter};
use mancala_sim::prelude::*;

/// Plays one full game between `agents`, starting from `game`. Returns
/// the outcome (`None` if the ply cap was reached first), the wall-clock
/// duration and the agents' combined search work.
pub fn match_round<T: MoveSource>(
    mut game: GameState,
    agents: &mut ByPlayer<T>,
    max_plies: u32,
) -> (Option<Outcome>, Duration, SearchCounter) {
    let t0 = Instant::now();
    let mut total_counter = SearchCounter::default();
    for _ in 0..max_plies {
        if game.outcome().is_some() {
            break;
        }
        let p = game.to_move();
        let Some(choice) = agents[p].choose_move(p, game.board()) else {
            println!("match_round: {p} has no move on a non-terminal board");
            break;
        };
        total_counter.add_in_place(&choice.counter);
        if let Err(e) = game.advance(choice.pit) {
            println!("----------");
            println!("Error: {e}");
            println!("Move: {}", choice.pit);
            println!("Board:\n{}", game.board());
            println!("----------");
            break;
        }
    }
    (game.outcome(), t0.elapsed(), total_counter)
}

/// Which player takes the first turn of each game in a batch.
#[derive(Debug, Copy, Clone)]
pub enum StartPolicy {
    /// Even-indexed games start with player 1, odd-indexed with player 2.
    Alternate,
    Fixed(PlayerId),
}

impl StartPolicy {
    pub fn start_player(self, game_index: u32) -> PlayerId {
        match self {
            Self::Fixed(player) => player,
            Self::Alternate => {
                if game_index % 2 == 0 {
                    PlayerId::PlayerFirst
                } else {
                    PlayerId::PlayerSecond
                }
            }
        }
    }
}

/// Win/draw counts over a batch of games. Games cut off by the ply cap
/// count as draws.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchTally {
    pub wins: ByPlayer<u32>,
    pub draws: u32,
}

impl MatchTally {
    pub fn record(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(Outcome::Winner(player)) => self.wins[player] += 1,
            Some(Outcome::Draw) | None => self.draws += 1,
        }
    }

    pub fn add_in_place(&mut self, other: &MatchTally) {
        self.wins.0 += other.wins.0;
        self.wins.1 += other.wins.1;
        self.draws += other.draws;
    }

    pub fn games(&self) -> u32 {
        self.wins.0 + self.wins.1 + self.draws
    }
}

#[derive(Debug, Copy, Clone)]
pub struct IterateMatchOpts {
    pub games: u32,
    pub max_plies: u32,
    pub seeds_per_house: u32,
    pub random_seed: u64,
    pub start: StartPolicy,
    pub quiet: bool,
}

impl Default for IterateMatchOpts {
    fn default() -> Self {
        Self {
            games: 100,
            max_plies: 1000,
            seeds_per_house: 4,
            random_seed: 100,
            start: StartPolicy::Alternate,
            quiet: false,
        }
    }
}

fn outcome_str(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Winner(PlayerId::PlayerFirst)) => "1-0",
        Some(Outcome::Winner(PlayerId::PlayerSecond)) => "0-1",
        Some(Outcome::Draw) | None => "1/2",
    }
}

/// Runs `opts.games` games in parallel, tallying outcomes. Each game's
/// agents are built fresh from a seed derived from `opts.random_seed`
/// and the game index, so a batch replays identically for a given seed.
pub fn iterate_match<T: MoveSource + Send, M: Send + Sync + Fn(u64) -> ByPlayer<T>>(
    make_agents: &M,
    opts: IterateMatchOpts,
) -> (MatchTally, SearchCounter) {
    let games_started = AtomicU32::default();
    (0..opts.games)
        .into_par_iter()
        .map(|_| {
            let i = games_started.fetch_add(1, Ordering::SeqCst);
            let mut agents = make_agents(opts.random_seed.wrapping_add(2 * u64::from(i)));
            let game = GameState::new(opts.seeds_per_house, opts.start.start_player(i));
            let (outcome, dt, counter) = match_round(game, &mut agents, opts.max_plies);
            if !opts.quiet {
                println!(
                    "- Game {:4} ... {} dt={:6.2}ms states_visited={:8}",
                    i + 1,
                    outcome_str(outcome),
                    dt.as_secs_f64() * 1e3,
                    counter.states_visited
                );
            }
            let mut tally = MatchTally::default();
            tally.record(outcome);
            (tally, counter)
        })
        .reduce(
            || (MatchTally::default(), SearchCounter::default()),
            |(mut tally, mut counter), (tally1, counter1)| {
                tally.add_in_place(&tally1);
                counter.add_in_place(&counter1);
                (tally, counter)
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mancala_sim::agent::RandomAgent;

    #[test]
    fn test_start_policy() {
        assert_eq!(StartPolicy::Alternate.start_player(0), PlayerId::PlayerFirst);
        assert_eq!(StartPolicy::Alternate.start_player(1), PlayerId::PlayerSecond);
        assert_eq!(StartPolicy::Alternate.start_player(2), PlayerId::PlayerFirst);
        assert_eq!(
            StartPolicy::Fixed(PlayerId::PlayerSecond).start_player(7),
            PlayerId::PlayerSecond
        );
    }

    #[test]
    fn test_tally_counts_every_game() {
        let mut tally = MatchTally::default();
        tally.record(Some(Outcome::Winner(PlayerId::PlayerFirst)));
        tally.record(Some(Outcome::Winner(PlayerId::PlayerSecond)));
        tally.record(Some(Outcome::Draw));
        tally.record(None);
        assert_eq!(tally.wins, ByPlayer::new(1, 1));
        assert_eq!(tally.draws, 2);
        assert_eq!(tally.games(), 4);
    }

    #[test]
    fn test_match_round_finishes_random_game() {
        let mut agents = ByPlayer::new(RandomAgent::seeded(3), RandomAgent::seeded(4));
        let game = GameState::new(4, PlayerId::PlayerFirst);
        let (outcome, _, counter) = match_round(game, &mut agents, 10_000);
        assert!(outcome.is_some());
        assert_eq!(counter.states_visited, 0);
    }

    #[test]
    fn test_iterate_match_tallies_all_games() {
        let make_agents = |seed: u64| {
            ByPlayer::new(
                RandomAgent::seeded(seed),
                RandomAgent::seeded(seed.wrapping_add(1)),
            )
        };
        let opts = IterateMatchOpts {
            games: 8,
            quiet: true,
            ..Default::default()
        };
        let (tally, _) = iterate_match(&make_agents, opts);
        assert_eq!(tally.games(), 8);
    }

    #[test]
    fn test_iterate_match_replays_for_a_seed() {
        let make_agents = |seed: u64| {
            ByPlayer::new(
                RandomAgent::seeded(seed),
                RandomAgent::seeded(seed.wrapping_add(1)),
            )
        };
        let opts = IterateMatchOpts {
            games: 6,
            quiet: true,
            ..Default::default()
        };
        let (a, _) = iterate_match(&make_agents, opts);
        let (b, _) = iterate_match(&make_agents, opts);
        assert_eq!(a.wins, b.wins);
        assert_eq!(a.draws, b.draws);
    }
}
