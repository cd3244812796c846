use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use structopt::StructOpt;

use mancala_sim::agent::MoveSource;
use mancala_sim::prelude::*;
use mancala_sim_cli_utils::cli_args::{AgentConfig, AgentKind};

mod compare;
mod match_round;

pub use match_round::*;

#[derive(Debug, StructOpt)]
#[structopt(about = "Mancala (Kalah) agent simulator")]
pub enum SimulatorOpts {
    /// Run a batch of games between two agents and tally win rates.
    Simulate {
        #[structopt(flatten)]
        agent: AgentConfig,

        #[structopt(
            short = "O",
            long = "--opponent",
            help = "Player 2's algorithm, with default settings (default: random)"
        )]
        opponent: Option<AgentKind>,

        #[structopt(short = "n", long = "--games", help = "Number of games to play")]
        games: Option<u32>,

        #[structopt(short = "S", long = "--seed", help = "Random seed for the batch")]
        seed: Option<u64>,

        #[structopt(
            long = "--first-player-starts",
            help = "Player 1 starts every game instead of alternating"
        )]
        first_player_starts: bool,

        #[structopt(long = "--seeds-per-house", help = "Seeds placed in each house at setup")]
        seeds_per_house: Option<u32>,

        #[structopt(long = "--max-plies", help = "Safety cap on sows per game")]
        max_plies: Option<u32>,

        #[structopt(short = "q", long = "--quiet", help = "Only print the final tally")]
        quiet: bool,
    },
    /// Round-robin comparison between agent configurations from a JSON file.
    Compare {
        #[structopt(parse(from_os_str), help = "Path to the JSON matchup configuration")]
        config: PathBuf,
    },
    /// Play against an agent in the terminal.
    Play {
        #[structopt(flatten)]
        agent: AgentConfig,

        #[structopt(long = "--agent-starts", help = "The agent takes the first turn")]
        agent_starts: bool,

        #[structopt(short = "S", long = "--seed", help = "Random seed for the agent")]
        seed: Option<u64>,

        #[structopt(long = "--seeds-per-house", help = "Seeds placed in each house at setup")]
        seeds_per_house: Option<u32>,
    },
    /// Choose and report a single move from the opening position.
    Evaluate {
        #[structopt(flatten)]
        agent: AgentConfig,

        #[structopt(short = "S", long = "--seed", help = "Random seed for the agent")]
        seed: Option<u64>,

        #[structopt(long = "--seeds-per-house", help = "Seeds placed in each house at setup")]
        seeds_per_house: Option<u32>,
    },
}

fn main() {
    match SimulatorOpts::from_args() {
        SimulatorOpts::Simulate {
            agent,
            opponent,
            games,
            seed,
            first_player_starts,
            seeds_per_house,
            max_plies,
            quiet,
        } => {
            let opponent = opponent.unwrap_or(AgentKind::Random).default_config();
            let opts = IterateMatchOpts {
                games: games.unwrap_or(100),
                max_plies: max_plies.unwrap_or(1000),
                seeds_per_house: seeds_per_house.unwrap_or(4),
                random_seed: seed.unwrap_or(100),
                start: if first_player_starts {
                    StartPolicy::Fixed(PlayerId::PlayerFirst)
                } else {
                    StartPolicy::Alternate
                },
                quiet,
            };
            run_simulate(&agent, &opponent, opts);
        }
        SimulatorOpts::Compare { config } => match compare::parse_compare_opts(&config) {
            Ok(opts) => compare::main_compare(opts),
            Err(e) => {
                eprintln!("compare: {e}");
                std::process::exit(1);
            }
        },
        SimulatorOpts::Play {
            agent,
            agent_starts,
            seed,
            seeds_per_house,
        } => run_play(
            &agent,
            agent_starts,
            seed.unwrap_or(100),
            seeds_per_house.unwrap_or(4),
        ),
        SimulatorOpts::Evaluate {
            agent,
            seed,
            seeds_per_house,
        } => run_evaluate(&agent, seed.unwrap_or(100), seeds_per_house.unwrap_or(4)),
    }
}

fn run_simulate(agent: &AgentConfig, opponent: &AgentConfig, opts: IterateMatchOpts) {
    let make_agents = |seed: u64| {
        ByPlayer::new(
            agent.make_agent(seed),
            opponent.make_agent(seed.wrapping_add(1)),
        )
    };
    let t0 = Instant::now();
    let (tally, counter) = iterate_match(&make_agents, opts);
    let games = f64::from(tally.games().max(1));
    println!(
        "Player 1 ({:?}) won {} times: {:.3}",
        agent.kind(),
        tally.wins.0,
        f64::from(tally.wins.0) / games
    );
    println!(
        "Player 2 ({:?}) won {} times: {:.3}",
        opponent.kind(),
        tally.wins.1,
        f64::from(tally.wins.1) / games
    );
    println!(
        "It was a draw {} times: {:.3}",
        tally.draws,
        f64::from(tally.draws) / games
    );
    println!("Total: {}", counter.summary(t0.elapsed().as_nanos()));
}

fn run_evaluate(config: &AgentConfig, seed: u64, seeds_per_house: u32) {
    let board = Board::new(seeds_per_house);
    let mut agent = config.make_agent(seed);
    let t0 = Instant::now();
    let Some(choice) = agent.choose_move(PlayerId::PlayerFirst, &board) else {
        println!("evaluate: no legal moves");
        return;
    };
    println!("{board}");
    println!(
        "--> {} | {:?} | {}",
        choice.pit,
        choice.counter,
        choice.counter.summary(t0.elapsed().as_nanos())
    );
}

fn run_play(config: &AgentConfig, agent_starts: bool, seed: u64, seeds_per_house: u32) {
    let mut agent = config.make_agent(seed);
    let human = if agent_starts {
        PlayerId::PlayerSecond
    } else {
        PlayerId::PlayerFirst
    };
    let mut game = GameState::new(seeds_per_house, PlayerId::PlayerFirst);
    println!("First player: {}", game.to_move());
    println!("{}", game.board());
    while game.outcome().is_none() {
        let p = game.to_move();
        println!("It's {p}'s turn.");
        let pit = if p == human {
            prompt_move(p, game.board())
        } else {
            match agent.choose_move(p, game.board()) {
                Some(choice) => choice.pit,
                None => break,
            }
        };
        if let Err(e) = game.advance(pit) {
            // Agent moves are legal by construction; only human input
            // can land here.
            println!("{e}");
            continue;
        }
        println!("{}", game.board());
    }
    match game.outcome() {
        Some(Outcome::Winner(player)) => println!("{player} won!"),
        Some(Outcome::Draw) => println!("Draw"),
        None => {}
    }
}

/// Prompts until the input parses as a pit id that is currently a legal
/// move for `player`.
fn prompt_move(player: PlayerId, board: &Board) -> PitId {
    let stdin = io::stdin();
    loop {
        print!("Which pit would you like to sow from? ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => std::process::exit(0),
            Ok(_) => {}
        }
        match line.trim().parse::<PitId>() {
            Ok(pit) if board.legal_moves(player).contains(&pit) => return pit,
            Ok(pit) => println!("Pit {pit} is not a legal move"),
            Err(_) => println!("Invalid input"),
        }
    }
}
