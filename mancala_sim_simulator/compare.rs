use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use mancala_sim::prelude::*;
use mancala_sim::thiserror;
use mancala_sim_cli_utils::cli_args::AgentConfig;

use crate::{iterate_match, IterateMatchOpts, StartPolicy};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct EntryConfig {
    pub name: String,
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CompareOpts {
    #[serde(default = "CompareOpts::default_random_seed")]
    pub random_seed: u64,
    #[serde(default = "CompareOpts::default_games")]
    pub games: u32,
    #[serde(default = "CompareOpts::default_max_plies")]
    pub max_plies: u32,
    #[serde(default = "CompareOpts::default_seeds_per_house")]
    pub seeds_per_house: u32,
    #[serde(default)]
    pub configs: Vec<EntryConfig>,
}

impl CompareOpts {
    fn default_random_seed() -> u64 {
        100
    }
    fn default_games() -> u32 {
        100
    }
    fn default_max_plies() -> u32 {
        1000
    }
    fn default_seeds_per_house() -> u32 {
        4
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseCompareOptsError {
    #[error("failed to load file")]
    FileLoad(#[from] std::io::Error),
    #[error("failed to parse JSON")]
    Deserialize(#[from] serde_json::Error),
}

pub fn parse_compare_opts(json_path: &PathBuf) -> Result<CompareOpts, ParseCompareOptsError> {
    Ok(serde_json::from_reader(BufReader::new(File::open(json_path)?))?)
}

/// Plays every pair of entries against each other and prints the matchup
/// matrix. Cell `(i, j)` holds entry `i`'s score against entry `j`:
/// 1 point per win, half per draw, normalized by the game count.
pub fn main_compare(opts: CompareOpts) {
    let n = opts.configs.len();
    let mut matchup: Vec<Vec<f64>> = (0..n).map(|_| vec![0f64; n]).collect();
    for i in 0..n {
        for j in i + 1..n {
            let (first, second) = (&opts.configs[i], &opts.configs[j]);
            let make_agents = |seed: u64| {
                ByPlayer::new(
                    first.agent.make_agent(seed),
                    second.agent.make_agent(seed.wrapping_add(1)),
                )
            };
            println!("--- {} vs. {}", first.name, second.name);
            let (tally, _) = iterate_match(
                &make_agents,
                IterateMatchOpts {
                    games: opts.games,
                    max_plies: opts.max_plies,
                    seeds_per_house: opts.seeds_per_house,
                    random_seed: opts.random_seed,
                    start: StartPolicy::Alternate,
                    quiet: true,
                },
            );
            let score = (2 * tally.wins.0 + tally.draws) as f64 / (2 * tally.games()) as f64;
            matchup[i][j] = score;
            matchup[j][i] = 1.0 - score;
        }
    }

    for (i, row) in matchup.iter().enumerate() {
        print!("{:>12} ", opts.configs[i].name);
        for (j, cell) in row.iter().enumerate() {
            if i == j {
                print!("{:>6} ", "-");
            } else {
                print!("{cell:6.3} ");
            }
        }
        println!();
    }
}
