use std::str::FromStr;
use structopt::StructOpt;

use mancala_sim::{
    agent::{Choice, MoveSource, RandomAgent},
    rule_based::HeuristicAgent,
    types::{board::Board, game_state::PlayerId},
};
use mancala_sim_search::{
    minimax::{MinimaxAgent, MinimaxConfig},
    monte_carlo::{MonteCarloAgent, MonteCarloConfig},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum AgentKind {
    Random,
    Heuristic,
    Minimax,
    MonteCarlo,
}

impl FromStr for AgentKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "heuristic" | "expert" => Ok(Self::Heuristic),
            "minimax" => Ok(Self::Minimax),
            "monte-carlo" | "montecarlo" => Ok(Self::MonteCarlo),
            _ => Err("expected one of: random, heuristic, minimax, monte-carlo"),
        }
    }
}

#[derive(Debug, StructOpt, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AgentConfig {
    #[structopt(
        short = "A",
        long = "--algorithm",
        help = "random|heuristic|minimax|monte-carlo: policy used to choose moves."
    )]
    pub algorithm: Option<AgentKind>,

    #[structopt(short = "d", long = "--depth", help = "Minimax: search depth below the root's children")]
    pub search_depth: Option<u8>,

    #[structopt(
        short = "I",
        long = "--playout-iters",
        help = "Monte Carlo: number of random playouts per candidate move"
    )]
    pub playout_iters: Option<u32>,

    #[structopt(long = "--parallel-playouts", help = "Monte Carlo: run playouts across threads")]
    pub parallel_playouts: bool,
}

/// An agent of any supported kind, constructed from CLI or JSON
/// configuration.
#[derive(Debug, Clone)]
pub enum GenericAgent {
    Random(RandomAgent),
    Heuristic(HeuristicAgent),
    Minimax(MinimaxAgent),
    MonteCarlo(MonteCarloAgent),
}

impl MoveSource for GenericAgent {
    fn choose_move(&mut self, player: PlayerId, board: &Board) -> Option<Choice> {
        match self {
            Self::Random(agent) => agent.choose_move(player, board),
            Self::Heuristic(agent) => agent.choose_move(player, board),
            Self::Minimax(agent) => agent.choose_move(player, board),
            Self::MonteCarlo(agent) => agent.choose_move(player, board),
        }
    }
}

impl AgentKind {
    /// A configuration selecting this kind with its default settings.
    pub fn default_config(self) -> AgentConfig {
        AgentConfig {
            algorithm: Some(self),
            ..Default::default()
        }
    }
}

impl AgentConfig {
    pub fn kind(&self) -> AgentKind {
        self.algorithm.unwrap_or(AgentKind::Minimax)
    }

    /// Agents own their randomness; `seed` makes the construction
    /// reproducible.
    pub fn make_agent(&self, seed: u64) -> GenericAgent {
        match self.kind() {
            AgentKind::Random => GenericAgent::Random(RandomAgent::seeded(seed)),
            AgentKind::Heuristic => GenericAgent::Heuristic(HeuristicAgent),
            AgentKind::Minimax => {
                let config = self
                    .search_depth
                    .map(|depth| MinimaxConfig { depth })
                    .unwrap_or_default();
                GenericAgent::Minimax(MinimaxAgent::seeded(config, seed))
            }
            AgentKind::MonteCarlo => {
                let config = MonteCarloConfig {
                    playout_iters: self.playout_iters.unwrap_or_else(|| MonteCarloConfig::default().playout_iters),
                    parallel: self.parallel_playouts,
                };
                GenericAgent::MonteCarlo(MonteCarloAgent::seeded(config, seed))
            }
        }
    }
}
