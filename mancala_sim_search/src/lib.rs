/// Implementation for minimax search with alpha-beta pruning
pub mod minimax;

/// Implementation for Monte-Carlo rollout evaluation
pub mod monte_carlo;
