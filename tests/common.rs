//! Common test utilities for the ttt-rl test suite.
//!
//! Builders for the Tic-Tac-Toe collaborators and a deterministic opponent
//! shared by the integration tests.

#![allow(dead_code)]

use ttt_rl::{
    Result,
    adapters::{RandomOpponent, TicTacToe, TicTacToeEnvironment, TicTacToeMdp},
    config::{RewardConfig, ValueIterationConfig},
    policy::Policy,
    ports::Opponent,
    tictactoe::{BoardState, Player},
    value_iteration::ValueIterationSolver,
};

/// Parse a board, panicking on malformed test input.
pub fn board(s: &str) -> BoardState {
    BoardState::from_string(s).unwrap()
}

pub fn x_agent() -> TicTacToe {
    TicTacToe::new(Player::X)
}

pub fn random_mdp(seed: u64) -> TicTacToeMdp<RandomOpponent> {
    TicTacToeMdp::new(
        x_agent(),
        RandomOpponent::with_seed(seed),
        RewardConfig::default(),
    )
}

pub fn random_environment(seed: u64) -> TicTacToeEnvironment<RandomOpponent> {
    TicTacToeEnvironment::new(
        x_agent(),
        RandomOpponent::with_seed(seed),
        RewardConfig::default(),
    )
}

/// Solve the X agent against a random opponent with γ = 0.9.
pub fn solve_against_random(iterations: usize) -> Policy<BoardState, usize> {
    let mdp = random_mdp(0);
    let config = ValueIterationConfig::default().with_iterations(iterations);
    let mut solver = ValueIterationSolver::new(&mdp, config).unwrap();
    solver.train().unwrap()
}

/// Opponent that always takes the lowest empty cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFreeOpponent;

impl Opponent for FirstFreeOpponent {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        state
            .legal_moves()
            .first()
            .copied()
            .ok_or(ttt_rl::Error::NoValidMoves)
    }

    fn move_distribution(&self, state: &BoardState) -> Vec<(usize, f64)> {
        state
            .legal_moves()
            .first()
            .map(|&mv| vec![(mv, 1.0)])
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "first-free"
    }
}

/// Every non-terminal state has a legal action and every terminal state
/// has none.
pub fn assert_complete(policy: &Policy<BoardState, usize>) {
    for (state, action) in policy.iter() {
        if state.is_terminal() {
            assert!(action.is_none(), "terminal {} has an action", state.encode());
        } else {
            let action = action.unwrap_or_else(|| panic!("{} has no action", state.encode()));
            assert!(
                state.legal_moves().contains(action),
                "{} is not legal in {}",
                action,
                state.encode()
            );
        }
    }
}
