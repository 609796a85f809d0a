//! Tic-Tac-Toe seen from the learning agent's side

use crate::{
    config::RewardConfig,
    ports::Domain,
    tictactoe::{BoardState, Player, enumerate_agent_states},
};

/// Tic-Tac-Toe where `agent` opens the game and the opponent replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    agent: Player,
}

impl TicTacToe {
    pub fn new(agent: Player) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> Player {
        self.agent
    }

    /// Empty board with the agent to move.
    pub fn initial_state(&self) -> BoardState {
        BoardState::new_with_player(self.agent)
    }

    /// Reward for arriving in `state`: win or lose when a line is
    /// complete, draw when the board is full, living otherwise.
    pub fn reward(&self, rewards: &RewardConfig, state: &BoardState) -> f64 {
        match state.winner() {
            Some(winner) if winner == self.agent => rewards.win,
            Some(_) => rewards.lose,
            None if state.is_draw() => rewards.draw,
            None => rewards.living,
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(Player::X)
    }
}

impl Domain for TicTacToe {
    type State = BoardState;
    type Action = usize;

    fn states(&self) -> Vec<BoardState> {
        enumerate_agent_states(self.agent)
    }

    fn legal_actions(&self, state: &BoardState) -> Vec<usize> {
        state.legal_moves()
    }

    fn is_terminal(&self, state: &BoardState) -> bool {
        state.is_terminal()
    }
}
