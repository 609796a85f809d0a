//! Live Tic-Tac-Toe episodes against a sampled opponent

use super::domain::TicTacToe;
use crate::{
    Error, Result,
    config::RewardConfig,
    ports::{Environment, Opponent, Outcome},
    tictactoe::BoardState,
};

/// Episode stepper that folds the opponent's reply into every agent move.
#[derive(Debug, Clone)]
pub struct TicTacToeEnvironment<O> {
    domain: TicTacToe,
    opponent: O,
    rewards: RewardConfig,
    initial: BoardState,
    state: BoardState,
}

impl<O: Opponent> TicTacToeEnvironment<O> {
    /// Episodes start from the empty board with the agent to move.
    pub fn new(domain: TicTacToe, opponent: O, rewards: RewardConfig) -> Self {
        let initial = domain.initial_state();
        Self {
            domain,
            opponent,
            rewards,
            initial,
            state: initial,
        }
    }

    /// Start every episode from `state` instead of the empty board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless the agent is to move
    /// in `state`.
    pub fn with_initial_state(mut self, state: BoardState) -> Result<Self> {
        if state.to_move != self.domain.agent() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "initial state {} must have {} to move",
                    state.encode(),
                    self.domain.agent()
                ),
            });
        }
        self.initial = state;
        self.state = state;
        Ok(self)
    }

    pub fn domain(&self) -> &TicTacToe {
        &self.domain
    }

    pub fn opponent(&self) -> &O {
        &self.opponent
    }

    pub fn opponent_mut(&mut self) -> &mut O {
        &mut self.opponent
    }
}

impl<O: Opponent> Environment for TicTacToeEnvironment<O> {
    type State = BoardState;
    type Action = usize;

    fn reset(&mut self) -> BoardState {
        self.state = self.initial;
        self.state
    }

    fn current_state(&self) -> &BoardState {
        &self.state
    }

    fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    fn possible_moves(&self) -> Vec<usize> {
        self.state.legal_moves()
    }

    fn execute_move(&mut self, action: &usize) -> Result<Outcome<BoardState, usize>> {
        let state = self.state;
        let after = state.make_move(*action).map_err(|_| Error::IllegalAction {
            action: action.to_string(),
            state: state.encode(),
        })?;

        let next = if after.is_terminal() {
            after
        } else {
            let reply = self.opponent.select_move(&after)?;
            after.make_move(reply)?
        };
        self.state = next;

        Ok(Outcome {
            state,
            action: *action,
            reward: self.domain.reward(&self.rewards, &next),
            next,
        })
    }
}
