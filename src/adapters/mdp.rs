//! Known Tic-Tac-Toe dynamics against a fixed opponent

use super::domain::TicTacToe;
use crate::{
    Error, Result,
    config::RewardConfig,
    ports::{Domain, Opponent, Transition, TransitionModel},
    tictactoe::BoardState,
};

/// Transition model: the agent moves, then (unless the game ended) the
/// opponent replies according to its move distribution.
///
/// Every successor is again a state where the agent is to move, or a
/// terminal state.
#[derive(Debug, Clone)]
pub struct TicTacToeMdp<O> {
    domain: TicTacToe,
    opponent: O,
    rewards: RewardConfig,
}

impl<O: Opponent> TicTacToeMdp<O> {
    pub fn new(domain: TicTacToe, opponent: O, rewards: RewardConfig) -> Self {
        Self {
            domain,
            opponent,
            rewards,
        }
    }

    pub fn domain(&self) -> &TicTacToe {
        &self.domain
    }

    pub fn opponent(&self) -> &O {
        &self.opponent
    }

    pub fn rewards(&self) -> &RewardConfig {
        &self.rewards
    }
}

impl<O: Opponent> Domain for TicTacToeMdp<O> {
    type State = BoardState;
    type Action = usize;

    fn states(&self) -> Vec<BoardState> {
        self.domain.states()
    }

    fn legal_actions(&self, state: &BoardState) -> Vec<usize> {
        self.domain.legal_actions(state)
    }

    fn is_terminal(&self, state: &BoardState) -> bool {
        self.domain.is_terminal(state)
    }
}

impl<O: Opponent> TransitionModel for TicTacToeMdp<O> {
    fn transitions(
        &self,
        state: &BoardState,
        action: &usize,
    ) -> Result<Vec<Transition<BoardState>>> {
        let illegal = || Error::IllegalAction {
            action: action.to_string(),
            state: state.encode(),
        };
        if state.to_move != self.domain.agent() {
            return Err(illegal());
        }
        let after = state.make_move(*action).map_err(|_| illegal())?;

        if after.is_terminal() {
            let reward = self.domain.reward(&self.rewards, &after);
            return Ok(vec![Transition::new(1.0, reward, after)]);
        }

        let replies = self.opponent.move_distribution(&after);
        if replies.is_empty() {
            return Err(Error::NoValidMoves);
        }
        replies
            .into_iter()
            .map(|(reply, probability)| {
                let next = after.make_move(reply)?;
                let reward = self.domain.reward(&self.rewards, &next);
                Ok(Transition::new(probability, reward, next))
            })
            .collect()
    }
}
