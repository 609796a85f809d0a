//! Opponent port - the fixed policy the agent is trained against

use crate::{Result, tictactoe::BoardState};

/// A non-learning Tic-Tac-Toe player.
///
/// The environment samples [`Opponent::select_move`]; the transition model
/// enumerates [`Opponent::move_distribution`]. Both must describe the same
/// behaviour for value iteration and Q-learning to learn the same policy.
pub trait Opponent {
    /// Pick a move for the player to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] if the game is over.
    fn select_move(&mut self, state: &BoardState) -> Result<usize>;

    /// Probability of each legal move in `state`, in ascending position
    /// order. Probabilities sum to 1; empty when the game is over.
    fn move_distribution(&self, state: &BoardState) -> Vec<(usize, f64)>;

    /// Opponent name used in logs and summaries.
    fn name(&self) -> &str;

    /// Reseed the opponent's random number generator, if it has one.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

impl<T: Opponent + ?Sized> Opponent for Box<T> {
    fn select_move(&mut self, state: &BoardState) -> Result<usize> {
        (**self).select_move(state)
    }

    fn move_distribution(&self, state: &BoardState) -> Vec<(usize, f64)> {
        (**self).move_distribution(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_rng_seed(&mut self, seed: u64) {
        (**self).set_rng_seed(seed);
    }
}
