//! Environment port - the live episode stepper used by Q-learning

use std::{fmt::Debug, hash::Hash};

use crate::Result;

/// A single realized step: `[s, a, r, s']`.
///
/// `next` is the state after the opponent has replied, so it is again a
/// state where the agent moves (or a terminal state).
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<S, A> {
    pub state: S,
    pub action: A,
    pub reward: f64,
    pub next: S,
}

/// Stateful simulator that advances an episode one agent move at a time.
pub trait Environment {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + PartialEq + Debug;

    /// Begin a new episode and return its initial state.
    fn reset(&mut self) -> Self::State;

    /// State the episode is currently in.
    fn current_state(&self) -> &Self::State;

    /// Whether the current episode has finished.
    fn is_terminal(&self) -> bool;

    /// Legal actions for the agent in the current state, in a fixed order.
    fn possible_moves(&self) -> Vec<Self::Action>;

    /// Execute the agent's action, let the opponent reply, and report the
    /// realized transition.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalAction`] if `action` is not legal in
    /// the current state. The environment is left unchanged in that case.
    fn execute_move(
        &mut self,
        action: &Self::Action,
    ) -> Result<Outcome<Self::State, Self::Action>>;
}
