//! Transition model port - the known dynamics used by value iteration

use super::Domain;
use crate::Result;

/// One weighted outcome of taking an action in a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    /// Probability of this outcome; the outcomes of one action sum to 1.
    pub probability: f64,
    /// Immediate reward received on this outcome.
    pub reward: f64,
    /// Resulting state (after any opponent reply).
    pub next: S,
}

impl<S> Transition<S> {
    pub fn new(probability: f64, reward: f64, next: S) -> Self {
        Self {
            probability,
            reward,
            next,
        }
    }
}

/// Full probability-weighted dynamics of a [`Domain`].
pub trait TransitionModel: Domain {
    /// Every possible outcome of taking `action` in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if `action` is not legal in `state`.
    fn transitions(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Vec<Transition<Self::State>>>;
}
