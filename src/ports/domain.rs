//! Domain port - the discrete state space both solvers are built over

use std::{fmt::Debug, hash::Hash};

/// A finite, fully observable decision problem seen from the agent's side.
///
/// # Ordering contract
///
/// [`Domain::legal_actions`] must return actions in a fixed order for a
/// given state. Every arg-max in this crate keeps the *first* maximal
/// action in that order, so policy extraction is only deterministic when
/// the enumeration order is.
pub trait Domain {
    /// Game position together with whose turn it is. Game-equivalent
    /// positions must compare equal and hash identically.
    type State: Clone + Eq + Hash + Debug;

    /// A move, only meaningful relative to the state that produced it.
    type Action: Clone + PartialEq + Debug;

    /// Every reachable state where the agent is to move, plus every
    /// reachable terminal state. Exhaustive and duplicate-free.
    fn states(&self) -> Vec<Self::State>;

    /// Ordered legal actions; empty only for terminal states.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Whether the game is over in `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;
}
