//! Newtype wrappers for table indices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Board size constant for Tic-Tac-Toe.
pub const BOARD_SIZE: usize = 9;

/// Stable position of a state inside a [`crate::space::StateSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateIndex(usize);

impl StateIndex {
    pub const fn new(value: usize) -> Self {
        StateIndex(value)
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<StateIndex> for usize {
    fn from(index: StateIndex) -> Self {
        index.0
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Position of an action within the ordered legal actions of one state.
///
/// Only meaningful together with the [`StateIndex`] it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionIndex(usize);

impl ActionIndex {
    pub const fn new(value: usize) -> Self {
        ActionIndex(value)
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<ActionIndex> for usize {
    fn from(index: ActionIndex) -> Self {
        index.0
    }
}

impl fmt::Display for ActionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}
