//! State-value table indexed by [`StateIndex`]

use std::{fmt::Debug, hash::Hash};

use crate::{Result, space::StateSpace, types::StateIndex};

/// Value estimate for every enumerated state.
///
/// Entries for terminal states stay at zero: no reward follows the end of
/// a game.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f64>,
}

impl ValueTable {
    /// A table of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    /// A zero table covering every state of `space`.
    pub fn for_space<S, A>(space: &StateSpace<S, A>) -> Self {
        Self::zeros(space.len())
    }

    pub fn get(&self, index: StateIndex) -> f64 {
        self.values[index.value()]
    }

    pub fn set(&mut self, index: StateIndex, value: f64) {
        self.values[index.value()] = value;
    }

    /// Value of `state`, resolved through `space`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownState`] if `state` was never enumerated.
    pub fn value_of<S, A>(&self, space: &StateSpace<S, A>, state: &S) -> Result<f64>
    where
        S: Clone + Eq + Hash + Debug,
        A: Clone + PartialEq + Debug,
    {
        Ok(self.get(space.index_of(state)?))
    }

    /// Largest absolute per-state difference (sup norm of `self - other`).
    pub fn max_difference(&self, other: &ValueTable) -> f64 {
        debug_assert_eq!(self.values.len(), other.values.len());
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &value)| (StateIndex::new(i), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let table = ValueTable::zeros(3);
        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_set_get() {
        let mut table = ValueTable::zeros(2);
        table.set(StateIndex::new(1), 4.5);
        assert_eq!(table.get(StateIndex::new(1)), 4.5);
        assert_eq!(table.get(StateIndex::new(0)), 0.0);
    }

    #[test]
    fn test_max_difference() {
        let mut a = ValueTable::zeros(3);
        let mut b = ValueTable::zeros(3);
        a.set(StateIndex::new(0), 1.0);
        b.set(StateIndex::new(2), -2.5);
        assert!((a.max_difference(&b) - 2.5).abs() < 1e-12);
        assert_eq!(a.max_difference(&a), 0.0);
    }
}
