//! Q-table for temporal difference learning

use std::{fmt::Debug, hash::Hash};

use crate::{
    Error, Result,
    space::StateSpace,
    types::{ActionIndex, StateIndex},
};

/// Action-value estimates for every registered (state, action) pair.
///
/// Rows follow the state arena and columns follow each state's legal action
/// order, so a row is empty for terminal states. Unregistered pairs read as
/// 0.0 and are never written.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    rows: Vec<Vec<f64>>,
}

/// Exponential moving average step: (1 − α) · old + α · sample.
pub fn blend(old: f64, sample: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * old + alpha * sample
}

impl QTable {
    /// A zero table shaped like `space`.
    pub fn for_space<S, A>(space: &StateSpace<S, A>) -> Self {
        Self {
            rows: space
                .indices()
                .map(|index| vec![0.0; space.actions(index).len()])
                .collect(),
        }
    }

    /// Get Q-value for a state-action pair (0.0 if unregistered)
    pub fn get(&self, state: StateIndex, action: ActionIndex) -> f64 {
        self.rows
            .get(state.value())
            .and_then(|row| row.get(action.value()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Overwrite a Q-value, returning the previous one.
    ///
    /// Returns `None` and leaves the table untouched if the pair is not
    /// registered.
    pub fn set(&mut self, state: StateIndex, action: ActionIndex, value: f64) -> Option<f64> {
        let slot = self.rows.get_mut(state.value())?.get_mut(action.value())?;
        Some(std::mem::replace(slot, value))
    }

    /// All Q-values of a state in legal action order.
    pub fn row(&self, state: StateIndex) -> &[f64] {
        self.rows.get(state.value()).map_or(&[], Vec::as_slice)
    }

    /// Highest Q-value of a state, or 0.0 when it has no actions.
    pub fn max_value(&self, state: StateIndex) -> f64 {
        self.greedy_action(state).map_or(0.0, |(_, value)| value)
    }

    /// First action with the highest Q-value, and that value.
    pub fn greedy_action(&self, state: StateIndex) -> Option<(ActionIndex, f64)> {
        let mut best: Option<(ActionIndex, f64)> = None;
        for (position, &value) in self.row(state).iter().enumerate() {
            if best.is_none_or(|(_, max)| value > max) {
                best = Some((ActionIndex::new(position), value));
            }
        }
        best
    }

    /// Blend `sample` into Q(s, a) with learning rate `alpha`.
    ///
    /// Returns the new value, or `None` if the pair is not registered.
    pub fn update(
        &mut self,
        state: StateIndex,
        action: ActionIndex,
        sample: f64,
        alpha: f64,
    ) -> Option<f64> {
        let slot = self.rows.get_mut(state.value())?.get_mut(action.value())?;
        *slot = blend(*slot, sample, alpha);
        Some(*slot)
    }

    /// Q-value of a (state, action) pair given by value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if the state was never enumerated.
    /// An action that is not legal in the state reads as 0.0.
    pub fn q_value<S, A>(&self, space: &StateSpace<S, A>, state: &S, action: &A) -> Result<f64>
    where
        S: Clone + Eq + Hash + Debug,
        A: Clone + PartialEq + Debug,
    {
        let index = space.index_of(state)?;
        Ok(space
            .action_index(index, action)
            .map_or(0.0, |action| self.get(index, action)))
    }

    /// Resolve a pair by value into indices.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownState`] if the state was never enumerated
    /// * [`Error::UnregisteredAction`] if the action is not legal there
    pub fn locate<S, A>(
        space: &StateSpace<S, A>,
        state: &S,
        action: &A,
    ) -> Result<(StateIndex, ActionIndex)>
    where
        S: Clone + Eq + Hash + Debug,
        A: Clone + PartialEq + Debug,
    {
        let index = space.index_of(state)?;
        let action_index =
            space
                .action_index(index, action)
                .ok_or_else(|| Error::UnregisteredAction {
                    action: format!("{action:?}"),
                    state: format!("{state:?}"),
                })?;
        Ok((index, action_index))
    }

    /// Number of state rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of stored Q-values
    pub fn size(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(shape: &[usize]) -> QTable {
        QTable {
            rows: shape.iter().map(|&n| vec![0.0; n]).collect(),
        }
    }

    fn s(i: usize) -> StateIndex {
        StateIndex::new(i)
    }

    fn a(i: usize) -> ActionIndex {
        ActionIndex::new(i)
    }

    #[test]
    fn test_qtable_initialization() {
        let qtable = table(&[3, 0]);
        assert_eq!(qtable.get(s(0), a(2)), 0.0);
        assert_eq!(qtable.size(), 3);
        assert_eq!(qtable.len(), 2);
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = table(&[3]);
        assert_eq!(qtable.set(s(0), a(1), 1.5), Some(0.0));
        assert_eq!(qtable.get(s(0), a(1)), 1.5);
    }

    #[test]
    fn test_unregistered_pairs() {
        let mut qtable = table(&[2, 0]);
        assert_eq!(qtable.get(s(0), a(5)), 0.0);
        assert_eq!(qtable.get(s(7), a(0)), 0.0);
        assert_eq!(qtable.set(s(1), a(0), 3.0), None);
        assert_eq!(qtable.update(s(0), a(2), 3.0, 0.5), None);
        assert_eq!(qtable.row(s(1)), &[] as &[f64]);
    }

    #[test]
    fn test_max_value() {
        let mut qtable = table(&[3, 0]);
        qtable.set(s(0), a(0), 0.5);
        qtable.set(s(0), a(1), 1.5);
        qtable.set(s(0), a(2), 0.8);

        assert_eq!(qtable.max_value(s(0)), 1.5);
        assert_eq!(qtable.max_value(s(1)), 0.0);
    }

    #[test]
    fn test_max_value_all_negative() {
        let mut qtable = table(&[2]);
        qtable.set(s(0), a(0), -2.0);
        qtable.set(s(0), a(1), -1.0);
        assert_eq!(qtable.max_value(s(0)), -1.0);
    }

    #[test]
    fn test_greedy_action_first_max_wins() {
        let mut qtable = table(&[4]);
        qtable.set(s(0), a(1), 1.5);
        qtable.set(s(0), a(3), 1.5);
        assert_eq!(qtable.greedy_action(s(0)), Some((a(1), 1.5)));
        assert_eq!(table(&[0]).greedy_action(s(0)), None);
    }

    #[test]
    fn test_update_blends_sample() {
        let mut qtable = table(&[1]);
        // sample = r + γ · max Q(s') = 1 + 0.9 · 0
        let updated = qtable.update(s(0), a(0), 1.0 + 0.9 * 0.0, 0.1);
        assert!((updated.unwrap() - 0.1).abs() < 1e-12);

        let updated = qtable.update(s(0), a(0), 1.0, 0.1);
        assert!((updated.unwrap() - 0.19).abs() < 1e-12);
    }

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend(3.0, 7.0, 1.0), 7.0);
        assert_eq!(blend(3.0, 7.0, 0.0), 3.0);
    }
}
