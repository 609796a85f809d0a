//! Synchronous value iteration over a known transition model

use serde::{Deserialize, Serialize};

use super::value_table::ValueTable;
use crate::{
    Result,
    config::ValueIterationConfig,
    policy::Policy,
    ports::{TrainingObserver, TransitionModel},
    space::StateSpace,
    types::{ActionIndex, StateIndex},
};

/// Per-sweep convergence record returned by [`ValueIterationSolver::iterate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// Number of sweeps performed
    pub sweeps: usize,
    /// Sup-norm change of the value table produced by each sweep
    pub residuals: Vec<f64>,
}

impl IterationReport {
    /// Residual of the last sweep, or `None` if no sweep ran.
    pub fn final_residual(&self) -> Option<f64> {
        self.residuals.last().copied()
    }
}

/// Value iteration solver
///
/// Owns the value table for the lifetime of training; the model is borrowed.
pub struct ValueIterationSolver<'m, M: TransitionModel> {
    model: &'m M,
    config: ValueIterationConfig,
    space: StateSpace<M::State, M::Action>,
    values: ValueTable,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl<'m, M: TransitionModel> ValueIterationSolver<'m, M> {
    /// Enumerate the model's states and initialize every value to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the state
    /// enumeration is inconsistent (see [`StateSpace::build`]).
    pub fn new(model: &'m M, config: ValueIterationConfig) -> Result<Self> {
        config.validate()?;
        let space = StateSpace::build(model)?;
        let values = ValueTable::for_space(&space);
        log::info!(
            "{:<32}{} states, {} terminal",
            "value iteration state space",
            space.len(),
            space.terminal_count()
        );

        Ok(Self {
            model,
            config,
            space,
            values,
            observers: Vec::new(),
        })
    }

    /// Attach an observer that is notified after every sweep.
    pub fn with_observer(mut self, observer: impl TrainingObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Run value iteration and extract the resulting policy.
    pub fn train(&mut self) -> Result<Policy<M::State, M::Action>> {
        self.iterate()?;
        self.extract_policy()
    }

    /// Perform exactly `config.iterations` synchronous sweeps.
    ///
    /// Each sweep reads only the table produced by the previous one; the
    /// current table is replaced once the sweep is complete.
    pub fn iterate(&mut self) -> Result<IterationReport> {
        let sweeps = self.config.iterations;
        log::info!(
            "{:<32}{} sweeps, discount {}",
            "beginning value iteration",
            sweeps,
            self.config.discount
        );
        for observer in &mut self.observers {
            observer.on_training_start(sweeps)?;
        }

        let mut residuals = Vec::with_capacity(sweeps);
        for sweep in 1..=sweeps {
            let next = self.sweep()?;
            let residual = next.max_difference(&self.values);
            self.values = next;
            residuals.push(residual);

            log::debug!("{:<32}{:>6}{:>16.8}", "value iteration sweep", sweep, residual);
            for observer in &mut self.observers {
                observer.on_sweep(sweep, residual)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        if let Some(residual) = residuals.last() {
            log::info!("{:<32}{:.8}", "final residual", residual);
        }

        Ok(IterationReport { sweeps, residuals })
    }

    /// One Bellman backup of every state against the current table.
    ///
    /// Returns the new table without installing it. Terminal states are
    /// pinned at zero.
    pub fn sweep(&self) -> Result<ValueTable> {
        let mut next = ValueTable::for_space(&self.space);
        for index in self.space.indices() {
            if self.space.is_terminal(index) {
                continue;
            }
            if let Some((_, value)) = self.best_action(index)? {
                next.set(index, value);
            }
        }
        Ok(next)
    }

    /// Map every state to the action maximizing the one-step lookahead
    /// against the current value table; terminal states map to `None`.
    ///
    /// Ties keep the first maximal action in the domain's move order.
    pub fn extract_policy(&self) -> Result<Policy<M::State, M::Action>> {
        let mut entries = Vec::with_capacity(self.space.len());
        for (index, state) in self.space.iter() {
            let action = if self.space.is_terminal(index) {
                None
            } else {
                self.best_action(index)?
                    .and_then(|(action, _)| self.space.action(index, action))
                    .cloned()
            };
            entries.push((state.clone(), action));
        }
        Ok(entries.into_iter().collect())
    }

    /// Expected discounted return of taking `action` in the state at
    /// `index`: Σ p · (r + γ · V(s')).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownState`] if an outcome leads to a state
    /// that was never enumerated.
    pub fn action_value(&self, index: StateIndex, action: &M::Action) -> Result<f64> {
        let transitions = self.model.transitions(self.space.state(index), action)?;
        debug_assert!(
            (transitions.iter().map(|t| t.probability).sum::<f64>() - 1.0).abs() < 1e-9,
            "transition probabilities must sum to 1"
        );

        let mut expected = 0.0;
        for transition in &transitions {
            let next = self.space.index_of(&transition.next)?;
            expected += transition.probability
                * (transition.reward + self.config.discount * self.values.get(next));
        }
        Ok(expected)
    }

    /// First action with the highest expected value, and that value.
    fn best_action(&self, index: StateIndex) -> Result<Option<(ActionIndex, f64)>> {
        let mut best: Option<(ActionIndex, f64)> = None;
        for (position, action) in self.space.actions(index).iter().enumerate() {
            let value = self.action_value(index, action)?;
            if best.is_none_or(|(_, max)| value > max) {
                best = Some((ActionIndex::new(position), value));
            }
        }
        Ok(best)
    }

    /// Current value of `state`.
    pub fn value_of(&self, state: &M::State) -> Result<f64> {
        self.values.value_of(&self.space, state)
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn space(&self) -> &StateSpace<M::State, M::Action> {
        &self.space
    }

    pub fn config(&self) -> &ValueIterationConfig {
        &self.config
    }
}
