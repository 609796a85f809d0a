//! State arena shared by the value and action-value tables
//!
//! States are enumerated once, up front, and given a stable [`StateIndex`].
//! Both tables are plain vectors indexed by that position, so the hot loops
//! of the solvers never hash a state except to resolve a successor.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::{
    Error, Result,
    ports::Domain,
    types::{ActionIndex, StateIndex},
};

/// Every enumerated state with its ordered legal actions and terminal flag.
#[derive(Debug, Clone)]
pub struct StateSpace<S, A> {
    states: Vec<S>,
    index: HashMap<S, StateIndex>,
    actions: Vec<Vec<A>>,
    terminal: Vec<bool>,
}

impl<S, A> StateSpace<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + PartialEq + Debug,
{
    /// Enumerate the domain's states and register their legal actions.
    ///
    /// # Errors
    ///
    /// * [`Error::DuplicateState`] if the enumeration yields a state twice
    /// * [`Error::NoActionsAvailable`] if a non-terminal state has no moves
    pub fn build<D>(domain: &D) -> Result<Self>
    where
        D: Domain<State = S, Action = A>,
    {
        Self::from_states(domain, domain.states())
    }

    /// Register an explicit list of states, in the given order.
    ///
    /// # Errors
    ///
    /// Same as [`StateSpace::build`].
    pub fn from_states<D>(domain: &D, states: Vec<S>) -> Result<Self>
    where
        D: Domain<State = S, Action = A>,
    {
        let mut space = Self {
            states: Vec::with_capacity(states.len()),
            index: HashMap::with_capacity(states.len()),
            actions: Vec::with_capacity(states.len()),
            terminal: Vec::with_capacity(states.len()),
        };

        for state in states {
            let terminal = domain.is_terminal(&state);
            let actions = if terminal {
                Vec::new()
            } else {
                domain.legal_actions(&state)
            };
            if !terminal && actions.is_empty() {
                return Err(Error::NoActionsAvailable {
                    state: format!("{state:?}"),
                });
            }

            let index = StateIndex::new(space.states.len());
            if space.index.insert(state.clone(), index).is_some() {
                return Err(Error::DuplicateState {
                    state: format!("{state:?}"),
                });
            }
            space.states.push(state);
            space.actions.push(actions);
            space.terminal.push(terminal);
        }

        Ok(space)
    }

    /// Resolve a state to its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if the state was never enumerated.
    /// This points at broken enumeration, equality or hashing in the domain
    /// and is never defaulted.
    pub fn index_of(&self, state: &S) -> Result<StateIndex> {
        self.index
            .get(state)
            .copied()
            .ok_or_else(|| Error::UnknownState {
                state: format!("{state:?}"),
            })
    }

    /// Position of `action` among the legal actions of `state`.
    pub fn action_index(&self, state: StateIndex, action: &A) -> Option<ActionIndex> {
        self.actions(state)
            .iter()
            .position(|candidate| candidate == action)
            .map(ActionIndex::new)
    }
}

impl<S, A> StateSpace<S, A> {
    /// State stored at `index`.
    pub fn state(&self, index: StateIndex) -> &S {
        &self.states[index.value()]
    }

    /// Ordered legal actions of the state at `index` (empty when terminal).
    pub fn actions(&self, index: StateIndex) -> &[A] {
        &self.actions[index.value()]
    }

    /// Action at `action` within the state at `index`, if registered.
    pub fn action(&self, index: StateIndex, action: ActionIndex) -> Option<&A> {
        self.actions(index).get(action.value())
    }

    pub fn is_terminal(&self, index: StateIndex) -> bool {
        self.terminal[index.value()]
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All state indices in enumeration order.
    pub fn indices(&self) -> impl Iterator<Item = StateIndex> + use<S, A> {
        (0..self.states.len()).map(StateIndex::new)
    }

    /// All states with their indices in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &S)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateIndex::new(i), state))
    }

    /// Number of registered (state, action) pairs.
    pub fn pair_count(&self) -> usize {
        self.actions.iter().map(Vec::len).sum()
    }

    /// Number of terminal states.
    pub fn terminal_count(&self) -> usize {
        self.terminal.iter().filter(|&&t| t).count()
    }
}
