//! Extracted decision rule shared by both solvers

use std::{collections::HashMap, hash::Hash};

/// Mapping from state to the action the agent plays there.
///
/// Terminal states map to `None`. A policy is built once by a solver and
/// only read afterwards.
#[derive(Debug, Clone)]
pub struct Policy<S, A> {
    entries: HashMap<S, Option<A>>,
}

impl<S: Eq + Hash, A> Policy<S, A> {
    /// Action chosen for `state`, or `None` if the state is terminal or
    /// unknown to this policy.
    pub fn action(&self, state: &S) -> Option<&A> {
        self.entries.get(state).and_then(Option::as_ref)
    }

    /// Raw entry for `state`: `None` if the state is unknown,
    /// `Some(None)` if it is known and terminal.
    pub fn get(&self, state: &S) -> Option<&Option<A>> {
        self.entries.get(state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.entries.contains_key(state)
    }

    /// Number of states covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of states with an action assigned.
    pub fn decided_count(&self) -> usize {
        self.entries.values().filter(|a| a.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, Option<&A>)> {
        self.entries
            .iter()
            .map(|(state, action)| (state, action.as_ref()))
    }
}

impl<S: Eq + Hash, A> FromIterator<(S, Option<A>)> for Policy<S, A> {
    fn from_iter<I: IntoIterator<Item = (S, Option<A>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<S: Eq + Hash, A: PartialEq> PartialEq for Policy<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Policy<&'static str, usize> {
        [("start", Some(4)), ("middle", Some(0)), ("end", None)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_lookup() {
        let policy = sample();
        assert_eq!(policy.action(&"start"), Some(&4));
        assert_eq!(policy.action(&"end"), None);
        assert_eq!(policy.get(&"end"), Some(&None));
        assert_eq!(policy.get(&"missing"), None);
        assert!(policy.contains(&"middle"));
        assert!(!policy.contains(&"missing"));
    }

    #[test]
    fn test_counts() {
        let policy = sample();
        assert_eq!(policy.len(), 3);
        assert_eq!(policy.decided_count(), 2);
        assert_eq!(policy.iter().filter(|(_, a)| a.is_none()).count(), 1);
    }

    #[test]
    fn test_equality_ignores_construction_order() {
        let reversed: Policy<_, _> = [("end", None), ("middle", Some(0)), ("start", Some(4))]
            .into_iter()
            .collect();
        assert_eq!(sample(), reversed);
    }

    #[test]
    fn test_equality_compares_actions() {
        let changed: Policy<_, _> = [("start", Some(4)), ("middle", Some(1)), ("end", None)]
            .into_iter()
            .collect();
        assert_ne!(sample(), changed);

        let shorter: Policy<_, _> = [("start", Some(4)), ("middle", Some(0))]
            .into_iter()
            .collect();
        assert_ne!(sample(), shorter);
    }
}
