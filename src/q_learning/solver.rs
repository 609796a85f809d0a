//! Q-learning (off-policy TD control) against a live environment

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::q_table::QTable;
use crate::{
    Error, Result,
    config::QLearningConfig,
    policy::Policy,
    ports::{Domain, Environment, EpisodeSummary, Outcome, TrainingObserver},
    space::StateSpace,
    types::StateIndex,
};

const LOG_INTERVAL: usize = 1000;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Aggregate statistics of a [`QLearningSolver::train`] run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearningReport {
    /// Episodes played
    pub episodes: usize,
    /// Agent moves taken over all episodes
    pub steps: usize,
    /// Mean undiscounted return per episode
    pub mean_return: f64,
    /// Exploration rate after the last episode
    pub final_epsilon: f64,
}

/// Q-learning solver
///
/// The Q-table is shaped from the domain's state enumeration up front;
/// experience comes exclusively from the environment.
pub struct QLearningSolver<E: Environment, R = StdRng> {
    environment: E,
    config: QLearningConfig,
    space: StateSpace<E::State, E::Action>,
    q_table: QTable,
    epsilon: f64,
    rng: R,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl<E: Environment> QLearningSolver<E, StdRng> {
    /// Create a solver whose exploration RNG is seeded from `config.seed`
    /// (or from entropy when unset).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the domain's
    /// state enumeration is inconsistent.
    pub fn new<D>(domain: &D, environment: E, config: QLearningConfig) -> Result<Self>
    where
        D: Domain<State = E::State, Action = E::Action>,
    {
        let rng = build_rng(config.seed);
        Self::with_rng(domain, environment, config, rng)
    }
}

impl<E: Environment, R: Rng> QLearningSolver<E, R> {
    /// Create a solver that explores with the given RNG.
    pub fn with_rng<D>(domain: &D, environment: E, config: QLearningConfig, rng: R) -> Result<Self>
    where
        D: Domain<State = E::State, Action = E::Action>,
    {
        config.validate()?;
        let space = StateSpace::build(domain)?;
        let q_table = QTable::for_space(&space);
        log::info!(
            "{:<32}{} states, {} state-action pairs",
            "q-learning state space",
            space.len(),
            q_table.size()
        );

        Ok(Self {
            environment,
            epsilon: config.epsilon,
            config,
            space,
            q_table,
            rng,
            observers: Vec::new(),
        })
    }

    /// Attach an observer that is notified after every episode.
    pub fn with_observer(mut self, observer: impl TrainingObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Play `config.episodes` episodes and extract the greedy policy.
    pub fn train(&mut self) -> Result<(Policy<E::State, E::Action>, QLearningReport)> {
        let report = self.run()?;
        Ok((self.extract_policy(), report))
    }

    /// Play `config.episodes` episodes, updating the Q-table after every step.
    ///
    /// # Errors
    ///
    /// Propagates the first environment error (an illegal action, for
    /// example). The step that failed is not learned from.
    pub fn run(&mut self) -> Result<QLearningReport> {
        let episodes = self.config.episodes;
        log::info!(
            "{:<32}{} episodes, alpha {}, discount {}, epsilon {}",
            "beginning q-learning",
            episodes,
            self.config.learning_rate,
            self.config.discount,
            self.epsilon
        );
        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        let mut steps = 0;
        let mut total_return = 0.0;
        for episode in 1..=episodes {
            let summary = self.run_episode()?;
            steps += summary.steps;
            total_return += summary.total_return;

            for observer in &mut self.observers {
                observer.on_episode_end(episode, &summary)?;
            }
            self.decay_epsilon();

            if episode.is_multiple_of(LOG_INTERVAL) {
                log::debug!(
                    "{:<32}{:>8}{:>12.4}{:>10.4}",
                    "q-learning episode",
                    episode,
                    total_return / episode as f64,
                    self.epsilon
                );
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let report = QLearningReport {
            episodes,
            steps,
            mean_return: if episodes == 0 {
                0.0
            } else {
                total_return / episodes as f64
            },
            final_epsilon: self.epsilon,
        };
        log::info!("{:<32}{:.4}", "mean return", report.mean_return);
        Ok(report)
    }

    /// Play one episode from `reset` to a terminal state.
    pub fn run_episode(&mut self) -> Result<EpisodeSummary> {
        let mut summary = EpisodeSummary {
            steps: 0,
            total_return: 0.0,
            epsilon: self.epsilon,
        };

        let mut state = self.environment.reset();
        while !self.environment.is_terminal() {
            let moves = self.environment.possible_moves();
            let action = self.select_action(&state, &moves)?;
            let outcome = match self.environment.execute_move(&action) {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::error!("{:<32}{action:?} in {state:?}: {err}", "q-learning aborted");
                    return Err(err);
                }
            };

            self.learn_from(&outcome)?;
            summary.steps += 1;
            summary.total_return += outcome.reward;
            state = outcome.next;
        }

        Ok(summary)
    }

    /// ε-greedy choice among `moves`: with probability ε a uniformly random
    /// move, otherwise the first move with the highest Q-value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActionsAvailable`] if `moves` is empty, or
    /// [`Error::UnknownState`] if `state` was never enumerated.
    pub fn select_action(&mut self, state: &E::State, moves: &[E::Action]) -> Result<E::Action> {
        if moves.is_empty() {
            return Err(Error::NoActionsAvailable {
                state: format!("{state:?}"),
            });
        }
        let index = self.space.index_of(state)?;

        if self.rng.random::<f64>() < self.epsilon
            && let Some(action) = moves.choose(&mut self.rng)
        {
            return Ok(action.clone());
        }
        Ok(self.greedy_among(index, moves).clone())
    }

    fn greedy_among<'a>(&self, index: StateIndex, moves: &'a [E::Action]) -> &'a E::Action {
        let mut best: Option<(&E::Action, f64)> = None;
        for action in moves {
            let value = self
                .space
                .action_index(index, action)
                .map_or(0.0, |action| self.q_table.get(index, action));
            if best.is_none_or(|(_, max)| value > max) {
                best = Some((action, value));
            }
        }
        // moves is non-empty
        best.map_or(&moves[0], |(action, _)| action)
    }

    /// Apply the TD update for one realized step and return the new Q-value.
    ///
    /// Q(s,a) ← (1 − α) Q(s,a) + α [r + γ max_a' Q(s',a')], with the
    /// continuation term 0 when s' is terminal.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownState`] if either state was never enumerated
    /// * [`Error::UnregisteredAction`] if the action is not legal in `state`
    pub fn learn_from(&mut self, outcome: &Outcome<E::State, E::Action>) -> Result<f64> {
        let (state, action) = QTable::locate(&self.space, &outcome.state, &outcome.action)?;
        let next = self.space.index_of(&outcome.next)?;
        let continuation = if self.space.is_terminal(next) {
            0.0
        } else {
            self.q_table.max_value(next)
        };
        let sample = outcome.reward + self.config.discount * continuation;

        self.q_table
            .update(state, action, sample, self.config.learning_rate)
            .ok_or_else(|| Error::UnregisteredAction {
                action: format!("{:?}", outcome.action),
                state: format!("{:?}", outcome.state),
            })
    }

    /// Multiply ε by the configured decay, never dropping below the floor.
    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }

    /// Greedy policy over the learned Q-values; terminal states map to `None`.
    pub fn extract_policy(&self) -> Policy<E::State, E::Action> {
        self.space
            .iter()
            .map(|(index, state)| {
                let action = self
                    .q_table
                    .greedy_action(index)
                    .and_then(|(action, _)| self.space.action(index, action))
                    .cloned();
                (state.clone(), action)
            })
            .collect()
    }

    /// Learned Q-value of a (state, action) pair.
    pub fn q_value(&self, state: &E::State, action: &E::Action) -> Result<f64> {
        self.q_table.q_value(&self.space, state, action)
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn space(&self) -> &StateSpace<E::State, E::Action> {
        &self.space
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pick a number of steps (1 or 2) to walk from 0 toward 3; landing
    /// exactly on 3 pays 1, overshooting to 4 pays -1. Both end the episode.
    struct Walk;

    impl Domain for Walk {
        type State = u8;
        type Action = u8;

        fn states(&self) -> Vec<u8> {
            vec![0, 1, 2, 3, 4]
        }

        fn legal_actions(&self, _state: &u8) -> Vec<u8> {
            vec![1, 2]
        }

        fn is_terminal(&self, state: &u8) -> bool {
            *state >= 3
        }
    }

    struct WalkEnvironment {
        position: u8,
    }

    impl Environment for WalkEnvironment {
        type State = u8;
        type Action = u8;

        fn reset(&mut self) -> u8 {
            self.position = 0;
            self.position
        }

        fn current_state(&self) -> &u8 {
            &self.position
        }

        fn is_terminal(&self) -> bool {
            self.position >= 3
        }

        fn possible_moves(&self) -> Vec<u8> {
            if self.is_terminal() { vec![] } else { vec![1, 2] }
        }

        fn execute_move(&mut self, action: &u8) -> Result<Outcome<u8, u8>> {
            if !self.possible_moves().contains(action) {
                return Err(Error::IllegalAction {
                    action: action.to_string(),
                    state: self.position.to_string(),
                });
            }
            let state = self.position;
            self.position += action;
            let reward = match self.position {
                3 => 1.0,
                4 => -1.0,
                _ => 0.0,
            };
            Ok(Outcome {
                state,
                action: *action,
                reward,
                next: self.position,
            })
        }
    }

    fn solver(config: QLearningConfig) -> QLearningSolver<WalkEnvironment> {
        QLearningSolver::new(&Walk, WalkEnvironment { position: 0 }, config).unwrap()
    }

    fn config() -> QLearningConfig {
        QLearningConfig::default()
            .with_learning_rate(0.5)
            .with_discount(0.9)
            .with_episodes(500)
            .with_seed(7)
    }

    #[test]
    fn test_single_update_law() {
        let mut solver = solver(config().with_learning_rate(0.1));
        let outcome = Outcome {
            state: 2,
            action: 1,
            reward: 1.0,
            next: 3,
        };
        let value = solver.learn_from(&outcome).unwrap();
        assert!((value - 0.1).abs() < 1e-12);
        assert!((solver.q_value(&2, &1).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_update_bootstraps_from_next_state() {
        let mut solver = solver(config());
        solver
            .learn_from(&Outcome {
                state: 2,
                action: 1,
                reward: 1.0,
                next: 3,
            })
            .unwrap();
        // Q(2, 1) = 0.5; Q(0, 2) = 0.5 * (0 + 0.9 * 0.5)
        let value = solver
            .learn_from(&Outcome {
                state: 0,
                action: 2,
                reward: 0.0,
                next: 2,
            })
            .unwrap();
        assert!((value - 0.225).abs() < 1e-12);
    }

    #[test]
    fn test_unregistered_action_is_rejected() {
        let mut solver = solver(config());
        let result = solver.learn_from(&Outcome {
            state: 0,
            action: 5,
            reward: 0.0,
            next: 1,
        });
        assert!(matches!(result, Err(Error::UnregisteredAction { .. })));
        assert_eq!(solver.q_table().row(StateIndex::new(0)), &[0.0, 0.0]);
    }

    #[test]
    fn test_learns_to_land_on_goal() {
        let mut solver = solver(config().with_epsilon(0.5).with_episodes(2000));
        let (policy, report) = solver.train().unwrap();

        assert_eq!(report.episodes, 2000);
        assert!(report.steps >= 2000);
        assert_eq!(policy.action(&1), Some(&2));
        assert_eq!(policy.action(&2), Some(&1));
        assert_eq!(policy.get(&3), Some(&None));
        assert_eq!(policy.get(&4), Some(&None));
    }

    #[test]
    fn test_greedy_with_zero_epsilon_is_deterministic() {
        let run = || {
            let mut solver = solver(config().with_epsilon(0.0).with_episodes(50));
            let (policy, _) = solver.train().unwrap();
            (policy, solver.q_table().clone())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_ties_pick_first_move() {
        let mut solver = solver(config().with_epsilon(0.0));
        assert_eq!(solver.select_action(&0, &[1, 2]).unwrap(), 1);
        assert!(matches!(
            solver.select_action(&0, &[]),
            Err(Error::NoActionsAvailable { .. })
        ));
    }

    #[test]
    fn test_epsilon_decay_respects_floor() {
        let mut solver = solver(config().with_epsilon(0.5).with_epsilon_decay(0.5, 0.1));
        solver.decay_epsilon();
        assert_eq!(solver.epsilon(), 0.25);
        solver.decay_epsilon();
        solver.decay_epsilon();
        assert_eq!(solver.epsilon(), 0.1);
    }

    #[test]
    fn test_illegal_action_propagates() {
        struct Stubborn(WalkEnvironment);

        impl Environment for Stubborn {
            type State = u8;
            type Action = u8;

            fn reset(&mut self) -> u8 {
                self.0.reset()
            }

            fn current_state(&self) -> &u8 {
                self.0.current_state()
            }

            fn is_terminal(&self) -> bool {
                self.0.is_terminal()
            }

            // Advertises a move the underlying walk rejects
            fn possible_moves(&self) -> Vec<u8> {
                vec![7]
            }

            fn execute_move(&mut self, action: &u8) -> Result<Outcome<u8, u8>> {
                self.0.execute_move(action)
            }
        }

        let mut solver =
            QLearningSolver::new(&Walk, Stubborn(WalkEnvironment { position: 0 }), config())
                .unwrap();
        assert!(matches!(
            solver.run_episode(),
            Err(Error::IllegalAction { .. })
        ));
        assert_eq!(solver.q_table().row(StateIndex::new(0)), &[0.0, 0.0]);
    }
}
