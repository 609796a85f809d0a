//! Event streams the solvers send to attached observers

mod common;

use common::{random_environment, random_mdp, x_agent};
use ttt_rl::{
    adapters::{HistoryObserver, TrainingEvent},
    config::{QLearningConfig, ValueIterationConfig},
    q_learning::QLearningSolver,
    value_iteration::ValueIterationSolver,
};

#[test]
fn value_iteration_reports_every_sweep() {
    let history = HistoryObserver::new();
    let mdp = random_mdp(0);
    let config = ValueIterationConfig::default().with_iterations(4);
    let mut solver = ValueIterationSolver::new(&mdp, config)
        .unwrap()
        .with_observer(history.clone());
    let report = solver.iterate().unwrap();

    let events = history.events();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0], TrainingEvent::Started { total: 4 });
    assert_eq!(events[5], TrainingEvent::Finished);

    let sweeps: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            TrainingEvent::Sweep { sweep, .. } => Some(*sweep),
            _ => None,
        })
        .collect();
    assert_eq!(sweeps, vec![1, 2, 3, 4]);
    assert_eq!(history.residuals(), report.residuals);
}

#[test]
fn every_observer_sees_the_same_sweeps() {
    let first = HistoryObserver::new();
    let second = HistoryObserver::new();
    let mdp = random_mdp(0);
    let config = ValueIterationConfig::default().with_iterations(3);
    let mut solver = ValueIterationSolver::new(&mdp, config)
        .unwrap()
        .with_observer(first.clone())
        .with_observer(second.clone());
    solver.train().unwrap();

    assert_eq!(first.events(), second.events());
    assert_eq!(first.residuals().len(), 3);
}

#[test]
fn q_learning_reports_every_episode() {
    let history = HistoryObserver::new();
    let config = QLearningConfig::default()
        .with_epsilon(0.4)
        .with_epsilon_decay(0.5, 0.05)
        .with_episodes(50)
        .with_seed(11);
    let mut solver = QLearningSolver::new(&x_agent(), random_environment(11), config)
        .unwrap()
        .with_observer(history.clone());
    let (_, report) = solver.train().unwrap();

    let events = history.events();
    assert_eq!(events.len(), 52);
    assert_eq!(events[0], TrainingEvent::Started { total: 50 });
    assert_eq!(events[51], TrainingEvent::Finished);

    let summaries: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            TrainingEvent::Episode { episode, summary } => Some((*episode, *summary)),
            _ => None,
        })
        .collect();
    let numbers: Vec<usize> = summaries.iter().map(|(episode, _)| *episode).collect();
    assert_eq!(numbers, (1..=50).collect::<Vec<_>>());

    // Each episode reports the exploration rate it was played with
    let epsilons: Vec<f64> = summaries.iter().take(5).map(|(_, s)| s.epsilon).collect();
    assert_eq!(epsilons, vec![0.4, 0.2, 0.1, 0.05, 0.05]);

    let steps: usize = summaries.iter().map(|(_, s)| s.steps).sum();
    assert_eq!(steps, report.steps);

    let returns = history.returns();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    assert!((mean - report.mean_return).abs() < 1e-9);
}

