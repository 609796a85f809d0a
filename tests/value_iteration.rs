mod common;

use common::{assert_complete, board, random_environment, random_mdp, solve_against_random};
use ttt_rl::{
    Error,
    adapters::{DefensiveOpponent, TicTacToe, TicTacToeMdp},
    config::{RewardConfig, ValueIterationConfig},
    evaluate_policy,
    tictactoe::Player,
    value_iteration::ValueIterationSolver,
};

#[test]
fn terminal_states_stay_at_zero() {
    let mdp = random_mdp(0);
    for iterations in [1, 3, 8] {
        let config = ValueIterationConfig::default().with_iterations(iterations);
        let mut solver = ValueIterationSolver::new(&mdp, config).unwrap();
        solver.iterate().unwrap();

        let space = solver.space();
        for index in space.indices().filter(|&i| space.is_terminal(i)) {
            assert_eq!(solver.values().get(index), 0.0);
        }
    }
}

#[test]
fn residuals_contract_by_discount() {
    let mdp = random_mdp(0);
    let config = ValueIterationConfig::default().with_iterations(12);
    let mut solver = ValueIterationSolver::new(&mdp, config).unwrap();
    let report = solver.iterate().unwrap();

    assert_eq!(report.residuals.len(), 12);
    // The first sweep discovers the win reward
    assert!((report.residuals[0] - 10.0).abs() < 1e-9);
    for pair in report.residuals.windows(2) {
        assert!(
            pair[1] <= 0.9 * pair[0] + 1e-9,
            "residual grew from {} to {}",
            pair[0],
            pair[1]
        );
    }
    // Episodes last at most five agent moves, so the values settle exactly
    assert_eq!(report.final_residual(), Some(0.0));
}

#[test]
fn extract_policy_is_idempotent() {
    let mdp = random_mdp(0);
    let config = ValueIterationConfig::default().with_iterations(6);
    let mut solver = ValueIterationSolver::new(&mdp, config).unwrap();
    solver.iterate().unwrap();

    let first = solver.extract_policy().unwrap();
    let second = solver.extract_policy().unwrap();
    assert_eq!(first, second);
}

#[test]
fn policy_covers_every_state() {
    let policy = solve_against_random(5);
    assert_eq!(policy.len(), 3381);
    assert_eq!(policy.decided_count(), 2423);
    assert_complete(&policy);
}

#[test]
fn takes_immediate_win_after_two_sweeps() {
    let policy = solve_against_random(2);
    assert_eq!(policy.action(&board("XX.OO....")), Some(&2));
    // Column win for X beats blocking O's row
    assert_eq!(policy.action(&board("XO.XO....")), Some(&6));
}

#[test]
fn blocks_forced_loss() {
    // O threatens the middle row and X has no immediate win
    let policy = solve_against_random(10);
    assert_eq!(policy.action(&board("X..OO.X..")), Some(&5));
}

#[test]
fn value_of_winning_position() {
    let mdp = random_mdp(0);
    let config = ValueIterationConfig::default().with_iterations(2);
    let mut solver = ValueIterationSolver::new(&mdp, config).unwrap();
    solver.iterate().unwrap();
    assert!((solver.value_of(&board("XX.OO....")).unwrap() - 10.0).abs() < 1e-9);
    assert!(matches!(
        solver.value_of(&board("XX.O.....")),
        Err(Error::UnknownState { .. })
    ));
}

#[test]
fn beats_random_opponent() {
    let policy = solve_against_random(50);
    let mut environment = random_environment(42);
    let result = evaluate_policy(&policy, &mut environment, 2000).unwrap();

    assert_eq!(result.games, 2000);
    assert!(result.win_rate >= 0.9, "win rate {}", result.win_rate);
    assert!(result.loss_rate <= 0.02, "loss rate {}", result.loss_rate);
}

#[test]
fn living_penalty_shortens_games() {
    let rewards = RewardConfig::new(10.0, -10.0, 0.0, -1.0);
    let mdp = TicTacToeMdp::new(
        TicTacToe::new(Player::X),
        DefensiveOpponent::with_seed(0),
        rewards,
    );
    let config = ValueIterationConfig::default().with_iterations(10);
    let mut solver = ValueIterationSolver::new(&mdp, config).unwrap();
    let policy = solver.train().unwrap();

    assert_complete(&policy);
    assert_eq!(policy.action(&board("XX.OO....")), Some(&2));
}

#[test]
fn o_agent_solves_its_own_space() {
    let mdp = TicTacToeMdp::new(
        TicTacToe::new(Player::O),
        ttt_rl::adapters::RandomOpponent::with_seed(0),
        RewardConfig::default(),
    );
    let config = ValueIterationConfig::default().with_iterations(5);
    let mut solver = ValueIterationSolver::new(&mdp, config).unwrap();
    let policy = solver.train().unwrap();

    assert_eq!(policy.len(), 3381);
    assert_complete(&policy);
    assert_eq!(policy.action(&board("OO.XX...._O")), Some(&2));
    // O opened and won on its third move
    assert_eq!(policy.get(&board("OOOXX...._X")), Some(&None));
}
