//! Greedy evaluation of a learned policy against the environment's opponent

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    adapters::TicTacToeEnvironment,
    policy::Policy,
    ports::{Environment, Opponent},
    tictactoe::BoardState,
};

/// Results of an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Total games played
    pub games: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,
}

impl EvaluationResult {
    /// Create a new evaluation result
    pub fn new(games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if games > 0 {
                count as f64 / games as f64
            } else {
                0.0
            }
        };

        Self {
            games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

/// Play `games` episodes following `policy` greedily.
///
/// The environment is reset before every game; its opponent is sampled as
/// during training.
///
/// # Errors
///
/// * [`Error::UnknownState`] if the game reaches a state the policy does not cover
/// * [`Error::MissingAction`] if the policy has no action for a live state
/// * any error raised by the environment
pub fn evaluate_policy<O: Opponent>(
    policy: &Policy<BoardState, usize>,
    environment: &mut TicTacToeEnvironment<O>,
    games: usize,
) -> Result<EvaluationResult> {
    let agent = environment.domain().agent();
    let (mut wins, mut draws, mut losses) = (0, 0, 0);

    for _ in 0..games {
        let mut state = environment.reset();
        while !environment.is_terminal() {
            let action = match policy.get(&state) {
                Some(Some(action)) => *action,
                Some(None) => {
                    return Err(Error::MissingAction {
                        state: state.encode(),
                    });
                }
                None => {
                    return Err(Error::UnknownState {
                        state: state.encode(),
                    });
                }
            };
            state = environment.execute_move(&action)?.next;
        }

        match state.winner() {
            Some(winner) if winner == agent => wins += 1,
            Some(_) => losses += 1,
            None => draws += 1,
        }
    }

    let result = EvaluationResult::new(games, wins, draws, losses);
    log::info!(
        "{:<32}W {:.3} D {:.3} L {:.3} over {} games",
        "evaluation",
        result.win_rate,
        result.draw_rate,
        result.loss_rate,
        games
    );
    Ok(result)
}
