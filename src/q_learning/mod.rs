//! Q-learning temporal difference control
//!
//! Model-free: the agent only sees realized `[s, a, r, s']` samples from an
//! [`Environment`](crate::ports::Environment) and blends each one into its
//! estimate
//!
//! Q(s, a) ← (1 − α) Q(s, a) + α [r + γ max_a' Q(s', a')]
//!
//! while choosing moves ε-greedily. Because the target uses the maximum over
//! successor actions rather than the action actually taken next, the learned
//! values track the optimal policy regardless of exploration.
//!
//! ## Usage Example
//!
//! ```no_run
//! use ttt_rl::{
//!     adapters::{RandomOpponent, TicTacToe, TicTacToeEnvironment},
//!     config::{QLearningConfig, RewardConfig},
//!     q_learning::QLearningSolver,
//!     tictactoe::Player,
//! };
//!
//! let domain = TicTacToe::new(Player::X);
//! let environment =
//!     TicTacToeEnvironment::new(domain, RandomOpponent::with_seed(1), RewardConfig::default());
//! let config = QLearningConfig::default().with_episodes(20_000).with_seed(42);
//!
//! let mut solver = QLearningSolver::new(&domain, environment, config)?;
//! let (policy, report) = solver.train()?;
//! println!("{} decisions, mean return {:.3}", policy.decided_count(), report.mean_return);
//! # Ok::<(), ttt_rl::Error>(())
//! ```

pub mod q_table;
pub mod solver;

pub use q_table::{QTable, blend};
pub use solver::{QLearningReport, QLearningSolver};
