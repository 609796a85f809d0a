//! Tabular reinforcement learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe game implementation and state enumeration
//! - Synchronous value iteration over a known opponent model
//! - Q-learning through simulated play against a sampled opponent
//! - Greedy policy extraction and evaluation for both

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod policy;
pub mod ports;
pub mod q_learning;
pub mod space;
pub mod tictactoe;
pub mod types;
pub mod value_iteration;

pub use config::{QLearningConfig, RewardConfig, SolverConfig, ValueIterationConfig};
pub use error::{Error, Result};
pub use evaluation::{EvaluationResult, evaluate_policy};
pub use policy::Policy;
pub use q_learning::{QLearningReport, QLearningSolver, QTable};
pub use space::StateSpace;
pub use types::{ActionIndex, StateIndex};
pub use value_iteration::{IterationReport, ValueIterationSolver, ValueTable};
