//! Adapters implementing domain ports.
//!
//! This module contains the Tic-Tac-Toe implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod domain;
pub mod environment;
pub mod mdp;
pub mod observers;
pub mod opponents;

pub use domain::TicTacToe;
pub use environment::TicTacToeEnvironment;
pub use mdp::TicTacToeMdp;
pub use observers::{HistoryObserver, ProgressObserver, TrainingEvent};
pub use opponents::{DefensiveOpponent, RandomOpponent};
