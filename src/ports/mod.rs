//! Ports (trait boundaries) for the collaborators the solvers depend on.
//!
//! The solvers only see these traits. The Tic-Tac-Toe rules, the opponent
//! and the simulated environment are adapters in [`crate::adapters`].

pub mod domain;
pub mod environment;
pub mod model;
pub mod observer;
pub mod opponent;

pub use domain::Domain;
pub use environment::{Environment, Outcome};
pub use model::{Transition, TransitionModel};
pub use observer::{EpisodeSummary, TrainingObserver};
pub use opponent::Opponent;
