//! Observer port - abstraction for monitoring training progress
//!
//! Observers receive progress events from both solvers without the solvers
//! knowing about progress bars or any other output format.

use serde::{Deserialize, Serialize};

use crate::Result;

/// What happened during one Q-learning episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Agent moves taken before the episode ended
    pub steps: usize,
    /// Undiscounted sum of rewards received
    pub total_return: f64,
    /// Exploration rate used during the episode
    pub epsilon: f64,
}

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total)` - once, with the number of sweeps or episodes
/// 2. `on_sweep(...)` after every value iteration sweep, or
///    `on_episode_end(...)` after every Q-learning episode
/// 3. `on_training_end()` - once at the end
///
/// All methods default to doing nothing.
pub trait TrainingObserver {
    /// Called when training starts.
    fn on_training_start(&mut self, _total: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a value iteration sweep (1-based) with its sup-norm residual.
    fn on_sweep(&mut self, _sweep: usize, _residual: f64) -> Result<()> {
        Ok(())
    }

    /// Called after a Q-learning episode (1-based).
    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
