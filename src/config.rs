//! Immutable training configuration
//!
//! Every solver receives its hyperparameters as a validated value at
//! construction time and never changes them afterwards.
//!
//! # Examples
//!
//! ```
//! use ttt_rl::config::{QLearningConfig, ValueIterationConfig};
//!
//! let vi = ValueIterationConfig::default().with_iterations(20);
//! assert!(vi.validate().is_ok());
//!
//! let q = QLearningConfig::default()
//!     .with_learning_rate(0.2)
//!     .with_episodes(10_000)
//!     .with_seed(42);
//! assert!(q.validate().is_ok());
//! ```

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration { message: message() })
    }
}

fn ensure_discount(discount: f64) -> Result<()> {
    ensure((0.0..1.0).contains(&discount), || {
        format!("discount must be in [0, 1), got {discount}")
    })
}

/// Value iteration hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueIterationConfig {
    /// Discount factor γ in [0, 1)
    pub discount: f64,
    /// Number of synchronous sweeps k
    pub iterations: usize,
}

impl ValueIterationConfig {
    pub fn new(discount: f64, iterations: usize) -> Self {
        Self {
            discount,
            iterations,
        }
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the discount is outside [0, 1).
    pub fn validate(&self) -> Result<()> {
        ensure_discount(self.discount)
    }
}

impl Default for ValueIterationConfig {
    fn default() -> Self {
        Self {
            discount: 0.9,
            iterations: 50,
        }
    }
}

/// Q-learning hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Learning rate α in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ in [0, 1)
    pub discount: f64,
    /// Exploration rate ε in [0, 1]
    pub epsilon: f64,
    /// Multiplicative ε decay applied after every episode (1.0 keeps ε fixed)
    pub epsilon_decay: f64,
    /// Floor for the decayed exploration rate
    pub min_epsilon: f64,
    /// Number of training episodes
    pub episodes: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Decay ε by `decay` after every episode, never going below `min_epsilon`.
    pub fn with_epsilon_decay(mut self, decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = decay;
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any rate is out of range.
    pub fn validate(&self) -> Result<()> {
        let Self {
            learning_rate,
            discount,
            epsilon,
            epsilon_decay,
            min_epsilon,
            ..
        } = *self;

        ensure(learning_rate > 0.0 && learning_rate <= 1.0, || {
            format!("learning rate must be in (0, 1], got {learning_rate}")
        })?;
        ensure_discount(discount)?;
        ensure((0.0..=1.0).contains(&epsilon), || {
            format!("epsilon must be in [0, 1], got {epsilon}")
        })?;
        ensure(epsilon_decay > 0.0 && epsilon_decay <= 1.0, || {
            format!("epsilon decay must be in (0, 1], got {epsilon_decay}")
        })?;
        ensure((0.0..=epsilon).contains(&min_epsilon), || {
            format!("min epsilon must be in [0, epsilon={epsilon}], got {min_epsilon}")
        })
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount: 0.9,
            epsilon: 0.2,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            episodes: 50_000,
            seed: None,
        }
    }
}

/// Rewards paid by the Tic-Tac-Toe model and environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Paid when the agent completes a line
    pub win: f64,
    /// Paid when the opponent completes a line
    pub lose: f64,
    /// Paid when the board fills up without a winner
    pub draw: f64,
    /// Paid for every move after which the game continues
    pub living: f64,
}

impl RewardConfig {
    pub fn new(win: f64, lose: f64, draw: f64, living: f64) -> Self {
        Self {
            win,
            lose,
            draw,
            living,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any reward is not finite.
    pub fn validate(&self) -> Result<()> {
        let rewards = [self.win, self.lose, self.draw, self.living];
        ensure(rewards.iter().all(|r| r.is_finite()), || {
            format!("rewards must be finite, got {rewards:?}")
        })
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            win: 10.0,
            lose: -10.0,
            draw: 0.0,
            living: 0.0,
        }
    }
}

/// Complete configuration file for the `ttt-rl` driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub value_iteration: ValueIterationConfig,
    pub q_learning: QLearningConfig,
    pub rewards: RewardConfig,
}

impl SolverConfig {
    /// # Errors
    ///
    /// Returns the first validation error of any section.
    pub fn validate(&self) -> Result<()> {
        self.value_iteration.validate()?;
        self.q_learning.validate()?;
        self.rewards.validate()
    }

    /// Save configuration to a pretty-printed JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create {}", path.as_ref().display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load and validate configuration from a JSON file
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open {}", path.as_ref().display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}
