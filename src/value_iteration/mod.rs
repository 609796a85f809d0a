//! Value iteration
//!
//! Model-based dynamic programming: repeated synchronous Bellman backups
//!
//! V_{n+1}(s) = max_a Σ_{s'} P(s' | s, a) [R(s, a, s') + γ V_n(s')]
//!
//! over every enumerated state, followed by a one-step lookahead against the
//! converged table to pick an action per state.

pub mod solver;
pub mod value_table;

pub use solver::{IterationReport, ValueIterationSolver};
pub use value_table::ValueTable;
