//! CLI infrastructure for the `ttt-rl` driver
//!
//! This module provides the command-line interface for solving Tic-Tac-Toe
//! with value iteration or Q-learning and evaluating the resulting policy.

pub mod commands;
pub mod output;
