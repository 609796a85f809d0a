//! ttt-rl CLI - Tabular reinforcement learning for Tic-Tac-Toe
//!
//! This CLI provides a unified interface for:
//! - Solving the game by value iteration against a known opponent model
//! - Learning a policy by Q-learning from simulated games
//! - Evaluating the resulting policy against the same opponent
//!
//! Set `RUST_LOG=debug` to follow sweeps and episodes.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-rl")]
#[command(version, about = "Value iteration and Q-learning for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the game by value iteration
    ValueIteration(ttt_rl::cli::commands::value_iteration::ValueIterationArgs),

    /// Learn a policy by Q-learning
    QLearning(ttt_rl::cli::commands::q_learning::QLearningArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::ValueIteration(args) => ttt_rl::cli::commands::value_iteration::execute(args),
        Commands::QLearning(args) => ttt_rl::cli::commands::q_learning::execute(args),
    }
}
