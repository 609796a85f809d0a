//! Value iteration command - Solve the game against a known opponent model

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::{OpponentArg, derive_seed, load_config, parse_player_token, write_summary};
use crate::{
    adapters::{ProgressObserver, TicTacToe, TicTacToeEnvironment, TicTacToeMdp},
    cli::output::{format_number, print_evaluation, print_kv, print_section},
    config::{RewardConfig, ValueIterationConfig},
    evaluation::{EvaluationResult, evaluate_policy},
    ports::Opponent,
    value_iteration::ValueIterationSolver,
};

#[derive(Parser, Debug)]
#[command(about = "Solve Tic-Tac-Toe by value iteration", allow_negative_numbers = true)]
pub struct ValueIterationArgs {
    /// JSON configuration file (missing fields use defaults)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Discount factor γ in [0, 1)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Number of synchronous sweeps
    #[arg(long, short = 'k')]
    pub iterations: Option<usize>,

    /// Opponent modelled during planning and faced during evaluation
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentArg::Random)]
    pub opponent: OpponentArg,

    /// Which token the agent controls (`x` or `o`); the agent always opens
    #[arg(long, default_value = "x")]
    pub agent_player: String,

    /// Number of evaluation games after solving (0 to skip)
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub eval_games: usize,

    /// Random seed for the evaluation opponent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,
}

#[derive(Debug, Serialize)]
struct ValueIterationSummary {
    algorithm: &'static str,
    opponent: OpponentArg,
    agent_player: String,
    config: ValueIterationConfig,
    rewards: RewardConfig,
    states: usize,
    terminal_states: usize,
    residuals: Vec<f64>,
    initial_value: f64,
    evaluation: Option<EvaluationResult>,
    seed: Option<u64>,
}

pub fn execute(args: ValueIterationArgs) -> Result<()> {
    let file_config = load_config(args.config.as_deref())?;
    let mut config = file_config.value_iteration;
    if let Some(discount) = args.discount {
        config = config.with_discount(discount);
    }
    if let Some(iterations) = args.iterations {
        config = config.with_iterations(iterations);
    }
    config.validate()?;

    let agent = parse_player_token(&args.agent_player, "--agent-player")?;
    let domain = TicTacToe::new(agent);
    let rewards = file_config.rewards;

    print_section("Value Iteration");
    print_kv("Opponent", &format!("{:?}", args.opponent).to_lowercase());
    print_kv("Agent", &agent.to_string());
    print_kv("Discount", &config.discount.to_string());
    print_kv("Sweeps", &format_number(config.iterations));

    let mdp = TicTacToeMdp::new(domain, args.opponent.build(args.seed), rewards);
    let mut solver =
        ValueIterationSolver::new(&mdp, config).context("failed to build the state space")?;
    if args.progress {
        solver = solver.with_observer(ProgressObserver::sweeps());
    }

    let report = solver.iterate()?;
    let policy = solver.extract_policy()?;
    let initial_value = solver.value_of(&domain.initial_state())?;

    print_kv("States", &format_number(solver.space().len()));
    print_kv("Decisions", &format_number(policy.decided_count()));
    if let Some(residual) = report.final_residual() {
        print_kv("Final residual", &format!("{residual:.8}"));
    }
    print_kv("V(start)", &format!("{initial_value:.4}"));

    let evaluation = if args.eval_games > 0 {
        let opponent = args.opponent.build(derive_seed(args.seed, 1));
        let mut environment = TicTacToeEnvironment::new(domain, opponent, rewards);
        let result = evaluate_policy(&policy, &mut environment, args.eval_games)?;
        print_evaluation(environment.opponent().name(), &result);
        Some(result)
    } else {
        None
    };

    if let Some(raw) = args.summary.as_deref() {
        let summary = ValueIterationSummary {
            algorithm: "value-iteration",
            opponent: args.opponent,
            agent_player: agent.to_string(),
            config,
            rewards,
            states: solver.space().len(),
            terminal_states: solver.space().terminal_count(),
            residuals: report.residuals,
            initial_value,
            evaluation,
            seed: args.seed,
        };
        let path = write_summary(raw, "value_iteration_summary.json", &summary)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
