//! Q-learning command - Learn from simulated games against an opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::{OpponentArg, derive_seed, load_config, parse_player_token, write_summary};
use crate::{
    adapters::{ProgressObserver, TicTacToe, TicTacToeEnvironment},
    cli::output::{format_number, print_evaluation, print_kv, print_section},
    config::{QLearningConfig, RewardConfig},
    evaluation::{EvaluationResult, evaluate_policy},
    ports::Opponent,
    q_learning::{QLearningReport, QLearningSolver},
};

#[derive(Parser, Debug)]
#[command(about = "Learn a Tic-Tac-Toe policy by Q-learning", allow_negative_numbers = true)]
pub struct QLearningArgs {
    /// JSON configuration file (missing fields use defaults)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Learning rate α in (0, 1]
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ in [0, 1)
    #[arg(long)]
    pub discount: Option<f64>,

    /// Exploration rate ε in [0, 1]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Multiplicative ε decay per episode
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Minimum ε when decaying
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Number of training episodes
    #[arg(long, short = 'g')]
    pub episodes: Option<usize>,

    /// Opponent faced during training and evaluation
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentArg::Random)]
    pub opponent: OpponentArg,

    /// Which token the agent controls (`x` or `o`); the agent always opens
    #[arg(long, default_value = "x")]
    pub agent_player: String,

    /// Number of evaluation games after training (0 to skip)
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub eval_games: usize,

    /// Random seed for reproducibility
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
struct QLearningSummary {
    algorithm: &'static str,
    opponent: OpponentArg,
    agent_player: String,
    config: QLearningConfig,
    rewards: RewardConfig,
    training: QLearningReport,
    states: usize,
    state_action_pairs: usize,
    evaluation: Option<EvaluationResult>,
}

fn resolve_config(base: QLearningConfig, args: &QLearningArgs) -> QLearningConfig {
    let mut config = base;
    if let Some(learning_rate) = args.learning_rate {
        config = config.with_learning_rate(learning_rate);
    }
    if let Some(discount) = args.discount {
        config = config.with_discount(discount);
    }
    if let Some(epsilon) = args.epsilon {
        config = config.with_epsilon(epsilon);
    }
    if args.epsilon_decay.is_some() || args.min_epsilon.is_some() {
        config = config.with_epsilon_decay(
            args.epsilon_decay.unwrap_or(config.epsilon_decay),
            args.min_epsilon.unwrap_or(config.min_epsilon),
        );
    }
    if let Some(episodes) = args.episodes {
        config = config.with_episodes(episodes);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config
}

pub fn execute(args: QLearningArgs) -> Result<()> {
    let file_config = load_config(args.config.as_deref())?;
    let config = resolve_config(file_config.q_learning, &args);
    config.validate()?;

    let agent = parse_player_token(&args.agent_player, "--agent-player")?;
    let domain = TicTacToe::new(agent);
    let rewards = file_config.rewards;

    print_section("Q-Learning");
    print_kv("Opponent", &format!("{:?}", args.opponent).to_lowercase());
    print_kv("Agent", &agent.to_string());
    print_kv("Episodes", &format_number(config.episodes));
    print_kv("Learning rate", &config.learning_rate.to_string());
    print_kv("Discount", &config.discount.to_string());
    print_kv("Epsilon", &config.epsilon.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let environment = TicTacToeEnvironment::new(
        domain,
        args.opponent.build(derive_seed(config.seed, 1)),
        rewards,
    );
    let mut solver = QLearningSolver::new(&domain, environment, config)
        .context("failed to build the state space")?;
    if args.progress {
        solver = solver.with_observer(ProgressObserver::episodes());
    }

    let (policy, report) = solver.train()?;

    print_kv("Steps", &format_number(report.steps));
    print_kv("Mean return", &format!("{:.4}", report.mean_return));
    print_kv("Final epsilon", &format!("{:.4}", report.final_epsilon));
    print_kv("Decisions", &format_number(policy.decided_count()));

    let evaluation = if args.eval_games > 0 {
        let environment = solver.environment_mut();
        environment
            .opponent_mut()
            .set_rng_seed(derive_seed(config.seed, 2).unwrap_or_else(rand::random));
        let result = evaluate_policy(&policy, environment, args.eval_games)?;
        print_evaluation(environment.opponent().name(), &result);
        Some(result)
    } else {
        None
    };

    if let Some(raw) = args.summary.as_deref() {
        let summary = QLearningSummary {
            algorithm: "q-learning",
            opponent: args.opponent,
            agent_player: agent.to_string(),
            config,
            rewards,
            training: report,
            states: solver.space().len(),
            state_action_pairs: solver.q_table().size(),
            evaluation,
        };
        let path = write_summary(raw, "q_learning_summary.json", &summary)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
