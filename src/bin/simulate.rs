#![recursion_limit = "256"]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use siege_ai::config::AppConfig;
use siege_ai::session::LearningSession;
use siege_ai::simulation::Simulator;

/// Let the adaptive attacker play simulated rounds and learn from them.
#[derive(Parser)]
#[command(name = "simulate", about = "Train the siege opponent against the combat model")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "siege.toml")]
    config: PathBuf,

    /// Override number of simulated rounds
    #[arg(long)]
    rounds: Option<u32>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override learning rate
    #[arg(long)]
    lr: Option<f64>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rounds) = cli.rounds {
        config.simulation.rounds = rounds;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(lr) = cli.lr {
        config.estimator.learning_rate = lr;
    }
    config.validate().context("validating overrides")?;

    let mut session = match config.simulation.seed {
        Some(seed) => LearningSession::with_seed(&config, seed),
        None => LearningSession::new(&config),
    };
    let mut simulator = Simulator::new(config.simulation.clone());
    let summary = simulator.run(&mut session).context("running simulation")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Rounds played:        {}", summary.rounds);
        println!("Transitions stored:   {}", summary.transitions);
        println!("Training runs:        {}", summary.training_runs);
        println!("Success rate:         {:.1}%", summary.success_rate * 100.0);
        println!("Recent success rate:  {:.1}%", summary.recent_success_rate * 100.0);
        println!("Recent exploration:   {:.1}%", summary.recent_exploration_share * 100.0);
        println!("Recent weakest-row:   {:.1}%", summary.recent_weakest_row_share * 100.0);
        println!("Recent mean loss:     {:.4}", summary.average_loss);
    }
    Ok(())
}
