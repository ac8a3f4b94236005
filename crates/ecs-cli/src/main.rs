use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "ecs-agent")]
#[command(about = "Run ECS tasks on a schedule and record their outcome", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/ecs-agent/agent.yaml)
    #[arg(short, long, global = true, env = "ECS_AGENT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the task definition, run one task and emit its event
    Check {
        /// Stop waiting for the task after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Validate the agent options
    Validate,

    /// Report whether the agent is working
    Working {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show recent events
    Events {
        /// Number of events to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Describe the agent, its events and default options
    Describe,

    /// Show or initialise the settings file
    Config {
        /// Print the settings file path
        #[arg(long)]
        path: bool,

        /// Write a sample settings file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Commands::Check { timeout } => {
            let settings = commands::load_settings(config_path.as_deref())?;
            commands::check::run(&settings, timeout).await?;
        }
        Commands::Validate => {
            let settings = commands::load_settings(config_path.as_deref())?;
            commands::validate::run(&settings)?;
        }
        Commands::Working { json } => {
            let settings = commands::load_settings(config_path.as_deref())?;
            commands::working::run(&settings, json)?;
        }
        Commands::Events { limit } => {
            let settings = commands::load_settings(config_path.as_deref())?;
            commands::events::run(&settings, limit)?;
        }
        Commands::Describe => commands::describe::run()?,
        Commands::Config { path, init } => {
            commands::config::run(config_path.as_deref(), path, init)?;
        }
    }

    Ok(())
}
