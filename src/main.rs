//! `decision-engine` command-line front end.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use decision_engine::application::{DecisionEngine, EngineState};
use decision_engine::config::{AppConfig, LogFormat, LoggingConfig};
use decision_engine::domain::decision::DecisionRequest;

#[derive(Parser)]
#[command(name = "decision-engine")]
#[command(version, about = "Multi-factor decision recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend one of the options, or guidance when none are given
    Decide {
        /// The question being decided
        question: String,

        /// Candidate options; two makes a binary decision
        options: Vec<String>,

        /// Session whose profile the decision adapts
        #[arg(long)]
        session: Option<String>,

        /// Decision time in milliseconds since the Unix epoch
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Show the best upcoming day in the next week
    Window {
        /// Start date (YYYY-MM-DD); defaults to today in UTC
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.logging);

    let limits = config.engine.history_limits()?;
    let state = EngineState::from_config(&config.storage, limits);
    let engine = DecisionEngine::new(&config.engine, state)?;

    match cli.command {
        Commands::Decide {
            question,
            options,
            session,
            timestamp,
        } => {
            let mut request = DecisionRequest::new(question, options);
            if let Some(session) = session {
                request = request.with_session(session);
            }
            if let Some(timestamp) = timestamp {
                request = request.with_timestamp(timestamp);
            }

            let result = engine.make_decision(request).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Window { date } => {
            let from = date.unwrap_or_else(|| Utc::now().date_naive());
            let window = engine.optimal_window(from)?;
            println!("{}", serde_json::to_string_pretty(&window)?);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the configured level.
fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .pretty()
            .init(),
    }
}
