mod commands;
mod config;
mod logging;


use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feature_toggles::FeatureTogglesModule;
use sea_orm::{ConnectOptions, Database};

use crate::commands::{CheckArgs, SetArgs};
use crate::config::AppConfig;

/// Feature toggles - inspect, update and evaluate toggles
#[derive(Parser)]
#[command(name = "feature-toggles-cli")]
#[command(about = "Inspect, update and evaluate feature toggles")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update a toggle
    Set(SetArgs),
    /// Print a toggle as stored
    Show { feature_key: String },
    /// Evaluate a toggle for a caller; exits with 1 when denied
    Check(CheckArgs),
    /// Print effective configuration (JSON) and exit
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose);

    match cli.command {
        Commands::Set(args) => {
            let api = connect(&config).await?.api();
            println!("{}", commands::set(api.as_ref(), args).await?);
        }
        Commands::Show { feature_key } => {
            let api = connect(&config).await?.api();
            println!("{}", commands::show(api.as_ref(), &feature_key).await?);
        }
        Commands::Check(args) => {
            let api = connect(&config).await?.api();
            let allowed = commands::check(api.as_ref(), &args).await?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            if !allowed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::PrintConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn connect(config: &AppConfig) -> Result<FeatureTogglesModule> {
    let mut options = ConnectOptions::new(config.database.dsn.clone());
    options
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout)
        .sqlx_logging(false);

    tracing::info!("Connecting to toggle database");
    let db = Database::connect(options)
        .await
        .context("failed to connect to the toggle database")?;
    FeatureTogglesModule::init(db, &config.feature_toggles).await
}
