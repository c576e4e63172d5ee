//! dt CLI
//!
//! Command-line interface for browsing Disruptive Technologies projects,
//! devices and temperature events.

use std::path::PathBuf;

use clap::Parser;
use dt_api::DtApiClient;
use dt_cli::{execute, load_config, resolve_credentials, Command, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "dt")]
#[command(about = "Browse Disruptive Technologies projects, devices and temperature events")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Service account key id (overrides config file)
    #[arg(short, long)]
    username: Option<String>,

    /// Service account secret (discouraged: visible in shell history and the
    /// process list; omit it to use the config file or the prompt)
    #[arg(short, long)]
    password: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}, command={:?}",
        args.config,
        args.log_level,
        args.command
    );

    let config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    let credentials = resolve_credentials(
        &config.credentials,
        args.username,
        args.password,
        |prompt: &str| rpassword::prompt_password(prompt),
    )?;

    let client = DtApiClient::default();
    let output = execute(&client, &credentials, &config, &args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
