use anyhow::Result;
use clap::{Parser, Subcommand};
use logion_infrastructure::{ConfigService, LogionPaths};
use std::path::PathBuf;

mod app;
mod commands;
mod helper;
mod logging;

#[derive(Parser)]
#[command(name = "logion-demo")]
#[command(about = "Logion demo - connect, then add files and tokens records", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to secret.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    secret: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `logion_application=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive demo (default)
    Repl,
    /// Write template config.toml and secret.json
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = LogionPaths::new(None);
    let _log_guard = logging::init(&paths, cli.log_level.as_deref())?;

    let config_service = ConfigService::new(&paths, cli.config, cli.secret)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Init => commands::init::run(&config_service)?,
        Commands::Repl => {
            let loaded = config_service.load()?;
            let bootstrap = app::AppBootstrap::build(&paths, loaded).await?;
            commands::repl::run(&bootstrap).await?;
        }
    }

    Ok(())
}
