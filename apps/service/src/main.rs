use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use logger::init_tracing;
use tokio_util::sync::CancellationToken;
use tracing::info;

use torwatch::{Config, Orchestrator, shutdown};

#[derive(Debug, Parser)]
#[command(version, about = "Probe a site through a SOCKS5 proxy and report to Telegram")]
struct Cli {
    /// Config file, defaults to $XDG_CONFIG_HOME/torwatch/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the proxy, then probe on schedule until interrupted
    Run,
    /// Only verify that the proxy path works
    Check,
    /// Verify the proxy, probe once, notify, and exit
    Probe,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Arc::new(Config::load(cli.config.as_ref()).context("failed to load configuration")?);

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let token = CancellationToken::new();
            tokio::spawn(shutdown::wait_for_signal(token.clone()));
            Orchestrator::new(config).run(token).await?;
        }
        Command::Check => Orchestrator::new(config).verify().await?,
        Command::Probe => {
            if Orchestrator::new(config).probe_once().await?.is_none() {
                bail!("probe skipped: could not build a proxied client");
            }
        }
        Command::Config => print!("{config}"),
    }

    info!("Exiting");
    Ok(())
}
