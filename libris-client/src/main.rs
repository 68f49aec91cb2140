use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use libris_client::app::{AppConfig, Shell, base_state};
use libris_config::{ConfigLoad, ConfigLoader};
use log::{LevelFilter, info, warn};
use tokio::io::BufReader;

#[derive(Parser, Debug)]
#[command(name = "libris")]
#[command(about = "Terminal client for the Libris circulation service")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Circulation service endpoint (overrides config)
    #[arg(long)]
    server_url: Option<String>,

    /// Run against the built-in demo catalog instead of a server
    #[arg(long, default_value_t = false)]
    offline: bool,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("libris_client", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;
    for warning in warnings {
        warn!("{warning}");
    }

    if let Some(url) = cli.server_url.as_deref() {
        config.server.endpoint = libris_config::util::parse_endpoint(url)
            .context("invalid --server-url")?;
    }
    if cli.offline {
        config.offline = true;
    }
    info!(
        "Configuration from {:?}, overrides: {:?}",
        config.metadata.source, config.metadata.env_overrides
    );

    let app_config = AppConfig::new(config);
    let state = base_state(&app_config).context("failed to start client")?;

    if state.health_check().await {
        info!("Circulation service reachable at {}", app_config.server_url());
    } else {
        eprintln!(
            "Warning: {} is not reachable; commands may fail.",
            app_config.server_url()
        );
    }

    println!("Libris client. Type `help` for commands.");
    let mut shell = Shell::new(state);
    shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("terminal I/O failed")?;
    Ok(())
}
