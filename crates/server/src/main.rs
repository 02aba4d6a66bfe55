mod engine;
mod session;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scour_common::config::ServerConfig;

use crate::engine::SearchEngine;

/// Keyword search service over a fixed file corpus.
#[derive(Parser, Debug)]
#[command(name = "scour-server")]
struct Args {
    /// Path to the TOML config file. Built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from the config.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scour_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config: ServerConfig = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config: {}", path.display()))?;
            toml::from_str(&raw).context("parsing server config")?
        }
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let engine = Arc::new(SearchEngine::new(&config.corpus));
    let idle_timeout = config.server.idle_timeout_secs.map(Duration::from_secs);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding to {}", config.server.bind))?;
    tracing::info!("listening on {}", config.server.bind);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, addr)) => {
                        tracing::info!("connection established with {addr}");
                        let engine = Arc::clone(&engine);
                        tokio::spawn(session::run(stream, engine, idle_timeout));
                    }
                    Err(e) => {
                        tracing::warn!("failed to accept connection: {e}");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                // Closes the listening socket; in-flight sessions are not
                // drained, matching the original shutdown behaviour.
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
