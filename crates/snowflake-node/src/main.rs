//! # Snowflake Node
//!
//! Scene engine binary with API server.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snowflake_node::{create_router, AppState, NodeConfig};

/// Command-line arguments for snowflake-node
#[derive(Parser, Debug)]
#[command(name = "snowflake-node")]
#[command(about = "Scene card triage and drafting service")]
#[command(version)]
struct Args {
    /// Address to listen on (overrides the config file)
    #[arg(short, long, env = "SNOWFLAKE_BIND")]
    bind: Option<SocketAddr>,

    /// Path to a TOML config file
    #[arg(short, long, env = "SNOWFLAKE_CONFIG")]
    config: Option<PathBuf>,
}

/// Run the node server.
pub async fn run_server(config: NodeConfig) -> Result<()> {
    info!("🚀 Snowflake Node starting...");

    let state = AppState::new(config.triage);
    let app = create_router(state);

    info!("🌐 Listening on http://{}", config.bind);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snowflake_node=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = NodeConfig::resolve(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    if let Some(path) = &args.config {
        info!("Config: {}", path.display());
    }

    run_server(config).await
}
