use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::Parser;
use lightbnb::{AppState, SharedState, api, config::AppConfig, db};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// PostgreSQL connection URL
    #[arg(long, value_name = "URL", env = "DATABASE_URL")]
    database_url: String,
    /// Listen address for the HTTP server
    #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
    /// Row cap for listings when a request gives no limit
    #[arg(long, value_name = "N", default_value_t = 10)]
    default_limit: i64,
    /// Maximum number of pooled database connections
    #[arg(long, value_name = "N", default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = build_app_config(&cli)?;
    let state = init_shared_state(&cli, config).await?;

    let app = api::create_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind to {}", cli.listen))?;

    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    Ok(())
}

async fn init_shared_state(cli: &Cli, config: AppConfig) -> Result<SharedState> {
    let db = db::init_db(&cli.database_url, cli.max_connections)
        .await
        .context("failed to connect to database")?;
    info!("database ready");

    Ok(Arc::new(AppState { config, db }))
}

fn build_app_config(cli: &Cli) -> Result<AppConfig> {
    if cli.default_limit < 1 {
        bail!("--default-limit must be a positive integer");
    }
    if cli.max_connections == 0 {
        bail!("--max-connections must be at least 1");
    }

    Ok(AppConfig {
        default_limit: cli.default_limit,
    })
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to install CTRL+C handler: {err}");
    }
    info!("shutdown signal received");
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
