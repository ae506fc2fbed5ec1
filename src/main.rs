use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use coursework_api::{app, AppConfig, AppState, Database};

#[derive(Parser)]
#[command(name = "coursework-api")]
#[command(about = "Course management API with replica-backed analytics")]
#[command(version)]
struct Cli {
    #[arg(long, default_value = "0.0.0.0", help = "Address to bind")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 5000, help = "Port to listen on")]
    port: u16,

    #[arg(long, help = "Create the course tables on the primary database before serving")]
    init_schema: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so MASTER_DB_URI, JWT_SECRET_KEY, etc. are picked up
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let db = Database::connect_lazy(&config.database)?;
    if cli.init_schema {
        db.init_schema().await.context("failed to initialize schema")?;
    }

    let state = AppState::new(config, db.clone());

    let bind_addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Coursework API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
