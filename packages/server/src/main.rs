// ABOUTME: Peduli server binary wiring config, database, and HTTP routers
// ABOUTME: Serves the oversight API until interrupted, then closes the pool

use anyhow::Result;
use axum::http::Method;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use peduli_api::{
    create_dashboard_router, create_programs_router, create_proposals_router, create_users_router,
    AppState,
};
use peduli_programs::DbState;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "peduli")]
#[command(about = "Peduli - program oversight and financial aggregation server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "SQLite database file (overrides PEDULI_DB_PATH)")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "peduli=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    config.apply_overrides(cli.port, cli.database);

    let db = DbState::init_with_path(config.database_path.clone()).await?;
    let state = AppState::new(db.clone());

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let app = axum::Router::new()
        .nest("/api/dashboard", create_dashboard_router())
        .nest("/api/proposals", create_proposals_router())
        .nest("/api/programs", create_programs_router())
        .nest("/api/users", create_users_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Peduli server listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.shutdown().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
