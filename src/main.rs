use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use rangeshop::{config::Config, db, routes, session::SessionStore, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rangeshop=debug")),
        )
        .init();

    let config = Config::from_env();

    // Provision the lab schema and fixtures when the migrations dir ships
    // alongside the binary. Failures are tolerated: the database container
    // may seed itself, or already be seeded from a previous boot.
    if std::path::Path::new("migrations").exists() {
        if let Err(e) = db::run_migrations(&config).await {
            let msg = e.to_string();
            if msg.contains("already exists") {
                tracing::info!("migration benign: {msg}");
            } else {
                tracing::warn!("migration error: {msg}");
            }
        }
    } else {
        tracing::warn!("migrations folder not found, skipping backend setup");
    }

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        sessions: SessionStore::new(),
    };
    let app = routes::router().with_state(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let term = async {
        if let Ok(mut s) = signal::unix::signal(signal::unix::SignalKind::terminate()) {
            s.recv().await;
        }
    };
    #[cfg(not(unix))]
    let term = std::future::pending::<()>();
    tokio::select! { _ = ctrl_c => {}, _ = term => {} }
}
