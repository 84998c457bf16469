use std::time::Duration;

use adlens_server::{ServerConfig, ServerState, app};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("adlens_server=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::parse();
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = ServerState::new(&config);
    spawn_session_purge(state.clone(), config.session_ttl());

    let router = app(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        upload_dir = %config.upload_dir.display(),
        "listening"
    );
    axum::serve(listener, router).await?;
    Ok(())
}

/// Periodically drop idle sessions so memory is released without new uploads.
fn spawn_session_purge(state: ServerState, ttl: Option<Duration>) {
    let Some(ttl) = ttl else {
        return;
    };
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ttl.min(PURGE_INTERVAL));
        loop {
            interval.tick().await;
            match state.sessions.purge_expired() {
                Ok(0) => {}
                Ok(n) => tracing::debug!(purged = n, "Purged expired sessions"),
                Err(e) => tracing::warn!("Session purge failed: {e}"),
            }
        }
    });
}
