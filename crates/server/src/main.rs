use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if !settings.sheets_dir.is_dir() {
        warn!(
            sheets_dir = %settings.sheets_dir.display(),
            "sheets directory does not exist; every build will report an unknown sheet"
        );
    }

    let app = api::build_router(Arc::new(AppState::from_settings(&settings)));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(%addr, sheets_dir = %settings.sheets_dir.display(), "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
