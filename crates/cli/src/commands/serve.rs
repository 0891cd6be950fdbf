use anyhow::Result;
use coachdb_http::{AppState, create_router};
use std::sync::Arc;

use crate::{get_webhook_key, open_services};

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let services = open_services()?;

    let webhook_key = get_webhook_key();
    if webhook_key.is_none() {
        tracing::warn!("COACHDB_WEBHOOK_KEY not set, staff update webhook disabled");
    }

    let state = Arc::new(AppState::new(services, webhook_key));
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down HTTP server");
}
