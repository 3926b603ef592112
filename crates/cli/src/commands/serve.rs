use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Result;

use crownwatch_core::GatewayConfig;
use crownwatch_http::{AppState, create_router};

use crate::init_services;

pub(crate) async fn run(config: &GatewayConfig, port: u16, host: String) -> Result<()> {
    let services = init_services(config).await?;

    let state = Arc::new(AppState {
        images: services.images,
        crowns: services.crowns,
        observations: services.observations,
        ready: AtomicBool::new(false),
    });
    // Initialization is done; open the readiness gate before accepting traffic.
    state.mark_ready();

    let router = create_router(Arc::clone(&state), &config.cors_origins);
    let addr = format!("{host}:{port}");
    tracing::info!(addr = %addr, origins = config.cors_origins.len(), "starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
