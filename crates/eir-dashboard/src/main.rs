//! Eir Dashboard binary entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eir_dashboard::{AppState, DashboardConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eir_dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create configuration
    let mut config = DashboardConfig::default();
    if let Ok(bind) = std::env::var("EIR_BIND") {
        config.bind_address = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid EIR_BIND address '{bind}': {e}"))?;
    }
    if let Ok(results) = std::env::var("EIR_RESULTS") {
        config.results_path = results.into();
    }
    let bind_addr = config.bind_address;

    // Create application state
    let state = Arc::new(AppState::with_config(config));

    // Create the router and start the server
    let app = create_router(state);
    tracing::info!("Starting Eir Dashboard at http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
