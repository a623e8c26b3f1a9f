// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use vreg_node::config::NodeConfig;
use vreg_node::engine::{RegisterEngine, SharedEngine};
use vreg_node::server::build_router;
use vreg_node::telemetry::init_telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    init_telemetry();

    let cfg = match NodeConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    tracing::info!("Initializing vreg node with config: {:?}", cfg);

    let engine = RegisterEngine::new(&cfg);
    let shared_state: SharedEngine = engine.into_shared();

    let app = build_router(shared_state.clone(), cfg.auth_token.clone());

    let addr = cfg.bind_addr;
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
    }

    // Final persist once in-flight requests have drained.
    let engine = shared_state.read().await;
    match engine.persist() {
        Ok(()) => tracing::info!("Register image flushed to {}", engine.image_location()),
        Err(e) => tracing::error!("Final persist failed: {}", e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
