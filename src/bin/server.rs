use std::sync::Arc;

use fundsim::env_config::{init_logging, init_rayon_threads_lenient, ServerConfig};
use fundsim::server::create_router;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logging();
    init_rayon_threads_lenient();

    let config = ServerConfig::from_env();
    let addr = config.bind_address();
    tracing::info!(
        %addr,
        seed = ?config.render.seed,
        expectation = %config.render.expectation,
        "starting fundsim server"
    );

    let app = create_router(Arc::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server is running on http://{}. Press Ctrl+C to stop.", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
