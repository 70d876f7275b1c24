use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::error::Result;
use crate::ml::Predictor;

/// Start the API server and run until ctrl-c
pub async fn start_api_server(host: &str, port: u16, predictor: Predictor) -> Result<()> {
    let models_dir = predictor.store().dir().display().to_string();
    let app = create_router(AppState::new(predictor));

    let listener = TcpListener::bind((host, port)).await?;
    info!(
        models = %models_dir,
        "API server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
