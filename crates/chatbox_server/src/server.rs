//! Server startup and shutdown.

use crate::{AppState, ServerConfig, create_router};
use chatbox_error::{ChatboxResult, ConfigError, HttpError};
use chatbox_models::{ChatDriver, GeminiClient};
use chatbox_store::{InMemoryTodoStore, NoteCatalog};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// Runs the HTTP server until Ctrl-C.
///
/// Wires a [`GeminiClient`], a seeded [`InMemoryTodoStore`] and the mock
/// [`NoteCatalog`] into the router and binds `bind_addr`.
#[instrument(skip_all, fields(bind_addr = %config.bind_addr(), model = %config.model()))]
pub async fn serve(config: ServerConfig) -> ChatboxResult<()> {
    let driver: Arc<dyn ChatDriver> = Arc::new(GeminiClient::new(config.to_gemini_config()?));
    let state = AppState::new(
        driver,
        Arc::new(InMemoryTodoStore::new()),
        Arc::new(NoteCatalog::mock()),
    )
    .with_relay(config.relay_options());

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .map_err(|e| ConfigError::new(format!("Failed to bind {}: {}", config.bind_addr(), e)))?;
    let local = listener
        .local_addr()
        .map_err(|e| HttpError::new(format!("Failed to read local address: {}", e)))?;

    info!(addr = %local, "Chatbox server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;

    info!("Chatbox server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
