//! Server command handler.

use chatbox_error::ChatboxResult;
use chatbox_server::{ServerConfig, serve};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Handle the `serve` command
#[instrument(skip_all, fields(config = ?config_path, bind = ?bind))]
pub async fn handle_serve_command(
    config_path: Option<PathBuf>,
    bind: Option<String>,
) -> ChatboxResult<()> {
    let mut config = ServerConfig::load(config_path.as_deref())?;
    if let Some(bind) = bind {
        config = config.with_bind_addr(bind);
    }

    info!(
        bind_addr = %config.bind_addr(),
        model = %config.model(),
        "Starting chatbox server. Press Ctrl+C to stop."
    );
    serve(config).await
}
