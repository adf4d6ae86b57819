//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the server from a validated configuration
//! - Bind the listener and begin accepting traffic
//! - Serve until the shutdown coordinator fires
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last (traffic only when ready)

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::EdgeConfig;
use crate::http::EdgeServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build, bind and serve until `shutdown` is triggered.
pub async fn serve(config: EdgeConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let server = EdgeServer::new(config)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
