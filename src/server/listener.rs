use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, info, info_span, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::ServerContext;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let ctx = Arc::new(ServerContext::from_config(cfg).context("server is not set up correctly")?);
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);
    info!("Serving files from {}", ctx.doc_root.display());

    serve(listener, ctx).await
}

/// Accepts connections forever, giving each its own task.
///
/// A failed accept is logged and does not stop the loop. The loop pauses
/// briefly after one, as errors such as EMFILE tend to repeat.
pub async fn serve(listener: TcpListener, ctx: Arc<ServerContext>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Error accepting connection: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let ctx = ctx.clone();
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, ctx);
                match conn.run().await {
                    Ok(termination) => tracing::debug!(?termination, "connection closed"),
                    Err(e) => tracing::error!("Connection error from {}: {}", peer, e),
                }
            }
            .instrument(info_span!("conn", %peer)),
        );
    }
}
