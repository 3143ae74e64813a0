//! staticd - serves files from a document root over HTTP/1.1.
//!
//! There are no command-line flags. Configuration comes from the
//! environment, optionally layered over a YAML file:
//!
//! - `LISTEN`: address to listen on (default `127.0.0.1:8080`)
//! - `DOC_ROOT`: directory to serve (default `htdocs`)
//! - `IDLE_TIMEOUT_SECS`: per-request read deadline (default `5`)
//! - `CONFIG`: path to a YAML file with `listen_addr`, `doc_root` and
//!   `idle_timeout_secs` keys
//!
//! ```text
//! LISTEN=0.0.0.0:8080 DOC_ROOT=./htdocs staticd
//! ```

use staticd::config::Config;
use staticd::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    tracing::info!(
        listen_addr = %cfg.listen_addr,
        doc_root = %cfg.doc_root.display(),
        idle_timeout_secs = cfg.idle_timeout_secs,
        "Server configs"
    );

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
