use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::http::mime::MimeTable;

/// Read-only state shared by every connection worker.
#[derive(Debug, Clone)]
pub struct ServerContext {
    /// Canonical absolute document root
    pub doc_root: PathBuf,
    pub mime: MimeTable,
    /// Deadline for receiving each request, re-armed per request
    pub idle_timeout: Duration,
}

impl ServerContext {
    /// Validates `cfg` and builds the context from it.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            doc_root: cfg.validate()?,
            mime: MimeTable::default(),
            idle_timeout: cfg.idle_timeout(),
        })
    }

    pub fn new(doc_root: impl Into<PathBuf>, idle_timeout: Duration) -> Self {
        Self {
            doc_root: doc_root.into(),
            mime: MimeTable::default(),
            idle_timeout,
        }
    }
}
