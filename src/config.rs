use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
const DEFAULT_DOC_ROOT: &str = "htdocs";
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 5;

/// Server configuration.
///
/// Built from defaults, an optional YAML file named by `CONFIG`, and the
/// `LISTEN`, `DOC_ROOT` and `IDLE_TIMEOUT_SECS` environment variables, in
/// increasing order of precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_doc_root")]
    pub doc_root: PathBuf,

    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_doc_root() -> PathBuf {
    PathBuf::from(DEFAULT_DOC_ROOT)
}

fn default_idle_timeout_secs() -> u64 {
    DEFAULT_IDLE_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            doc_root: default_doc_root(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads the configuration using `lookup` to read variables.
    pub fn load_from<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(listen_addr) = lookup("LISTEN") {
            cfg.listen_addr = listen_addr;
        }
        if let Some(doc_root) = lookup("DOC_ROOT") {
            cfg.doc_root = PathBuf::from(doc_root);
        }
        if let Some(secs) = lookup("IDLE_TIMEOUT_SECS") {
            cfg.idle_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid IDLE_TIMEOUT_SECS: {:?}", secs))?;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Checks that the document root is an existing directory.
    ///
    /// Returns the canonical absolute path of the document root.
    pub fn validate(&self) -> anyhow::Result<PathBuf> {
        let meta = std::fs::metadata(&self.doc_root).with_context(|| {
            format!("doc_root does not exist: {}", self.doc_root.display())
        })?;
        if !meta.is_dir() {
            bail!("doc_root is not a directory: {}", self.doc_root.display());
        }
        if self.idle_timeout_secs == 0 {
            bail!("idle_timeout_secs must be positive");
        }
        self.doc_root
            .canonicalize()
            .with_context(|| format!("cannot resolve doc_root {}", self.doc_root.display()))
    }
}
