//! Typed configuration layer (§10.3).
//!
//! Precedence is CLI flag > config file > built-in default, assembled by
//! [`crate::cli`] and consumed by the binary entry point. Kept separate from
//! `cli` so the shape of "what this filesystem needs to run" doesn't depend
//! on how a given invocation supplied it.

use std::path::PathBuf;

use serde::Deserialize;

/// Which [`crate::graph::GraphGateway`] implementation to construct.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendKind {
    Neo4j {
        uri: String,
        user: String,
        #[serde(default)]
        password: Option<String>,
    },
    InMemory,
}

/// Fully resolved configuration for one run of the `graphfs-mount` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mountpoint: PathBuf,
    pub backend: BackendKind,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Environment variable holding the Neo4j password, checked when a config
/// file or CLI invocation omits it rather than committing a secret to disk.
pub const NEO4J_PASSWORD_ENV: &str = "GRAPHFS_NEO4J_PASSWORD";

/// Parses a TOML config file at `path` into a [`Config`].
pub fn load_file(path: &std::path::Path) -> Result<Config, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("reading {path:?}: {e}"))?;
    toml::from_str(&text).map_err(|e| format!("parsing {path:?}: {e}"))
}
