//! `clap`-derived command line surface for the `graphfs-mount` binary
//! (§10.4). Parsed flags take precedence over an optional config file,
//! which in turn takes precedence over [`crate::config`]'s built-in
//! defaults.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{BackendKind, Config, NEO4J_PASSWORD_ENV};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BackendArg {
    Neo4j,
    Memory,
}

/// A FUSE filesystem that projects a graph of tagged files as a directory tree.
#[derive(Debug, Parser)]
#[command(name = "graphfs-mount", version, about)]
pub struct Cli {
    /// Directory to mount the filesystem at.
    pub mountpoint: Option<PathBuf>,

    /// Path to a TOML config file (§10.3).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Which graph backend to use.
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    #[arg(long)]
    pub neo4j_uri: Option<String>,

    #[arg(long)]
    pub neo4j_user: Option<String>,

    #[arg(long)]
    pub neo4j_password: Option<String>,

    /// Increase log verbosity; repeat for more (e.g. `-vv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Merges this CLI invocation over an optional config file and the
    /// built-in defaults, CLI taking precedence (§10.3).
    pub fn resolve(self) -> Result<Config, String> {
        let file_config = match &self.config {
            Some(path) => Some(crate::config::load_file(path)?),
            None => None,
        };

        let mountpoint = self
            .mountpoint
            .or_else(|| file_config.as_ref().map(|c| c.mountpoint.clone()))
            .ok_or_else(|| "a mountpoint is required (positional argument or config file)".to_string())?;

        let backend = self.resolve_backend(file_config.as_ref())?;

        let log_filter = if self.verbose > 0 {
            match self.verbose {
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            }
        } else {
            file_config.map(|c| c.log_filter).unwrap_or_else(|| "info".to_string())
        };

        Ok(Config { mountpoint, backend, log_filter })
    }

    fn resolve_backend(&self, file_config: Option<&Config>) -> Result<BackendKind, String> {
        if let Some(arg) = self.backend {
            return Ok(match arg {
                BackendArg::Memory => BackendKind::InMemory,
                BackendArg::Neo4j => BackendKind::Neo4j {
                    uri: self.neo4j_uri.clone().ok_or("--neo4j-uri is required for --backend neo4j")?,
                    user: self
                        .neo4j_user
                        .clone()
                        .ok_or("--neo4j-user is required for --backend neo4j")?,
                    password: self
                        .neo4j_password
                        .clone()
                        .or_else(|| std::env::var(NEO4J_PASSWORD_ENV).ok()),
                },
            });
        }

        if let Some(cfg) = file_config {
            return Ok(cfg.backend.clone());
        }

        Ok(BackendKind::InMemory)
    }
}
