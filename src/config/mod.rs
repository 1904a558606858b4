//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod types;

pub use types::{IngestConfig, LoggingConfig, RecordingConfig, ServerConfig};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Consumer-facing server configuration
    pub server: ServerConfig,
    /// Glove ingest configuration
    pub ingest: IngestConfig,
    /// Frame recording configuration
    pub recording: RecordingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            server: ServerConfig {
                listen_addr: "127.0.0.1:8081".to_string(),
                max_connections: 8,
                publish_interval_ms: 10, // 100 Hz push rate
            },
            ingest: IngestConfig {
                bind_addr: "0.0.0.0:4210".to_string(),
                idle_timeout_ms: 2000,
            },
            recording: RecordingConfig {
                output_path: PathBuf::from("glove_data.csv"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .listen_addr
            .parse::<SocketAddr>()
            .context("Invalid listen address")?;

        self.ingest
            .bind_addr
            .parse::<SocketAddr>()
            .context("Invalid ingest bind address")?;

        if self.server.publish_interval_ms == 0 {
            anyhow::bail!("publish_interval_ms must be at least 1");
        }

        if self.ingest.idle_timeout_ms == 0 {
            anyhow::bail!("idle_timeout_ms must be at least 1");
        }

        if self.server.max_connections == 0 {
            anyhow::bail!("max_connections must be at least 1");
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, listen: Option<String>, port: u16) -> Self {
        if let Some(listen_addr) = listen {
            self.server.listen_addr = format!("{}:{}", listen_addr, port);
        } else {
            // Just update port
            if let Ok(mut addr) = self.server.listen_addr.parse::<SocketAddr>() {
                addr.set_port(port);
                self.server.listen_addr = addr.to_string();
            }
        }

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
