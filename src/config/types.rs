//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Consumer-facing server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on for consumer connections (e.g., "127.0.0.1:8081")
    pub listen_addr: String,

    /// Maximum number of concurrent consumer connections
    pub max_connections: usize,

    /// Milliseconds between state pushes to each consumer
    #[serde(default = "default_publish_interval_ms")]
    pub publish_interval_ms: u64,
}

fn default_publish_interval_ms() -> u64 {
    10
}

/// Glove ingest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// UDP address to receive glove datagrams on (e.g., "0.0.0.0:4210")
    pub bind_addr: String,

    /// Milliseconds of silence after which the stream counts as disconnected
    /// and the calibration reference is cleared
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

fn default_idle_timeout_ms() -> u64 {
    2000
}

/// Frame recording configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// CSV file written while recording is active
    pub output_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    pub level: String,
}
