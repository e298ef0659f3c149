//! Server configuration.

use std::time::Duration;

/// Runtime configuration for the paste server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "127.0.0.1:3001")
    pub bind_address: String,

    /// Interval between expiry sweeps
    pub sweep_interval: Duration,

    /// Deadline for any single storage call
    pub store_timeout: Duration,

    /// Maximum accepted HTTP request body in bytes.
    ///
    /// Must leave room for base64 overhead: a 25 MiB attachment arrives as
    /// roughly 34 MiB of JSON.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            sweep_interval: Duration::from_secs(60),
            store_timeout: Duration::from_secs(5),
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}
