//! HTTP server configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_enabled: true,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: match env::var("SERVER_PORT") {
                Ok(raw) => raw
                    .parse::<u16>()
                    .with_context(|| format!("Invalid SERVER_PORT: {}", raw))?,
                Err(_) => defaults.port,
            },
            cors_enabled: env::var("CORS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .unwrap_or(defaults.cors_enabled),
        })
    }
}
