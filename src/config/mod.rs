//! Configuration module for the treasury service.
//!
//! Structured configuration loading from environment variables, organized by
//! concern: HTTP server and treasury analytics.

mod server_config;
mod treasury_config;

pub use server_config::ServerEnvConfig;
pub use treasury_config::{TreasuryEnvConfig, parse_horizons};

use anyhow::{Context, Result};
use rust_decimal::Decimal;

/// Main application configuration.
///
/// Aggregates the sub-configs into flat fields for the rest of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // Server (from ServerEnvConfig)
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,

    // Treasury (from TreasuryEnvConfig)
    pub projection_horizons: Vec<u32>,
    pub alert_window_days: i64,
    pub outlier_multiplier: Decimal,
    pub default_redemption_days: u32,
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let treasury = TreasuryEnvConfig::from_env().context("Failed to load treasury config")?;
        Ok(Self::compose(server, treasury))
    }

    fn compose(server: ServerEnvConfig, treasury: TreasuryEnvConfig) -> Self {
        Self {
            host: server.host,
            port: server.port,
            cors_enabled: server.cors_enabled,
            projection_horizons: treasury.projection_horizons,
            alert_window_days: treasury.alert_window_days,
            outlier_multiplier: treasury.outlier_multiplier,
            default_redemption_days: treasury.default_redemption_days,
            seed_demo_data: treasury.seed_demo_data,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::compose(ServerEnvConfig::default(), TreasuryEnvConfig::default())
    }
}
