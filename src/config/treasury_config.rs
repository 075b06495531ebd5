//! Treasury analytics configuration parsing from environment variables.

use crate::domain::analytics::DEFAULT_OUTLIER_MULTIPLIER;
use crate::domain::analytics::projection::{DEFAULT_ALERT_WINDOW_DAYS, DEFAULT_HORIZONS};
use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct TreasuryEnvConfig {
    pub projection_horizons: Vec<u32>,
    pub alert_window_days: i64,
    pub outlier_multiplier: Decimal,
    pub default_redemption_days: u32,
    pub seed_demo_data: bool,
}

impl Default for TreasuryEnvConfig {
    fn default() -> Self {
        Self {
            projection_horizons: DEFAULT_HORIZONS.to_vec(),
            alert_window_days: DEFAULT_ALERT_WINDOW_DAYS,
            outlier_multiplier: DEFAULT_OUTLIER_MULTIPLIER,
            default_redemption_days: 30,
            seed_demo_data: true,
        }
    }
}

impl TreasuryEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let projection_horizons = match env::var("PROJECTION_HORIZONS") {
            Ok(raw) => parse_horizons(&raw)?,
            Err(_) => defaults.projection_horizons,
        };

        let alert_window_days = match env::var("ALERT_WINDOW_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("Invalid ALERT_WINDOW_DAYS: {}", raw))?,
            Err(_) => defaults.alert_window_days,
        };
        if alert_window_days < 0 {
            bail!("ALERT_WINDOW_DAYS must not be negative");
        }

        let outlier_multiplier = match env::var("OUTLIER_MULTIPLIER") {
            Ok(raw) => Decimal::from_str(raw.trim())
                .with_context(|| format!("Invalid OUTLIER_MULTIPLIER: {}", raw))?,
            Err(_) => defaults.outlier_multiplier,
        };
        if outlier_multiplier <= Decimal::ZERO {
            bail!("OUTLIER_MULTIPLIER must be positive");
        }

        let default_redemption_days = match env::var("DEFAULT_REDEMPTION_DAYS") {
            Ok(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("Invalid DEFAULT_REDEMPTION_DAYS: {}", raw))?,
            Err(_) => defaults.default_redemption_days,
        };

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(defaults.seed_demo_data);

        Ok(Self {
            projection_horizons,
            alert_window_days,
            outlier_multiplier,
            default_redemption_days,
            seed_demo_data,
        })
    }
}

/// Parse a comma-separated list of day offsets, e.g. "0,1,3,7".
/// The result is sorted and free of duplicates.
pub fn parse_horizons(raw: &str) -> Result<Vec<u32>> {
    let mut horizons = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("Invalid horizon in PROJECTION_HORIZONS: {}", s))
        })
        .collect::<Result<Vec<u32>>>()?;

    if horizons.is_empty() {
        bail!("PROJECTION_HORIZONS must list at least one horizon");
    }
    horizons.sort_unstable();
    horizons.dedup();
    Ok(horizons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_horizons() {
        assert_eq!(parse_horizons("7, 1,0,7").unwrap(), vec![0, 1, 7]);
        assert!(parse_horizons("1,two").is_err());
        assert!(parse_horizons(" , ").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = TreasuryEnvConfig::default();
        assert_eq!(config.projection_horizons, vec![0, 1, 3, 7, 15, 30]);
        assert_eq!(config.alert_window_days, 3);
        assert_eq!(config.default_redemption_days, 30);
    }
}
