//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use odometer_core::error::{OdometerError, Result};

pub use schema::{GatewayConfig, OnUpstreamError, ServerSection, SmootherSection, UpstreamSection};

/// Env var naming the YAML config file.
pub const CONFIG_ENV: &str = "ODOMETER_CONFIG";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| OdometerError::BadConfig(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| OdometerError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from `$ODOMETER_CONFIG` when set, built-in defaults otherwise.
pub fn load_from_env() -> Result<GatewayConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(&path),
        Err(_) => {
            let cfg = GatewayConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
