use std::net::SocketAddr;
use std::time::Duration;

use odometer_core::error::{OdometerError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub upstream: UpstreamSection,

    #[serde(default)]
    pub smoother: SmootherSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            upstream: UpstreamSection::default(),
            smoother: SmootherSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OdometerError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.upstream.validate()?;
        self.smoother.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            OdometerError::BadConfig(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl UpstreamSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(OdometerError::BadConfig(
                "upstream.url must start with http:// or https://".into(),
            ));
        }
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(OdometerError::BadConfig(
                "upstream.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// What a request does when the upstream fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnUpstreamError {
    /// Answer with an error status; state untouched.
    #[default]
    Fail,
    /// Answer with the last displayed value unmodified; state untouched.
    Replay,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmootherSection {
    #[serde(default = "default_initial_scale_factor")]
    pub initial_scale_factor: f64,

    #[serde(default)]
    pub on_upstream_error: OnUpstreamError,
}

impl Default for SmootherSection {
    fn default() -> Self {
        Self {
            initial_scale_factor: default_initial_scale_factor(),
            on_upstream_error: OnUpstreamError::default(),
        }
    }
}

impl SmootherSection {
    pub fn validate(&self) -> Result<()> {
        let f = self.initial_scale_factor;
        if !f.is_finite() || f <= 0.0 || f > 1.0 {
            return Err(OdometerError::BadConfig(
                "smoother.initial_scale_factor must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_url() -> String {
    "https://transfer.api.globus.org/v0.10/private/web_stats".into()
}
fn default_timeout_ms() -> u64 {
    5000
}
fn default_initial_scale_factor() -> f64 {
    0.1
}
