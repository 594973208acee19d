use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use odometer_core::error::{OdometerError, Result};
use odometer_core::RawReading;

use crate::config::UpstreamSection;

use super::UpstreamSource;

/// Statistics endpoint polled over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    url: String,
    http: Client,
}

impl HttpUpstream {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OdometerError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self { url: url.into(), http })
    }

    pub fn from_config(cfg: &UpstreamSection) -> Result<Self> {
        Self::new(cfg.url.clone(), cfg.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_body(&self) -> Result<Bytes> {
        let resp = self.http.get(&self.url).send().await.map_err(map_reqwest)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(OdometerError::UpstreamStatus(status.as_u16()));
        }
        resp.bytes().await.map_err(map_reqwest)
    }
}

#[async_trait]
impl UpstreamSource for HttpUpstream {
    async fn fetch_raw_reading(&self) -> Result<RawReading> {
        let body = self.fetch_body().await?;
        RawReading::from_body(&body)
    }
}

fn map_reqwest(e: reqwest::Error) -> OdometerError {
    if e.is_timeout() {
        OdometerError::UpstreamTimeout
    } else {
        OdometerError::UpstreamUnavailable(e.to_string())
    }
}
