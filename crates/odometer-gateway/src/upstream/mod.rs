//! Upstream reader.
//!
//! One GET per call, no retries. Every failure (transport, status, timeout,
//! body shape) comes back as an upstream `OdometerError`; the caller picks the
//! policy.

pub mod http;

use async_trait::async_trait;

use odometer_core::{error::Result, RawReading};

pub use http::HttpUpstream;

/// Source of raw readings. The HTTP implementation is the production one;
/// tests plug in scripted sources.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    async fn fetch_raw_reading(&self) -> Result<RawReading>;
}
