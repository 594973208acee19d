//! Shared application state for the odometer gateway.
//!
//! Holds the one `SmootherState` for the process behind a mutex. The
//! upstream fetch runs outside the lock; reading the clock and advancing run
//! inside it so concurrent requests see a consistent read-modify-write.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

use odometer_core::error::Result;
use odometer_core::{RawReading, SmootherState, Step};

use crate::config::{GatewayConfig, OnUpstreamError};
use crate::obs::metrics::OdometerMetrics;
use crate::upstream::UpstreamSource;

/// Unix-seconds clock. Swappable for tests.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    smoother: Arc<Mutex<SmootherState>>,
    source: Arc<dyn UpstreamSource>,
    metrics: Arc<OdometerMetrics>,
}

struct AppStateInner {
    initial_scale_factor: f64,
    on_upstream_error: OnUpstreamError,
    clock: Clock,
}

impl AppState {
    /// Seed the smoother from one upstream fetch. A failure here is fatal
    /// for the process; the caller gets the error.
    pub async fn bootstrap(cfg: &GatewayConfig, source: Arc<dyn UpstreamSource>) -> Result<Self> {
        Self::bootstrap_with_clock(cfg, source, Arc::new(unix_now)).await
    }

    pub async fn bootstrap_with_clock(
        cfg: &GatewayConfig,
        source: Arc<dyn UpstreamSource>,
        clock: Clock,
    ) -> Result<Self> {
        let metrics = Arc::new(OdometerMetrics::default());
        let first = timed_fetch(source.as_ref(), &metrics).await?;

        let initial_scale_factor = cfg.smoother.initial_scale_factor;
        let state = SmootherState::new(first.value(), clock(), initial_scale_factor);
        metrics.display_value.set(state.last_value);
        tracing::info!(initial = state.last_value, initial_scale_factor, "smoother seeded");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                initial_scale_factor,
                on_upstream_error: cfg.smoother.on_upstream_error,
                clock,
            }),
            smoother: Arc::new(Mutex::new(state)),
            source,
            metrics,
        })
    }

    /// One upstream fetch, recorded in metrics. No retries.
    pub async fn fetch(&self) -> Result<RawReading> {
        timed_fetch(self.source.as_ref(), &self.metrics).await
    }

    /// Feed a reading to the smoother.
    pub async fn advance(&self, reading: RawReading) -> Step {
        let mut s = self.smoother.lock().await;
        let now = (self.inner.clock)();
        let step = s.advance(reading.value(), now, self.inner.initial_scale_factor);
        drop(s);

        self.metrics.smoother_steps.inc(&[("branch", step.branch.as_str())]);
        self.metrics.display_value.set(step.display);
        step
    }

    pub async fn last_value(&self) -> i64 {
        self.smoother.lock().await.last_value
    }

    /// Copy of the current smoother state.
    pub async fn snapshot(&self) -> SmootherState {
        self.smoother.lock().await.clone()
    }

    pub fn on_upstream_error(&self) -> OnUpstreamError {
        self.inner.on_upstream_error
    }

    pub fn metrics(&self) -> Arc<OdometerMetrics> {
        Arc::clone(&self.metrics)
    }
}

async fn timed_fetch(source: &dyn UpstreamSource, metrics: &OdometerMetrics) -> Result<RawReading> {
    let started = Instant::now();
    let res = source.fetch_raw_reading().await;
    metrics.upstream_fetch_duration.observe(&[], started.elapsed());
    match &res {
        Ok(_) => metrics.upstream_fetches.inc(&[("result", "ok")]),
        Err(e) => metrics.upstream_fetches.inc(&[("result", e.client_code().as_str())]),
    }
    res
}
