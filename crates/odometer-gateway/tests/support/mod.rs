//! Shared fixtures: a scripted upstream, a fake statistics server, and a
//! hand-driven clock.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU16, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};

use odometer_core::error::{OdometerError, Result};
use odometer_core::RawReading;
use odometer_gateway::app_state::Clock;
use odometer_gateway::config::{self, GatewayConfig};
use odometer_gateway::upstream::UpstreamSource;

/// Bytes that reduce to exactly `reading` on the display.
pub fn bytes_for(reading: u64) -> u64 {
    reading * 1_000_000 + 123_456
}

/// Upstream that replays a queue, then repeats `fallback`.
pub struct Scripted {
    queue: Mutex<VecDeque<Result<RawReading>>>,
    fallback: RawReading,
}

impl Scripted {
    pub fn new(fallback: u64) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: RawReading::from_bytes(u128::from(bytes_for(fallback))),
        }
    }

    pub fn push_reading(&self, reading: u64) {
        let r = RawReading::from_bytes(u128::from(bytes_for(reading)));
        self.queue.lock().unwrap().push_back(Ok(r));
    }

    pub fn push_error(&self, e: OdometerError) {
        self.queue.lock().unwrap().push_back(Err(e));
    }
}

#[async_trait]
impl UpstreamSource for Scripted {
    async fn fetch_raw_reading(&self) -> Result<RawReading> {
        self.queue.lock().unwrap().pop_front().unwrap_or(Ok(self.fallback))
    }
}

/// Manually advanced unix-seconds clock.
#[derive(Clone)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub fn at(t: i64) -> Self {
        Self(Arc::new(AtomicI64::new(t)))
    }

    pub fn set(&self, t: i64) {
        self.0.store(t, Ordering::SeqCst);
    }

    pub fn clock(&self) -> Clock {
        let t = Arc::clone(&self.0);
        Arc::new(move || t.load(Ordering::SeqCst))
    }
}

/// Knobs for the fake statistics server.
#[derive(Default)]
pub struct FakeStats {
    pub bytes: AtomicU64,
    /// 0 means 200.
    pub status: AtomicU16,
    pub garbage: AtomicBool,
    pub stall: AtomicBool,
}

async fn web_stats(State(fake): State<Arc<FakeStats>>) -> axum::response::Response {
    if fake.stall.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    let status = fake.status.load(Ordering::SeqCst);
    if status != 0 {
        let code = StatusCode::from_u16(status).unwrap();
        return (code, "upstream says no").into_response();
    }
    if fake.garbage.load(Ordering::SeqCst) {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    let bytes = fake.bytes.load(Ordering::SeqCst);
    let body = format!(
        r#"{{"new":{{"bytes":{bytes},"files":209318008246,"time":"2023-04-22 22:47:02.125357"}},"old":{{"bytes":1,"files":1,"time":"x"}}}}"#
    );
    (StatusCode::OK, [("content-type", "application/json")], body).into_response()
}

/// Start the fake statistics server on an ephemeral port.
pub async fn spawn_fake_stats(fake: Arc<FakeStats>) -> SocketAddr {
    let app = Router::new().route("/web_stats", get(web_stats)).with_state(fake);
    serve(app).await
}

/// Serve a router on 127.0.0.1:0 and return its address.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn config_for(upstream: SocketAddr, policy: &str) -> GatewayConfig {
    let yaml = format!(
        r#"
version: 1
server:
  listen: "127.0.0.1:0"
upstream:
  url: "http://{upstream}/web_stats"
  timeout_ms: 300
smoother:
  initial_scale_factor: 0.1
  on_upstream_error: {policy}
"#
    );
    config::load_from_str(&yaml).unwrap()
}
