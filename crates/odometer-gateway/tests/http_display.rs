//! End-to-end: fake statistics server -> reqwest upstream -> router -> client.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod support;

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use odometer_core::protocol::display::DisplayBody;
use odometer_gateway::{app_state::AppState, router, upstream::HttpUpstream};

use support::{bytes_for, config_for, serve, spawn_fake_stats, FakeStats, ManualClock};

struct Harness {
    fake: Arc<FakeStats>,
    clock: ManualClock,
    state: AppState,
    addr: SocketAddr,
    client: reqwest::Client,
}

async fn harness(policy: &str, initial: u64) -> Harness {
    let fake = Arc::new(FakeStats::default());
    fake.bytes.store(bytes_for(initial), Ordering::SeqCst);
    let upstream_addr = spawn_fake_stats(Arc::clone(&fake)).await;

    let cfg = config_for(upstream_addr, policy);
    let upstream = HttpUpstream::from_config(&cfg.upstream).unwrap();
    let clock = ManualClock::at(100);
    let state = AppState::bootstrap_with_clock(&cfg, Arc::new(upstream), clock.clock())
        .await
        .unwrap();
    let addr = serve(router::build_router(state.clone())).await;

    Harness { fake, clock, state, addr, client: reqwest::Client::new() }
}

impl Harness {
    async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(format!("http://{}{}", self.addr, path)).send().await.unwrap()
    }

    async fn number(&self) -> i64 {
        let resp = self.get("/").await;
        assert_eq!(resp.status().as_u16(), 200);
        let ct = resp.headers()["content-type"].to_str().unwrap().to_string();
        assert!(ct.starts_with("application/json"), "content-type {ct}");
        let body: DisplayBody = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
        body.number
    }

    fn upstream(&self, reading: u64) {
        self.fake.bytes.store(bytes_for(reading), Ordering::SeqCst);
    }
}

#[tokio::test]
async fn startup_seeds_from_one_fetch() {
    let h = harness("fail", 5_000_000).await;
    let s = h.state.snapshot().await;
    assert_eq!(s.last_value, 5_000_000);
    assert_eq!(s.last_time, 100);
    assert_eq!(s.earlier_value, s.last_value - 1);
    assert_eq!(s.earlier_time, s.last_time - 1);
    assert_eq!(s.index, 0);
}

#[tokio::test]
async fn stall_increase_regression_over_http() {
    let h = harness("fail", 5_000_000).await;

    h.clock.set(110);
    assert_eq!(h.number().await, 5_000_001);

    h.upstream(5_000_050);
    h.clock.set(120);
    assert_eq!(h.number().await, 5_000_050);

    h.upstream(5_000_040);
    h.clock.set(130);
    assert_eq!(h.number().await, 5_000_051);

    let s = h.state.snapshot().await;
    assert_eq!(s.index, 3);
    assert_eq!(s.earlier_value, 5_000_001);
    assert_eq!(s.earlier_time, 110);
}

#[tokio::test]
async fn upstream_error_status_fails_request() {
    let h = harness("fail", 42).await;
    h.fake.status.store(503, Ordering::SeqCst);

    let resp = h.get("/").await;
    assert_eq!(resp.status().as_u16(), 502);
    let body: serde_json::Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(body["error"], "UPSTREAM_STATUS");

    let s = h.state.snapshot().await;
    assert_eq!(s.index, 0);
    assert_eq!(s.last_value, 42);
}

#[tokio::test]
async fn malformed_body_fails_request() {
    let h = harness("fail", 42).await;
    h.fake.garbage.store(true, Ordering::SeqCst);

    let resp = h.get("/").await;
    assert_eq!(resp.status().as_u16(), 502);
    let body: serde_json::Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(body["error"], "MALFORMED_PAYLOAD");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let h = harness("fail", 42).await;
    h.fake.stall.store(true, Ordering::SeqCst);

    let resp = h.get("/").await;
    assert_eq!(resp.status().as_u16(), 504);
    let body: serde_json::Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(body["error"], "UPSTREAM_TIMEOUT");
}

#[tokio::test]
async fn replay_policy_serves_last_value() {
    let h = harness("replay", 42).await;
    h.clock.set(101);
    let first = h.number().await;
    assert_eq!(first, 43);

    h.fake.status.store(500, Ordering::SeqCst);
    h.clock.set(200);
    assert_eq!(h.number().await, first);
    assert_eq!(h.state.snapshot().await.index, 1);
}

#[tokio::test]
async fn healthz_and_metrics() {
    let h = harness("fail", 7).await;
    h.clock.set(101);
    h.number().await;

    let resp = h.get("/healthz").await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let text = h.get("/metrics").await.text().await.unwrap();
    assert!(text.contains("odometer_requests_total{outcome=\"ok\"} 1"), "{text}");
    assert!(text.contains("odometer_smoother_steps_total{branch=\"stalled\"} 1"), "{text}");
    // startup fetch + one request
    assert!(text.contains("odometer_upstream_fetches_total{result=\"ok\"} 2"), "{text}");
    assert!(text.contains("odometer_display_value 8"), "{text}");
}

#[tokio::test]
async fn startup_fails_when_upstream_is_broken() {
    let fake = Arc::new(FakeStats::default());
    fake.garbage.store(true, Ordering::SeqCst);
    let upstream_addr = spawn_fake_stats(Arc::clone(&fake)).await;
    let cfg = config_for(upstream_addr, "fail");
    let upstream = HttpUpstream::from_config(&cfg.upstream).unwrap();

    let err = AppState::bootstrap(&cfg, Arc::new(upstream))
        .await
        .err()
        .expect("bootstrap must fail");
    assert_eq!(err.client_code().as_str(), "MALFORMED_PAYLOAD");
}
