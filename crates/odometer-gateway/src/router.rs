//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, display, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(display::display))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
