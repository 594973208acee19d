//! `GET /`: the number for the display.
//!
//! One upstream fetch per request. On fetch failure the configured policy
//! decides: `fail` answers with the mapped error status, `replay` answers 200
//! with the last displayed value. Neither touches smoother state.

use axum::{extract::State, Json};

use odometer_core::protocol::display::DisplayBody;

use crate::{app_state::AppState, config::OnUpstreamError, error::ApiError};

pub async fn display(State(state): State<AppState>) -> Result<Json<DisplayBody>, ApiError> {
    let metrics = state.metrics();
    match state.fetch().await {
        Ok(reading) => {
            let step = state.advance(reading).await;
            metrics.requests.inc(&[("outcome", "ok")]);
            Ok(Json(DisplayBody::new(step.display)))
        }
        Err(e) => match state.on_upstream_error() {
            OnUpstreamError::Fail => {
                tracing::warn!(error = %e, policy = "fail", "upstream fetch failed");
                metrics.requests.inc(&[("outcome", "failed")]);
                Err(e.into())
            }
            OnUpstreamError::Replay => {
                let last = state.last_value().await;
                tracing::warn!(error = %e, policy = "replay", last, "upstream fetch failed");
                metrics.requests.inc(&[("outcome", "replayed")]);
                Ok(Json(DisplayBody::new(last)))
            }
        },
    }
}
