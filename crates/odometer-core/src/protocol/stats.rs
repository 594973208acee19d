//! Upstream statistics document.
//!
//! Shape:
//! ```json
//! {
//!   "new": { "bytes": 1955402227052862012, "files": 209318008246, "time": "2023-04-22 22:47:02.125357" },
//!   "old": { "bytes": 1955398391739215761, "files": 209317930020, "time": "2023-04-22 22:42:01.610209" }
//! }
//! ```
//! Only `new.bytes` is consumed. The counter can exceed 2^53, so it is read
//! straight into an integer and never passes through `f64`.

use serde::Deserialize;

use crate::error::{OdometerError, Result};

/// Top-level upstream document. Everything besides `new.bytes` (including
/// `old`, `files`, `time`) is skipped unread, whatever its shape.
#[derive(Debug, Deserialize)]
pub struct WebStats {
    pub new: Snapshot,
}

/// Latest sample of the transfer counters.
#[derive(Debug, Deserialize)]
pub struct Snapshot {
    /// Cumulative bytes transferred.
    pub bytes: u128,
}

impl WebStats {
    /// Parse a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| OdometerError::MalformedPayload(e.to_string()))
    }
}
