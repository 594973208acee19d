//! odometer core: upstream payload schema, reading extraction, and the
//! display smoother.
//!
//! This crate owns the state machine that turns a slow, occasionally
//! inconsistent byte counter into a number that only ever climbs. It carries
//! no transport or runtime dependencies so the gateway and tests can drive it
//! with any clock and any source.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed upstream payloads surface as `OdometerError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod reading;
pub mod smoother;

/// Shared result type.
pub use error::{OdometerError, Result};
pub use reading::RawReading;
pub use smoother::{Branch, SmootherState, Step};
