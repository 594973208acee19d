//! Wire formats.
//!
//! - Upstream: the statistics document we poll (`stats`).
//! - Downstream: the `{"number": N}` body served to the display (`display`).
//!
//! Parsers are panic-free: a malformed document is reported as
//! `OdometerError::MalformedPayload` rather than crashing the request.

pub mod display;
pub mod stats;
