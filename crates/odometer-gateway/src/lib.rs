//! odometer gateway library entry.
//!
//! Wires configuration, the upstream reader, the shared smoother state and
//! the HTTP surface together. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod display;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod upstream;
