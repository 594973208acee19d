//! Top-level facade crate for odometer.
//!
//! Re-exports the smoothing core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use odometer_core::*;
}

pub mod gateway {
    pub use odometer_gateway::*;
}
