//! Raw readings: the upstream byte counter reduced to what a 7-digit display
//! can show.

use std::fmt;

use crate::error::Result;
use crate::protocol::stats::WebStats;

/// Bytes per displayed unit (megabytes).
pub const BYTES_PER_UNIT: u128 = 1_000_000;

/// The display has seven digits.
pub const DISPLAY_MODULUS: u128 = 10_000_000;

/// `(bytes / 10^6) mod 10^7`, at most seven decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawReading(i64);

impl RawReading {
    /// Reduce a cumulative byte counter to a reading.
    pub fn from_bytes(bytes: u128) -> Self {
        let units = (bytes / BYTES_PER_UNIT) % DISPLAY_MODULUS;
        // < 10^7, always fits.
        Self(units as i64)
    }

    /// Parse an upstream body and extract `new.bytes`.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let stats = WebStats::from_slice(body)?;
        let reading = Self::from_bytes(stats.new.bytes);
        tracing::debug!(%reading, bytes = %stats.new.bytes, "upstream reading extracted");
        Ok(reading)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RawReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
