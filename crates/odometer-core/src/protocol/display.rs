//! Body served to the physical display.

use serde::{Deserialize, Serialize};

/// `{"number": <integer>}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBody {
    pub number: i64,
}

impl DisplayBody {
    pub fn new(number: i64) -> Self {
        Self { number }
    }
}
