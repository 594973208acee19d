//! Display smoother.
//!
//! The upstream counter updates every few minutes, but the display should
//! tick up on every poll. When the reading has not moved we extrapolate from
//! the last genuine increase, damped by a scale factor that halves on every
//! consecutive stall. When the reading jumps ahead we take it as-is. When it
//! lands below what we already showed (we extrapolated too far) we hold the
//! line and nudge forward by one.
//!
//! The displayed sequence is strictly increasing regardless of input.

/// Which transition `advance` took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Reading equal to the last displayed value; progress was synthesized.
    Stalled,
    /// Reading above the last displayed value; shown as-is.
    Increase,
    /// Reading below the last displayed value; shown `last + 1`.
    Regression,
}

impl Branch {
    pub fn as_str(self) -> &'static str {
        match self {
            Branch::Stalled => "stalled",
            Branch::Increase => "increase",
            Branch::Regression => "regression",
        }
    }
}

/// Outcome of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The value to show.
    pub display: i64,
    pub branch: Branch,
    /// How far `display` moved past the previous displayed value.
    pub increment: i64,
}

/// Long-lived smoother state. One instance per process, mutated once per
/// request.
#[derive(Debug, Clone, PartialEq)]
pub struct SmootherState {
    /// Last displayed value.
    pub last_value: i64,
    /// Unix seconds at which `last_value` was computed.
    pub last_time: i64,
    /// Displayed value just before the most recent genuine increase.
    pub earlier_value: i64,
    pub earlier_time: i64,
    /// Request counter, diagnostics only.
    pub index: u64,
    /// Damping applied to synthesized increments. Always > 0.
    pub scale_factor: f64,
}

impl SmootherState {
    /// Seed from the first reading. The `- 1` offsets give a one-unit-per-second
    /// baseline rate and keep the rate interval non-zero.
    pub fn new(initial: i64, now: i64, initial_scale_factor: f64) -> Self {
        Self {
            last_value: initial,
            last_time: now,
            earlier_value: initial - 1,
            earlier_time: now - 1,
            index: 0,
            scale_factor: initial_scale_factor,
        }
    }

    /// Units per second over the last genuine-increase interval.
    pub fn rate(&self) -> f64 {
        let mut dt = self.last_time - self.earlier_time;
        if dt <= 0 {
            tracing::warn!(
                last_time = self.last_time,
                earlier_time = self.earlier_time,
                "rate interval not positive, using one second"
            );
            dt = 1;
        }
        (self.last_value - self.earlier_value) as f64 / dt as f64
    }

    /// Feed one reading taken at `this_time` (unix seconds) and return what to
    /// display.
    pub fn advance(&mut self, this_value: i64, this_time: i64, initial_scale_factor: f64) -> Step {
        let index = self.index;
        let last_value = self.last_value;

        let (display, branch) = if this_value == last_value {
            let elapsed = (this_time - self.last_time) as f64;
            let raw = elapsed * self.rate() * self.scale_factor;
            // `as` saturates and maps NaN to 0.
            let increment = (raw.trunc() as i64).max(1);
            let shown = this_value + increment;
            tracing::info!(
                index,
                increment,
                display = shown,
                scale_factor = self.scale_factor,
                "no change, extrapolating"
            );
            self.scale_factor = (self.scale_factor / 2.0).max(f64::MIN_POSITIVE);
            (shown, Branch::Stalled)
        } else if this_value > last_value {
            tracing::info!(
                index,
                delta = this_value - last_value,
                display = this_value,
                "increase"
            );
            self.earlier_value = last_value;
            self.earlier_time = self.last_time;
            self.scale_factor = initial_scale_factor;
            (this_value, Branch::Increase)
        } else {
            let shown = last_value + 1;
            tracing::info!(
                index,
                ahead_by = last_value - this_value,
                display = shown,
                "ahead of upstream, nudging by 1"
            );
            (shown, Branch::Regression)
        };

        self.last_value = display;
        self.last_time = this_time;
        self.index += 1;

        Step { display, branch, increment: display - last_value }
    }
}
