//! Emission rate limiting independent of the caller's tick frequency

/// Gates emission to at most `rate_hz` fixes per second.
///
/// The first call ever observed emits. A non-positive rate disables
/// emission entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct RateScheduler {
    rate_hz: f64,
    last_emission: Option<f64>,
}

impl RateScheduler {
    pub fn new(rate_hz: f64) -> Self {
        Self {
            rate_hz,
            last_emission: None,
        }
    }

    /// Decide whether to emit at `now` (seconds); records `now` on success
    pub fn should_emit(&mut self, now: f64) -> bool {
        if !(self.rate_hz > 0.0) {
            return false;
        }

        if let Some(last) = self.last_emission {
            if now - last < 1.0 / self.rate_hz {
                return false;
            }
        }

        self.last_emission = Some(now);
        true
    }

    pub fn rate_hz(&self) -> f64 {
        self.rate_hz
    }

    /// Retune the rate; the last emission time is kept
    pub fn set_rate(&mut self, rate_hz: f64) {
        self.rate_hz = rate_hz;
    }

    pub fn last_emission(&self) -> Option<f64> {
        self.last_emission
    }

    pub fn is_enabled(&self) -> bool {
        self.rate_hz > 0.0
    }

    pub fn reset(&mut self) {
        self.last_emission = None;
    }
}
