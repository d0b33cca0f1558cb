//! Injectable wall-clock source.
//!
//! The timestamp line is the only non-deterministic part of a synthesized
//! thought. Production code uses [`SystemClock`]; tests and the `--now` flag
//! freeze time with [`FixedClock`].

use chrono::{DateTime, Utc};

/// Rendering used for every timestamp in the thought trace.
pub const UTC_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at a Unix epoch second. Returns `None` when the
    /// value is outside chrono's representable range.
    pub fn at_epoch(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Format an instant as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn format_utc(at: DateTime<Utc>) -> String {
    at.format(UTC_FORMAT).to_string()
}

/// Format a (possibly fractional) epoch value. Fractions are floored to the
/// second; `None` for NaN, infinities and out-of-range values.
pub fn format_epoch(epoch: f64) -> Option<String> {
    if !epoch.is_finite() {
        return None;
    }
    let secs = epoch.floor();
    if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0).map(format_utc)
}
