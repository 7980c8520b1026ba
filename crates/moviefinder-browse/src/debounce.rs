//! Search input debounce gate.
//!
//! Collapses bursts of keystrokes into a single stabilized value. The gate
//! never reads a clock itself; callers pass `now` so that event loops and
//! tests drive time explicitly.

use std::time::{Duration, Instant};

/// Default quiet period before a typed query is emitted.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Last-write-wins debounce gate.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    /// Required pause after the last change.
    quiet_period: Duration,
    /// Latest raw value.
    current: String,
    /// Time of the last change, `Some` while an emission is pending.
    changed_at: Option<Instant>,
}

impl DebounceGate {
    /// Creates a gate holding an empty value with nothing pending.
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            current: String::new(),
            changed_at: None,
        }
    }

    /// Returns the configured quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Returns the latest raw value (what the user currently sees typed).
    #[must_use]
    pub fn value(&self) -> &str {
        &self.current
    }

    /// Whether an emission is waiting for its quiet period.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.changed_at.is_some()
    }

    /// Records a new raw value and restarts the quiet period.
    ///
    /// Returns `false` when `value` equals the current one; an unchanged
    /// value does not restart the timer.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) -> bool {
        let value = value.into();
        if value == self.current {
            return false;
        }
        self.current = value;
        self.changed_at = Some(now);
        true
    }

    /// Instant at which the pending value becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.changed_at
            .and_then(|changed_at| changed_at.checked_add(self.quiet_period))
    }

    /// Emits the pending value once the quiet period has elapsed.
    ///
    /// Each pending value is emitted at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let changed_at = self.changed_at?;
        if now.saturating_duration_since(changed_at) < self.quiet_period {
            return None;
        }
        self.changed_at = None;
        Some(self.current.clone())
    }

    /// Emits the pending value now, skipping the rest of the quiet period.
    pub fn flush(&mut self) -> Option<String> {
        self.changed_at.take()?;
        Some(self.current.clone())
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
