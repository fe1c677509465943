//! Fixed-interval sampling gate for high-frequency motion events.

use std::time::{Duration, Instant};

/// Default sampling interval (roughly one 60 Hz frame).
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

/// Rate-limits values to at most one per interval.
///
/// The first value after an idle window passes straight through. Values that
/// arrive inside the window replace each other; the most recent one is handed
/// out by [`Throttle::poll`] once the window closes, so the trailing sample of
/// a burst is never lost.
#[derive(Debug)]
pub struct Throttle<T> {
    interval: Duration,
    last_fired: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Offers a value at `now`. Returns it back when the gate is open.
    pub fn offer(&mut self, now: Instant, value: T) -> Option<T> {
        if self.window_closed(now) {
            self.pending = None;
            self.last_fired = Some(now);
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Releases the pending value if the window has closed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.window_closed(now) {
            self.last_fired = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// Releases the pending value regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drops the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn window_closed(&self, now: Instant) -> bool {
        match self.last_fired {
            None => true,
            Some(fired) => now.saturating_duration_since(fired) >= self.interval,
        }
    }
}

impl<T> Default for Throttle<T> {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
