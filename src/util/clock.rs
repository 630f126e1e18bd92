use std::{cell::Cell, rc::Rc};

use web_time::Instant;

/// Monotonic millisecond time source used for tween timing.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`web_time::Instant`] (`performance.now()` on WASM).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Host-driven clock. Clones share the same time value, so a render loop
/// can feed frame timestamps in while controllers read them out.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock starting at `start_ms`.
    #[must_use]
    pub fn starting_at(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Set the current time. Values earlier than the current time are
    /// ignored to keep the clock monotonic.
    pub fn set(&self, now_ms: f64) {
        if now_ms >= self.now.get() {
            self.now.set(now_ms);
        }
    }

    /// Move the clock forward by `delta_ms` (negative deltas are ignored).
    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now.set(self.now.get() + delta_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(10.0);
        let reader = clock.clone();
        clock.advance(5.0);
        assert_eq!(reader.now_ms(), 15.0);
    }

    #[test]
    fn manual_clock_is_monotonic() {
        let clock = ManualClock::starting_at(100.0);
        clock.set(50.0);
        assert_eq!(clock.now_ms(), 100.0);
        clock.advance(-20.0);
        assert_eq!(clock.now_ms(), 100.0);
        clock.set(120.0);
        assert_eq!(clock.now_ms(), 120.0);
    }

    #[test]
    fn system_clock_does_not_go_backwards() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
