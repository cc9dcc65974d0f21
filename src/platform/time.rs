//! Clocks
//!
//! The simulation never reads time itself. Hosts hand it a [`Clock`] with two
//! readings: a monotonic one for tick pacing, turbo and bonus timers, and a
//! wall one for stamping score records.

use std::cell::Cell;
use std::rc::Rc;

/// Time source supplied by the host
pub trait Clock {
    /// Monotonic milliseconds from an arbitrary origin
    fn now_ms(&self) -> f64;
    /// Milliseconds since the Unix epoch
    fn unix_ms(&self) -> f64;
}

/// Hand-driven clock for tests and headless runs.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to a [`crate::Game`].
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
    epoch_ms: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose wall reading starts at `epoch_ms`
    pub fn with_epoch(epoch_ms: f64) -> Self {
        Self {
            now: Rc::default(),
            epoch_ms,
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn unix_ms(&self) -> f64 {
        self.epoch_ms + self.now.get()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::SystemClock;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use super::Clock;

    /// Real time: `Instant` for pacing, `SystemTime` for stamps
    #[derive(Debug, Clone, Copy)]
    pub struct SystemClock {
        origin: Instant,
    }

    impl SystemClock {
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

        fn unix_ms(&self) -> f64 {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64() * 1000.0)
                .unwrap_or(0.0)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserClock;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Clock;

    /// `performance.now()` for pacing, `Date.now()` for stamps
    #[derive(Debug, Clone, Default)]
    pub struct BrowserClock;

    impl Clock for BrowserClock {
        fn now_ms(&self) -> f64 {
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now)
        }

        fn unix_ms(&self) -> f64 {
            js_sys::Date::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::with_epoch(1_000_000.0);
        let handle = clock.clone();
        handle.advance(250.0);
        assert_eq!(clock.now_ms(), 250.0);
        assert_eq!(clock.unix_ms(), 1_000_250.0);
        handle.set(10.0);
        assert_eq!(clock.now_ms(), 10.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(clock.unix_ms() > 1.5e12);
    }
}
