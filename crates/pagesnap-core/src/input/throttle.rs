//! Leading-edge rate limiter
//!
//! The first call in a quiet period passes and opens a window; calls inside
//! the window are dropped, never queued or replayed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: None,
        }
    }

    /// Claim the window at `now`; returns false while a previous claim is live
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.last_fired {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_passes() {
        let mut throttle = Throttle::new(Duration::from_millis(700));
        assert!(throttle.try_acquire(Instant::now()));
    }

    #[test]
    fn test_calls_inside_window_dropped() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(700));
        assert!(throttle.try_acquire(t0));
        assert!(!throttle.try_acquire(t0 + Duration::from_millis(100)));
        assert!(!throttle.try_acquire(t0 + Duration::from_millis(699)));
        assert!(throttle.try_acquire(t0 + Duration::from_millis(700)));
    }

    #[test]
    fn test_dropped_calls_do_not_extend_window() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(500));
        assert!(throttle.try_acquire(t0));
        assert!(!throttle.try_acquire(t0 + Duration::from_millis(400)));
        assert!(throttle.try_acquire(t0 + Duration::from_millis(500)));
    }
}
