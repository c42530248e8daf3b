use std::time::{Duration, Instant};

use tracing::trace;

use super::{Step, Throttle};
use crate::host::ScrollMetrics;

/// Turns wheel deltas into section steps
///
/// A step is only produced when the current section has nothing left to
/// scroll in the wheel's direction; otherwise the section keeps the event.
#[derive(Debug, Clone)]
pub struct WheelAdapter {
    throttle: Throttle,
}

impl WheelAdapter {
    pub fn new(window: Duration) -> Self {
        Self {
            throttle: Throttle::new(window),
        }
    }

    /// Evaluate one wheel event
    ///
    /// `metrics` is only queried when the event survives the throttle and
    /// the controller is enabled.
    pub fn evaluate<F>(
        &mut self,
        delta_y: f64,
        at: Instant,
        enabled: bool,
        metrics: F,
    ) -> Option<Step>
    where
        F: FnOnce() -> ScrollMetrics,
    {
        if !self.throttle.try_acquire(at) {
            trace!(delta_y, "Wheel event throttled");
            return None;
        }
        if !enabled || delta_y == 0.0 {
            return None;
        }
        if !metrics().at_boundary(delta_y) {
            trace!(delta_y, "Section still scrollable, leaving wheel event to host");
            return None;
        }

        Some(if delta_y > 0.0 { Step::Advance } else { Step::Retreat })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrollable(top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: top,
            scroll_height: 2000.0,
            client_height: 800.0,
        }
    }

    #[test]
    fn test_direction_mapping() {
        let t0 = Instant::now();
        let mut wheel = WheelAdapter::new(Duration::from_millis(700));
        assert_eq!(
            wheel.evaluate(120.0, t0, true, || ScrollMetrics::fitting(800.0)),
            Some(Step::Advance)
        );
        assert_eq!(
            wheel.evaluate(-120.0, t0 + Duration::from_millis(700), true, || {
                ScrollMetrics::fitting(800.0)
            }),
            Some(Step::Retreat)
        );
    }

    #[test]
    fn test_not_at_boundary_passes_through() {
        let t0 = Instant::now();
        let mut wheel = WheelAdapter::new(Duration::from_millis(700));
        assert_eq!(wheel.evaluate(50.0, t0, true, || scrollable(300.0)), None);
    }

    #[test]
    fn test_bottom_boundary_advances() {
        let mut wheel = WheelAdapter::new(Duration::from_millis(700));
        assert_eq!(
            wheel.evaluate(50.0, Instant::now(), true, || scrollable(1200.0)),
            Some(Step::Advance)
        );
    }

    #[test]
    fn test_throttle_consumed_even_when_disabled() {
        let t0 = Instant::now();
        let mut wheel = WheelAdapter::new(Duration::from_millis(700));
        assert_eq!(
            wheel.evaluate(50.0, t0, false, || ScrollMetrics::fitting(800.0)),
            None
        );
        assert_eq!(
            wheel.evaluate(50.0, t0 + Duration::from_millis(10), true, || {
                ScrollMetrics::fitting(800.0)
            }),
            None
        );
    }

    #[test]
    fn test_metrics_skipped_when_throttled() {
        let t0 = Instant::now();
        let mut wheel = WheelAdapter::new(Duration::from_millis(700));
        wheel.evaluate(50.0, t0, true, || ScrollMetrics::fitting(800.0));
        let result = wheel.evaluate(50.0, t0 + Duration::from_millis(1), true, || {
            panic!("metrics queried for a throttled event")
        });
        assert_eq!(result, None);
    }
}
