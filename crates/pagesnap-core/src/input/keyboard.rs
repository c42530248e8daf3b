use std::time::{Duration, Instant};

use tracing::trace;

use super::{Step, Throttle};
use crate::host::Key;

/// Arrow-key adapter
///
/// Every keydown claims the throttle window, arrow or not.
#[derive(Debug, Clone)]
pub struct KeyboardAdapter {
    throttle: Throttle,
}

impl KeyboardAdapter {
    pub fn new(window: Duration) -> Self {
        Self {
            throttle: Throttle::new(window),
        }
    }

    pub fn evaluate(&mut self, key: &Key, at: Instant, enabled: bool) -> Option<Step> {
        if !self.throttle.try_acquire(at) {
            trace!(?key, "Keydown throttled");
            return None;
        }
        if !enabled {
            return None;
        }

        match key {
            Key::ArrowDown => Some(Step::Advance),
            Key::ArrowUp => Some(Step::Retreat),
            Key::Other(_) => None,
        }
    }
}
