//! Vertical swipe classification
//!
//! [`SwipeRecognizer`] watches one pointer stream and reports a swipe when a
//! gesture ends having travelled far enough, fast enough. [`SwipeAdapter`]
//! maps the result to a [`Step`].

use std::time::Instant;

use tracing::trace;

use super::Step;

/// Default travel, in host distance units
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;
/// Default speed, in host distance units per millisecond
pub const DEFAULT_SWIPE_VELOCITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub threshold: f64,
    pub velocity_threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SWIPE_THRESHOLD,
            velocity_threshold: DEFAULT_SWIPE_VELOCITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy)]
struct TrackedTouch {
    start_y: f64,
    start_at: Instant,
    last_y: f64,
}

/// Classifies a touch stream into up/down swipes
#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    touch: Option<TrackedTouch>,
    destroyed: bool,
}

impl SwipeRecognizer {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            touch: None,
            destroyed: false,
        }
    }

    pub fn config(&self) -> SwipeConfig {
        self.config
    }

    /// Feed one touch sample; returns a direction when a swipe completes
    pub fn feed(&mut self, phase: TouchPhase, y: f64, at: Instant) -> Option<SwipeDirection> {
        if self.destroyed {
            return None;
        }

        match phase {
            TouchPhase::Start => {
                self.touch = Some(TrackedTouch {
                    start_y: y,
                    start_at: at,
                    last_y: y,
                });
                None
            }
            TouchPhase::Move => {
                if let Some(touch) = self.touch.as_mut() {
                    touch.last_y = y;
                }
                None
            }
            TouchPhase::Cancel => {
                self.touch = None;
                None
            }
            TouchPhase::End => {
                let mut touch = self.touch.take()?;
                touch.last_y = y;
                self.classify(touch, at)
            }
        }
    }

    fn classify(&self, touch: TrackedTouch, end: Instant) -> Option<SwipeDirection> {
        let travel = touch.last_y - touch.start_y;
        let elapsed_ms = end.saturating_duration_since(touch.start_at).as_secs_f64() * 1000.0;
        let velocity = if elapsed_ms > 0.0 {
            travel.abs() / elapsed_ms
        } else {
            f64::INFINITY
        };

        if travel.abs() < self.config.threshold || velocity < self.config.velocity_threshold {
            trace!(travel, velocity, "Touch ended without a swipe");
            return None;
        }

        // Screen y grows downwards, so a finger moving up has negative travel
        Some(if travel < 0.0 { SwipeDirection::Up } else { SwipeDirection::Down })
    }

    /// Release the recognizer; later samples are ignored
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.touch = None;
    }
}

/// Swipe input for the controller, present only while bound and enabled
#[derive(Debug, Default)]
pub struct SwipeAdapter {
    recognizer: Option<SwipeRecognizer>,
}

impl SwipeAdapter {
    pub fn attach(&mut self, recognizer: SwipeRecognizer) {
        self.recognizer = Some(recognizer);
    }

    /// Destroy and drop the recognizer, if any
    pub fn release(&mut self) {
        if let Some(mut recognizer) = self.recognizer.take() {
            recognizer.destroy();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.recognizer.is_some()
    }

    /// A swipe up reveals the next section, a swipe down the previous one
    pub fn evaluate(&mut self, phase: TouchPhase, y: f64, at: Instant) -> Option<Step> {
        match self.recognizer.as_mut()?.feed(phase, y, at)? {
            SwipeDirection::Up => Some(Step::Advance),
            SwipeDirection::Down => Some(Step::Retreat),
        }
    }
}
