//! Input normalization
//!
//! Wheel, keyboard and swipe adapters each turn their raw events into at most
//! one [`Step`] per evaluation. Wheel and keyboard carry their own
//! [`Throttle`], so a burst on one channel never blocks another.

pub mod gesture;
pub mod keyboard;
pub mod throttle;
pub mod wheel;

pub use gesture::{SwipeAdapter, SwipeConfig, SwipeDirection, SwipeRecognizer, TouchPhase};
pub use keyboard::KeyboardAdapter;
pub use throttle::Throttle;
pub use wheel::WheelAdapter;

/// Discrete navigation intent produced by an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advance,
    Retreat,
}

impl Step {
    #[inline]
    pub fn delta(self) -> isize {
        match self {
            Step::Advance => 1,
            Step::Retreat => -1,
        }
    }

    /// Index requested by taking this step from `current`
    #[inline]
    pub fn from_index(self, current: usize) -> isize {
        current as isize + self.delta()
    }
}
