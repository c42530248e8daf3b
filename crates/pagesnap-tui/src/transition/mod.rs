//! Animated container offset
//!
//! The controller hands the host a target offset; this module moves the
//! visible offset there over the configured delay using an easing curve.
//!
//! - `easing` - pure curves mapping [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `animation` - the animator combining both
//!
//! ```ignore
//! let mut animator = OffsetAnimator::new(Duration::from_millis(700), EasingType::Ease);
//! animator.animate_to(80.0, Instant::now());
//!
//! // Once per drawn frame
//! let rows = animator.update(Instant::now());
//! ```

pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::OffsetAnimator;
pub use easing::{EasingType, EasingTypeExt};
