//! Offset animation controller
//!
//! Plays the role a CSS `transform` transition plays for a browser container:
//! each new target restarts the animation from the currently visible offset.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
}

#[derive(Debug, Clone)]
pub struct OffsetAnimator {
    animation: Option<ActiveAnimation>,
    duration: Duration,
    easing: EasingType,
    /// Last computed visible offset
    current: f64,
}

impl Default for OffsetAnimator {
    fn default() -> Self {
        Self::new(Duration::ZERO, EasingType::default())
    }
}

impl OffsetAnimator {
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self {
            animation: None,
            duration,
            easing,
            current: 0.0,
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn is_smooth(&self) -> bool {
        !self.duration.is_zero() && self.easing != EasingType::None
    }

    /// Final offset once the running animation (if any) completes
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    /// Last computed visible offset
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Start moving towards `target`, beginning at the visible offset
    pub fn animate_to(&mut self, target: f64, now: Instant) {
        if !self.is_smooth() {
            self.jump_to(target);
            return;
        }

        let from = self.update(now);
        if (from - target).abs() < f64::EPSILON {
            self.animation = None;
            self.current = target;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
        });
    }

    /// Set the offset immediately (no animation)
    pub fn jump_to(&mut self, target: f64) {
        self.animation = None;
        self.current = target;
    }

    /// Advance the animation and return the visible offset at `now`
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, self.duration, now) {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = progress(anim.start, self.duration, now);
                self.current = lerp(anim.from, anim.to, self.easing.apply(t));
            }
        }
        self.current
    }

    /// Drop any animation and return to the untransformed position
    pub fn reset(&mut self) {
        self.animation = None;
        self.current = 0.0;
    }
}
