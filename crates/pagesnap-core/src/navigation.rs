//! Index resolution and the single writer of the current position

use serde::Serialize;
use tracing::{debug, trace};

use crate::hooks::Hooks;
use crate::host::Viewport;
use crate::state::{NavigationState, Phase};

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    /// The index changed and a commit was scheduled
    Moved { from: usize, to: usize },
    /// The request resolved to the current index
    Unchanged,
    /// The viewport is narrower than the configured floor
    Disabled,
    /// The controller is not bound
    Inactive,
}

impl NavOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, NavOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct NavigationEngine {
    state: NavigationState,
    loop_sections: bool,
    min_enabled_width: f64,
}

impl NavigationEngine {
    pub fn new(section_count: usize, loop_sections: bool, min_enabled_width: u32) -> Self {
        Self {
            state: NavigationState::new(section_count),
            loop_sections,
            min_enabled_width: f64::from(min_enabled_width),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.state.current()
    }

    pub fn is_enabled(&self, viewport: Viewport) -> bool {
        viewport.width >= self.min_enabled_width
    }

    /// Apply the loop or clamp policy to a requested index
    pub fn resolve(&self, requested: isize) -> usize {
        let max = self.state.section_count().saturating_sub(1);
        match (requested < 0, requested as usize > max) {
            (true, _) if self.loop_sections => max,
            (true, _) => 0,
            (false, true) if self.loop_sections => 0,
            (false, true) => max,
            (false, false) => requested as usize,
        }
    }

    /// Move to `requested` if allowed, calling `before_leave` first
    ///
    /// Scheduling the visual commit is left to the caller.
    pub fn navigate(
        &mut self,
        requested: isize,
        viewport: Viewport,
        hooks: &mut Hooks,
    ) -> NavOutcome {
        if self.state.phase() != Phase::Bound {
            return NavOutcome::Inactive;
        }
        if !self.is_enabled(viewport) {
            trace!(requested, width = viewport.width, "Navigation disabled at this width");
            return NavOutcome::Disabled;
        }

        let from = self.state.current();
        let to = self.resolve(requested);
        if to == from {
            return NavOutcome::Unchanged;
        }

        hooks.before_leave(from, to);
        self.state.set_current(to);
        debug!(from, to, requested, "Section changed");

        NavOutcome::Moved { from, to }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.state.set_phase(phase);
    }
}
