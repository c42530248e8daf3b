use serde::Serialize;

/// Lifecycle phase of a controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Unbound,
    Bound,
    Destroyed,
}

/// Position of one controller
///
/// `current < section_count` holds whenever `section_count > 0`. Only the
/// navigation engine writes `current`; the section count is fixed when the
/// controller resolves its container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    current: usize,
    section_count: usize,
    phase: Phase,
}

impl NavigationState {
    pub fn new(section_count: usize) -> Self {
        Self {
            current: 0,
            section_count,
            phase: Phase::Unbound,
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.section_count);
        self.current = index;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}
