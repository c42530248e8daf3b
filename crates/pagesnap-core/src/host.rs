//! Host environment seam
//!
//! Everything the controller needs from its surroundings (element lookup,
//! styling, listener registration, animation frames, the location fragment,
//! viewport size, gesture classification) goes through [`Host`].

use std::time::{Duration, Instant};

use crate::indicator::Dot;
use crate::input::gesture::{SwipeConfig, SwipeRecognizer, TouchPhase};

/// Class applied to the snapping container
pub const CONTAINER_CLASS: &str = "pagesnap-container";
/// Class of one indicator dot
pub const DOT_CLASS: &str = "pagesnap-dot";
/// Class toggled on the dot of the current section
pub const ACTIVE_CLASS: &str = "active";

/// One child section of the container, as resolved by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Identifier used for fragment matching
    pub anchor: Option<String>,
}

impl Section {
    pub fn new(anchor: Option<String>) -> Self {
        Self { anchor }
    }

    /// Identifier, if present and non-empty
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref().filter(|a| !a.is_empty())
    }
}

/// Internal scroll position of a section
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Metrics of a section whose content fits without scrolling
    pub fn fitting(height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_height: height,
            client_height: height,
        }
    }

    /// Whether the section cannot scroll further in the direction of `delta_y`
    ///
    /// Positive deltas look at the bottom edge, everything else at the top.
    /// Both edges allow one unit of slack.
    pub fn at_boundary(&self, delta_y: f64) -> bool {
        if delta_y > 0.0 {
            self.scroll_top + self.client_height >= self.scroll_height - 1.0
        } else {
            self.scroll_top <= 1.0
        }
    }
}

/// Viewport dimensions reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Event sources the controller listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Wheel,
    KeyDown,
    HashChange,
    Touch,
    DotClick,
}

/// Keys the host can report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Other(String),
}

/// Raw events delivered by the host to a bound controller
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Wheel { delta_y: f64, at: Instant },
    KeyDown { key: Key, at: Instant },
    Touch { phase: TouchPhase, y: f64, at: Instant },
    HashChange,
    DotClick(usize),
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Wheel { .. } => EventKind::Wheel,
            HostEvent::KeyDown { .. } => EventKind::KeyDown,
            HostEvent::Touch { .. } => EventKind::Touch,
            HostEvent::HashChange => EventKind::HashChange,
            HostEvent::DotClick(_) => EventKind::DotClick,
        }
    }
}

/// What the controller did with an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The host must skip its default handling (e.g. native scrolling)
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }
}

/// Handle returned by [`Host::request_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Facilities a host environment provides to the controller
pub trait Host {
    /// Resolve the container and enumerate its child sections
    ///
    /// `None` means the selector matched nothing.
    fn resolve_container(&mut self, selector: &str) -> Option<Vec<Section>>;

    /// Current scroll metrics of the section at `index`
    fn scroll_metrics(&self, index: usize) -> ScrollMetrics;

    fn viewport(&self) -> Viewport;

    /// Style the container: add `class` and set the transform transition
    fn prepare_container(&mut self, class: &str, transition: Duration);

    /// Translate the container up by `offset` units, or clear it with `None`
    fn apply_offset(&mut self, offset: Option<f64>);

    /// Insert the indicator container into the document
    fn attach_indicator(&mut self);

    /// Remove the indicator container from the document
    fn detach_indicator(&mut self);

    /// Replace the indicator dots
    fn render_indicator(&mut self, dots: &[Dot]);

    fn add_listener(&mut self, kind: EventKind);

    fn remove_listener(&mut self, kind: EventKind);

    /// Schedule a callback for the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Current location fragment without the leading `#`
    fn fragment(&self) -> Option<String>;

    /// Replace the location fragment without adding a history entry
    fn replace_fragment(&mut self, fragment: &str);

    /// Construct the swipe classifier for this host's input units
    fn create_gesture(&mut self, config: SwipeConfig) -> SwipeRecognizer {
        SwipeRecognizer::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_fitting_section() {
        let metrics = ScrollMetrics::fitting(600.0);
        assert!(metrics.at_boundary(100.0));
        assert!(metrics.at_boundary(-100.0));
    }

    #[test]
    fn test_boundary_scrollable_section() {
        let mut metrics = ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 1200.0,
            client_height: 600.0,
        };
        assert!(metrics.at_boundary(-10.0));
        assert!(!metrics.at_boundary(10.0));

        metrics.scroll_top = 300.0;
        assert!(!metrics.at_boundary(-10.0));
        assert!(!metrics.at_boundary(10.0));

        // One unit of slack at either edge
        metrics.scroll_top = 599.0;
        assert!(metrics.at_boundary(10.0));
        metrics.scroll_top = 1.0;
        assert!(metrics.at_boundary(-10.0));
    }

    #[test]
    fn test_empty_anchor_is_none() {
        assert_eq!(Section::new(Some(String::new())).anchor(), None);
        assert_eq!(Section::new(Some("intro".into())).anchor(), Some("intro"));
    }
}
