use std::collections::{BTreeSet, VecDeque};
use std::time::{Duration, Instant};

use pagesnap_core::deck::Deck;
use pagesnap_core::hash::decoded_fragment;
use pagesnap_core::host::{EventKind, FrameHandle, Host, ScrollMetrics, Section, Viewport};
use pagesnap_core::indicator::Dot;
use pagesnap_core::input::{SwipeConfig, SwipeRecognizer};
use pagesnap_core::UiConfig;
use tracing::debug;
use url::Url;

use crate::text::wrap_body;
use crate::transition::OffsetAnimator;

/// Columns reserved on the right for the dot indicator
pub const INDICATOR_WIDTH: u16 = 3;
/// Blank columns on each side of section text
pub const PADDING: u16 = 1;

/// Host backed by a terminal
///
/// Each section is a pane exactly one viewport tall; the container offset is
/// measured in rows and animated towards whatever the controller last
/// applied. Sections with more wrapped text than fits scroll internally.
#[derive(Debug)]
pub struct TerminalHost {
    deck: Deck,
    resolved: Option<usize>,
    width: u16,
    height: u16,
    wrapped: Vec<Vec<String>>,
    scroll: Vec<u16>,
    location: Url,
    listeners: BTreeSet<EventKind>,
    frames: VecDeque<FrameHandle>,
    next_frame: u64,
    container_class: Option<String>,
    animator: OffsetAnimator,
    offset_target: Option<f64>,
    indicator_visible: bool,
    dots: Vec<Dot>,
    swipe: SwipeConfig,
}

impl TerminalHost {
    /// `width`/`height` describe the section area, not the whole terminal
    pub fn new(deck: Deck, location: Url, ui: &UiConfig, width: u16, height: u16) -> Self {
        Self {
            deck,
            resolved: None,
            width,
            height: height.max(1),
            wrapped: Vec::new(),
            scroll: Vec::new(),
            location,
            listeners: BTreeSet::new(),
            frames: VecDeque::new(),
            next_frame: 1,
            container_class: None,
            animator: OffsetAnimator::new(Duration::ZERO, ui.easing),
            offset_target: None,
            indicator_visible: false,
            dots: Vec::new(),
            swipe: SwipeConfig {
                threshold: ui.swipe_threshold,
                velocity_threshold: ui.swipe_velocity,
            },
        }
    }

    /// Columns available to section text
    pub fn text_width(&self) -> u16 {
        self.width
            .saturating_sub(INDICATOR_WIDTH + PADDING * 2)
            .max(1)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Apply a new section area size, re-wrapping text and clamping scroll
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height.max(1);
        self.rewrap();
    }

    fn rewrap(&mut self) {
        let Some(container) = self.resolved.and_then(|i| self.deck.containers().get(i)) else {
            return;
        };
        let width = self.text_width();
        self.wrapped = container
            .sections
            .iter()
            .map(|s| wrap_body(&s.body, width))
            .collect();
        self.scroll.resize(self.wrapped.len(), 0);
        for index in 0..self.scroll.len() {
            self.scroll_section(index, 0);
        }
    }

    pub fn section_count(&self) -> usize {
        self.wrapped.len()
    }

    /// Wrapped rows of a section in the resolved container
    pub fn section_rows(&self, index: usize) -> &[String] {
        self.wrapped.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn section_anchor(&self, index: usize) -> Option<&str> {
        let container = self.deck.containers().get(self.resolved?)?;
        container.sections.get(index)?.anchor.as_deref()
    }

    pub fn section_scroll(&self, index: usize) -> u16 {
        self.scroll.get(index).copied().unwrap_or(0)
    }

    /// Scroll a section's text by `delta` rows, clamped to its content
    pub fn scroll_section(&mut self, index: usize, delta: i32) {
        let max = self
            .section_rows(index)
            .len()
            .saturating_sub(self.height as usize) as i32;
        if let Some(top) = self.scroll.get_mut(index) {
            *top = (*top as i32 + delta).clamp(0, max) as u16;
        }
    }

    /// Visible container offset in rows at `now`
    pub fn visible_offset(&mut self, now: Instant) -> f64 {
        self.animator.update(now)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Offset last applied by the controller; `None` when cleared
    pub fn offset_target(&self) -> Option<f64> {
        self.offset_target
    }

    /// Move to an offset without animating (used after a resize)
    pub fn snap_offset(&mut self, offset: f64) {
        if self.offset_target.is_some() {
            self.offset_target = Some(offset);
            self.animator.jump_to(offset);
        }
    }

    /// Follow a link to `#fragment`; returns whether the fragment changed
    pub fn navigate_fragment(&mut self, fragment: &str) -> bool {
        if decoded_fragment(&self.location).as_deref() == Some(fragment) {
            return false;
        }
        self.location.set_fragment(Some(fragment));
        true
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Remove and return all pending frame requests, oldest first
    pub fn take_frames(&mut self) -> Vec<FrameHandle> {
        self.frames.drain(..).collect()
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.contains(&kind)
    }

    pub fn container_class(&self) -> Option<&str> {
        self.container_class.as_deref()
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }
}

impl Host for TerminalHost {
    fn resolve_container(&mut self, selector: &str) -> Option<Vec<Section>> {
        let name = self.deck.container(selector)?.name.clone();
        let index = self.deck.containers().iter().position(|c| c.name == name)?;
        self.resolved = Some(index);
        self.scroll.clear();
        self.rewrap();

        let sections = self.deck.containers()[index]
            .sections
            .iter()
            .map(|s| Section::new(s.anchor.clone()))
            .collect();
        Some(sections)
    }

    fn scroll_metrics(&self, index: usize) -> ScrollMetrics {
        let client = self.height as f64;
        ScrollMetrics {
            scroll_top: self.section_scroll(index) as f64,
            scroll_height: (self.section_rows(index).len() as f64).max(client),
            client_height: client,
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f64, self.height as f64)
    }

    fn prepare_container(&mut self, class: &str, transition: Duration) {
        self.container_class = Some(class.to_string());
        self.animator.set_duration(transition);
    }

    fn apply_offset(&mut self, offset: Option<f64>) {
        self.offset_target = offset;
        match offset {
            Some(rows) => self.animator.animate_to(rows, Instant::now()),
            None => self.animator.reset(),
        }
    }

    fn attach_indicator(&mut self) {
        self.indicator_visible = true;
    }

    fn detach_indicator(&mut self) {
        self.indicator_visible = false;
        self.dots.clear();
    }

    fn render_indicator(&mut self, dots: &[Dot]) {
        self.dots = dots.to_vec();
    }

    fn add_listener(&mut self, kind: EventKind) {
        self.listeners.insert(kind);
    }

    fn remove_listener(&mut self, kind: EventKind) {
        self.listeners.remove(&kind);
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_frame);
        self.next_frame += 1;
        self.frames.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn fragment(&self) -> Option<String> {
        decoded_fragment(&self.location)
    }

    fn replace_fragment(&mut self, fragment: &str) {
        debug!(fragment, "Replacing location fragment");
        self.location.set_fragment(Some(fragment));
    }

    fn create_gesture(&mut self, _config: SwipeConfig) -> SwipeRecognizer {
        // Drags are measured in rows, so the pixel defaults do not apply
        SwipeRecognizer::new(self.swipe)
    }
}
