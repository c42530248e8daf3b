//! Recording host without a display
//!
//! Frames only run when flushed explicitly, and every visual write is counted,
//! which makes controller behaviour observable step by step. The `simulate`
//! command and the test suite both drive controllers through it.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use url::Url;

use crate::controller::Controller;
use crate::deck::{selector_name, Deck};
use crate::hash::decoded_fragment;
use crate::host::{EventKind, FrameHandle, Host, ScrollMetrics, Section, Viewport};
use crate::indicator::Dot;
use crate::input::gesture::{SwipeConfig, SwipeRecognizer};

const BASE_LOCATION: &str = "pagesnap://headless/";

#[derive(Debug, Clone)]
pub struct HeadlessSection {
    pub anchor: Option<String>,
    pub metrics: ScrollMetrics,
}

#[derive(Debug)]
pub struct HeadlessHost {
    containers: BTreeMap<String, Vec<HeadlessSection>>,
    resolved: Option<String>,
    viewport: Viewport,
    location: Url,
    history: Vec<Url>,
    fragment_writes: usize,
    listeners: BTreeSet<EventKind>,
    next_frame: u64,
    frames: Vec<FrameHandle>,
    container_classes: Vec<String>,
    transition: Option<Duration>,
    offset: Option<f64>,
    offset_writes: usize,
    indicator_attached: bool,
    dots: Vec<Dot>,
    indicator_renders: usize,
    swipe_config: Option<SwipeConfig>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> crate::Result<Self> {
        Self::at(BASE_LOCATION, viewport)
    }

    /// Host whose location starts at `location`
    pub fn at(location: &str, viewport: Viewport) -> crate::Result<Self> {
        let location = Url::parse(location)?;
        Ok(Self {
            containers: BTreeMap::new(),
            resolved: None,
            viewport,
            history: vec![location.clone()],
            location,
            fragment_writes: 0,
            listeners: BTreeSet::new(),
            next_frame: 1,
            frames: Vec::new(),
            container_classes: Vec::new(),
            transition: None,
            offset: None,
            offset_writes: 0,
            indicator_attached: false,
            dots: Vec::new(),
            indicator_renders: 0,
            swipe_config: None,
        })
    }

    /// Host whose containers mirror a parsed deck; every section fits the viewport
    pub fn from_deck(deck: &Deck, location: &str, viewport: Viewport) -> crate::Result<Self> {
        let mut host = Self::at(location, viewport)?;
        for container in deck.containers() {
            let sections = container
                .sections
                .iter()
                .map(|s| HeadlessSection {
                    anchor: s.anchor.clone(),
                    metrics: ScrollMetrics::fitting(viewport.height),
                })
                .collect();
            host.containers.insert(container.name.clone(), sections);
        }
        Ok(host)
    }

    /// Add a container of `anchors.len()` fitting sections
    pub fn with_container(mut self, name: &str, anchors: &[Option<&str>]) -> Self {
        let height = self.viewport.height;
        let sections = anchors
            .iter()
            .map(|a| HeadlessSection {
                anchor: a.map(str::to_string),
                metrics: ScrollMetrics::fitting(height),
            })
            .collect();
        self.containers.insert(name.to_string(), sections);
        self
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace the scroll metrics of a section in the resolved container
    pub fn set_metrics(&mut self, index: usize, metrics: ScrollMetrics) {
        if let Some(section) = self.resolved_sections_mut().and_then(|s| s.get_mut(index)) {
            section.metrics = metrics;
        }
    }

    /// Scroll a section of the resolved container, clamped to its content
    pub fn scroll_section(&mut self, index: usize, scroll_top: f64) {
        if let Some(section) = self.resolved_sections_mut().and_then(|s| s.get_mut(index)) {
            let max = (section.metrics.scroll_height - section.metrics.client_height).max(0.0);
            section.metrics.scroll_top = scroll_top.clamp(0.0, max);
        }
    }

    /// Simulate the user following a link to `#fragment` (adds history)
    pub fn navigate_fragment(&mut self, fragment: &str) {
        self.location.set_fragment(Some(fragment));
        self.history.push(self.location.clone());
    }

    /// Remove and return all pending frame requests
    pub fn take_frames(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.frames)
    }

    pub fn pending_frames(&self) -> &[FrameHandle] {
        &self.frames
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn fragment_writes(&self) -> usize {
        self.fragment_writes
    }

    pub fn listeners(&self) -> &BTreeSet<EventKind> {
        &self.listeners
    }

    pub fn container_classes(&self) -> &[String] {
        &self.container_classes
    }

    pub fn transition(&self) -> Option<Duration> {
        self.transition
    }

    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    pub fn offset_writes(&self) -> usize {
        self.offset_writes
    }

    pub fn indicator_attached(&self) -> bool {
        self.indicator_attached
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn indicator_renders(&self) -> usize {
        self.indicator_renders
    }

    /// Config of the last swipe recognizer handed out
    pub fn swipe_config(&self) -> Option<SwipeConfig> {
        self.swipe_config
    }

    fn resolved_sections(&self) -> Option<&Vec<HeadlessSection>> {
        self.containers.get(self.resolved.as_deref()?)
    }

    fn resolved_sections_mut(&mut self) -> Option<&mut Vec<HeadlessSection>> {
        let name = self.resolved.clone()?;
        self.containers.get_mut(&name)
    }
}

impl Host for HeadlessHost {
    fn resolve_container(&mut self, selector: &str) -> Option<Vec<Section>> {
        let name = selector_name(selector);
        let sections = self.containers.get(name)?;
        let resolved = sections
            .iter()
            .map(|s| Section::new(s.anchor.clone()))
            .collect();
        self.resolved = Some(name.to_string());
        Some(resolved)
    }

    fn scroll_metrics(&self, index: usize) -> ScrollMetrics {
        self.resolved_sections()
            .and_then(|s| s.get(index))
            .map(|s| s.metrics)
            .unwrap_or_else(|| ScrollMetrics::fitting(self.viewport.height))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn prepare_container(&mut self, class: &str, transition: Duration) {
        if !self.container_classes.iter().any(|c| c == class) {
            self.container_classes.push(class.to_string());
        }
        self.transition = Some(transition);
    }

    fn apply_offset(&mut self, offset: Option<f64>) {
        self.offset = offset;
        self.offset_writes += 1;
    }

    fn attach_indicator(&mut self) {
        self.indicator_attached = true;
    }

    fn detach_indicator(&mut self) {
        self.indicator_attached = false;
        self.dots.clear();
    }

    fn render_indicator(&mut self, dots: &[Dot]) {
        self.dots = dots.to_vec();
        self.indicator_renders += 1;
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
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn fragment(&self) -> Option<String> {
        decoded_fragment(&self.location)
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.location.set_fragment(Some(fragment));
        if let Some(entry) = self.history.last_mut() {
            *entry = self.location.clone();
        }
        self.fragment_writes += 1;
    }

    fn create_gesture(&mut self, config: SwipeConfig) -> SwipeRecognizer {
        self.swipe_config = Some(config);
        SwipeRecognizer::new(config)
    }
}

impl Controller<HeadlessHost> {
    /// Run every pending frame; returns how many commits happened
    pub fn flush_frames(&mut self) -> usize {
        let frames = self.host_mut().take_frames();
        frames
            .into_iter()
            .filter(|handle| self.run_frame(*handle))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_selector_prefix() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0))
            .unwrap()
            .with_container("main", &[Some("a"), None]);

        assert_eq!(host.resolve_container("#main").map(|s| s.len()), Some(2));
        assert_eq!(host.resolve_container(".main").map(|s| s.len()), Some(2));
        assert!(host.resolve_container("#other").is_none());
    }

    #[test]
    fn test_replace_fragment_keeps_history_length() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0)).unwrap();
        host.replace_fragment("one");
        host.replace_fragment("two");
        assert_eq!(host.history_len(), 1);
        assert_eq!(host.location().as_str(), "pagesnap://headless/#two");

        host.navigate_fragment("three");
        assert_eq!(host.history_len(), 2);
    }

    #[test]
    fn test_scroll_section_clamps() {
        let mut host = HeadlessHost::new(Viewport::new(1280.0, 800.0))
            .unwrap()
            .with_container("main", &[None]);
        host.resolve_container("main");
        host.set_metrics(
            0,
            ScrollMetrics {
                scroll_top: 0.0,
                scroll_height: 1000.0,
                client_height: 800.0,
            },
        );

        host.scroll_section(0, 5000.0);
        assert_eq!(host.scroll_metrics(0).scroll_top, 200.0);
        host.scroll_section(0, -5.0);
        assert_eq!(host.scroll_metrics(0).scroll_top, 0.0);
    }
}
