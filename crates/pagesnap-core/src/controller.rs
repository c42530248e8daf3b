//! Section snapping controller
//!
//! Owns one [`NavigationEngine`] and everything that reacts to it. Hosts feed
//! raw events through [`Controller::dispatch`] and fired animation frames
//! through [`Controller::run_frame`]; callers navigate with
//! [`Controller::go_to`].
//!
//! # Lifecycle
//!
//! ```text
//! new() ──► Bound ──destroy()──► Destroyed
//!             ▲                      │
//!             └──────rebuild()───────┘
//! ```

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::SnapConfig;
use crate::hash::HashSync;
use crate::hooks::Hooks;
use crate::host::{
    EventKind, EventOutcome, FrameHandle, Host, HostEvent, Section, CONTAINER_CLASS,
};
use crate::indicator::Indicator;
use crate::input::{KeyboardAdapter, Step, SwipeAdapter, SwipeConfig, WheelAdapter};
use crate::navigation::{NavOutcome, NavigationEngine};
use crate::state::{NavigationState, Phase};
use crate::{Error, Result};

pub struct Controller<H: Host> {
    host: H,
    selector: String,
    config: SnapConfig,
    sections: Vec<Section>,
    engine: NavigationEngine,
    scheduler: crate::scheduler::TransitionScheduler,
    indicator: Indicator,
    hash: HashSync,
    wheel: WheelAdapter,
    keyboard: KeyboardAdapter,
    swipe: SwipeAdapter,
    listening: BTreeSet<EventKind>,
    hooks: Hooks,
}

impl<H: Host> Controller<H> {
    /// Resolve `selector` on `host` and bind a controller to it
    ///
    /// Fails without touching the host's listeners when the container is
    /// missing or has no sections.
    pub fn new(mut host: H, selector: &str, config: SnapConfig, hooks: Hooks) -> Result<Self> {
        let sections = host
            .resolve_container(selector)
            .ok_or_else(|| Error::ContainerNotFound(selector.to_string()))?;
        if sections.is_empty() {
            return Err(Error::NoSections(selector.to_string()));
        }

        let delay = config.delay();
        host.prepare_container(CONTAINER_CLASS, delay);

        let mut controller = Self {
            engine: NavigationEngine::new(
                sections.len(),
                config.loop_sections,
                config.disable_below,
            ),
            hash: HashSync::new(config.hash),
            wheel: WheelAdapter::new(delay),
            keyboard: KeyboardAdapter::new(delay),
            swipe: SwipeAdapter::default(),
            scheduler: Default::default(),
            indicator: Indicator::default(),
            listening: BTreeSet::new(),
            selector: selector.to_string(),
            sections,
            config,
            hooks,
            host,
        };

        controller.bind();
        info!(
            selector = %controller.selector,
            sections = controller.sections.len(),
            "Controller bound"
        );
        Ok(controller)
    }

    /// Navigate to `index`, applying the loop or clamp policy
    pub fn go_to(&mut self, index: isize) -> NavOutcome {
        let viewport = self.host.viewport();
        let outcome = self.engine.navigate(index, viewport, &mut self.hooks);
        if outcome.moved() {
            self.scheduler.schedule(&mut self.host);
        }
        outcome
    }

    /// Index of the current section
    #[inline]
    pub fn current(&self) -> usize {
        self.engine.current()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn phase(&self) -> Phase {
        self.engine.state().phase()
    }

    pub fn state(&self) -> &NavigationState {
        self.engine.state()
    }

    pub fn is_enabled(&self) -> bool {
        self.engine.is_enabled(self.host.viewport())
    }

    /// Unbind all input and clear visual state; no-op unless bound
    pub fn destroy(&mut self) -> bool {
        if self.phase() != Phase::Bound {
            return false;
        }

        self.unbind();
        self.scheduler.cancel(&mut self.host);
        self.host.apply_offset(None);
        self.indicator.detach(&mut self.host);
        self.engine.set_phase(Phase::Destroyed);

        info!(selector = %self.selector, current = self.current(), "Controller destroyed");
        true
    }

    /// Bind again after [`Controller::destroy`]; no-op unless destroyed
    ///
    /// The current index survives the round trip and its offset is restored.
    pub fn rebuild(&mut self) -> bool {
        if self.phase() != Phase::Destroyed {
            return false;
        }

        let offset = self.offset_for(self.current());
        self.host.apply_offset(Some(offset));
        self.bind();

        info!(selector = %self.selector, current = self.current(), "Controller rebuilt");
        true
    }

    /// Handle one host event
    pub fn dispatch(&mut self, event: HostEvent) -> EventOutcome {
        if self.phase() != Phase::Bound || !self.listening.contains(&event.kind()) {
            return EventOutcome::default();
        }

        match event {
            HostEvent::Wheel { delta_y, at } => {
                let enabled = self.is_enabled();
                let current = self.current();
                let host = &self.host;
                match self
                    .wheel
                    .evaluate(delta_y, at, enabled, || host.scroll_metrics(current))
                {
                    Some(step) => {
                        self.step(step);
                        EventOutcome::prevented()
                    }
                    None => EventOutcome::default(),
                }
            }
            HostEvent::KeyDown { key, at } => {
                let enabled = self.is_enabled();
                if let Some(step) = self.keyboard.evaluate(&key, at, enabled) {
                    self.step(step);
                }
                EventOutcome::default()
            }
            HostEvent::Touch { phase, y, at } => {
                if let Some(step) = self.swipe.evaluate(phase, y, at) {
                    self.step(step);
                }
                EventOutcome::default()
            }
            HostEvent::HashChange => {
                self.check_hash();
                EventOutcome::default()
            }
            HostEvent::DotClick(index) => {
                // Out-of-range dots must not wrap through the loop policy
                if index < self.sections.len() {
                    self.go_to(index as isize);
                }
                EventOutcome::default()
            }
        }
    }

    /// Run a fired animation frame; returns whether a commit happened
    ///
    /// Frames other than the most recently scheduled one are ignored.
    pub fn run_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.scheduler.claim(handle) {
            return false;
        }

        let current = self.current();
        let offset = self.offset_for(current);
        self.host.apply_offset(Some(offset));
        self.indicator.sync(current, &mut self.host);
        self.hash.publish(&mut self.host, &self.sections, current);
        self.hooks.after_load(current);

        debug!(current, offset, "Transition committed");
        true
    }

    /// Navigate to the section named by the location fragment, if any
    pub fn check_hash(&mut self) -> NavOutcome {
        match self.hash.lookup(&self.host, &self.sections) {
            Some(index) => self.go_to(index as isize),
            None => NavOutcome::Unchanged,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.scheduler.pending()
    }

    /// Number of transition commits run so far
    pub fn commit_count(&self) -> u64 {
        self.scheduler.commit_count()
    }

    /// Last fragment written to the location
    pub fn last_synced_hash(&self) -> Option<&str> {
        self.hash.last_synced()
    }

    fn step(&mut self, step: Step) -> NavOutcome {
        self.go_to(step.from_index(self.current()))
    }

    fn offset_for(&self, index: usize) -> f64 {
        index as f64 * self.host.viewport().height
    }

    fn bind(&mut self) {
        self.indicator.attach(&mut self.host);
        self.indicator
            .build(self.sections.len(), self.current(), &mut self.host);

        for kind in [
            EventKind::Wheel,
            EventKind::KeyDown,
            EventKind::HashChange,
            EventKind::DotClick,
        ] {
            self.listen(kind);
        }
        if self.is_enabled() {
            let recognizer = self.host.create_gesture(SwipeConfig::default());
            self.swipe.attach(recognizer);
            self.listen(EventKind::Touch);
        }

        self.engine.set_phase(Phase::Bound);
        self.check_hash();
    }

    fn unbind(&mut self) {
        for kind in std::mem::take(&mut self.listening) {
            self.host.remove_listener(kind);
        }
        self.swipe.release();
    }

    fn listen(&mut self, kind: EventKind) {
        if self.listening.insert(kind) {
            self.host.add_listener(kind);
        }
    }
}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for Controller<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("selector", &self.selector)
            .field("state", self.engine.state())
            .field("config", &self.config)
            .field("pending_frame", &self.scheduler.pending())
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;
    use crate::host::{Key, ScrollMetrics, Viewport};
    use crate::input::TouchPhase;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    fn host(anchors: &[Option<&str>]) -> HeadlessHost {
        HeadlessHost::new(VIEWPORT).unwrap().with_container("main", anchors)
    }

    fn controller(count: usize, config: SnapConfig) -> Controller<HeadlessHost> {
        let anchors = vec![None; count];
        Controller::new(host(&anchors), "#main", config, Hooks::new()).unwrap()
    }

    fn looping() -> SnapConfig {
        SnapConfig {
            loop_sections: true,
            ..Default::default()
        }
    }

    fn wheel(delta_y: f64, at: Instant) -> HostEvent {
        HostEvent::Wheel { delta_y, at }
    }

    fn key(key: Key, at: Instant) -> HostEvent {
        HostEvent::KeyDown { key, at }
    }

    #[test]
    fn test_missing_container_is_fatal() {
        let err = Controller::new(host(&[None]), "#nope", SnapConfig::default(), Hooks::new())
            .unwrap_err();
        assert!(matches!(err, Error::ContainerNotFound(ref s) if s == "#nope"));
    }

    #[test]
    fn test_empty_container_is_fatal() {
        let host = HeadlessHost::new(VIEWPORT).unwrap().with_container("main", &[]);
        let err = Controller::new(host, "main", SnapConfig::default(), Hooks::new()).unwrap_err();
        assert!(matches!(err, Error::NoSections(_)));
    }

    #[test]
    fn test_construction_prepares_host() {
        let ctl = controller(3, SnapConfig::default());
        let host = ctl.host();

        assert_eq!(ctl.phase(), Phase::Bound);
        assert_eq!(host.container_classes(), &["pagesnap-container".to_string()]);
        assert_eq!(host.transition(), Some(Duration::from_millis(700)));
        assert!(host.indicator_attached());
        assert_eq!(host.dots().len(), 3);
        assert!(host.dots()[0].active);
        assert!(host.listeners().contains(&EventKind::Wheel));
        assert!(host.listeners().contains(&EventKind::KeyDown));
        assert!(host.listeners().contains(&EventKind::HashChange));
        assert!(host.listeners().contains(&EventKind::Touch));
        assert_eq!(host.swipe_config(), Some(SwipeConfig::default()));
        assert!(host.pending_frames().is_empty());
    }

    #[test]
    fn test_go_to_commits_on_frame() {
        let mut ctl = controller(3, SnapConfig::default());

        assert_eq!(ctl.go_to(2), NavOutcome::Moved { from: 0, to: 2 });
        assert_eq!(ctl.current(), 2);
        // Nothing visual happens until the frame runs
        assert_eq!(ctl.host().offset(), None);

        assert_eq!(ctl.flush_frames(), 1);
        assert_eq!(ctl.host().offset(), Some(1600.0));
        assert_eq!(ctl.indicator().active(), Some(2));
    }

    #[test]
    fn test_same_index_is_silent() {
        let fired = Rc::new(RefCell::new(0));
        let before = fired.clone();
        let after = fired.clone();
        let hooks = Hooks::new()
            .on_before_leave(move |_, _| *before.borrow_mut() += 1)
            .on_after_load(move |_| *after.borrow_mut() += 1);
        let mut ctl =
            Controller::new(host(&[None, None]), "main", SnapConfig::default(), hooks).unwrap();

        assert_eq!(ctl.go_to(ctl.current() as isize), NavOutcome::Unchanged);
        assert!(ctl.pending_frame().is_none());
        assert_eq!(ctl.flush_frames(), 0);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_rapid_calls_coalesce() {
        let loads = Rc::new(RefCell::new(Vec::new()));
        let sink = loads.clone();
        let hooks = Hooks::new().on_after_load(move |i| sink.borrow_mut().push(i));
        let mut ctl =
            Controller::new(host(&[None; 5]), "main", SnapConfig::default(), hooks).unwrap();
        let writes = ctl.host().offset_writes();

        ctl.go_to(1);
        ctl.go_to(2);
        ctl.go_to(4);
        ctl.go_to(3);

        assert_eq!(ctl.host().pending_frames().len(), 1);
        assert_eq!(ctl.flush_frames(), 1);
        assert_eq!(ctl.host().offset_writes(), writes + 1);
        assert_eq!(ctl.host().offset(), Some(2400.0));
        assert_eq!(*loads.borrow(), vec![3]);
        assert_eq!(ctl.commit_count(), 1);
    }

    #[test]
    fn test_callback_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let before = log.clone();
        let after = log.clone();
        let hooks = Hooks::new()
            .on_before_leave(move |from, to| {
                before.borrow_mut().push(format!("leave {from}->{to}"))
            })
            .on_after_load(move |i| after.borrow_mut().push(format!("load {i}")));
        let config = SnapConfig {
            hash: true,
            ..Default::default()
        };
        let mut ctl =
            Controller::new(host(&[Some("a"), Some("b")]), "main", config, hooks).unwrap();

        ctl.go_to(1);
        assert_eq!(*log.borrow(), vec!["leave 0->1".to_string()]);
        assert_eq!(ctl.host().fragment(), None);

        ctl.flush_frames();
        assert_eq!(*log.borrow(), vec!["leave 0->1".to_string(), "load 1".to_string()]);
        assert_eq!(ctl.host().fragment().as_deref(), Some("b"));
    }

    #[test]
    fn test_boundary_policy() {
        let mut ctl = controller(3, SnapConfig::default());
        for _ in 0..3 {
            ctl.go_to(ctl.current() as isize - 1);
            assert_eq!(ctl.current(), 0);
        }

        let mut ctl = controller(3, looping());
        ctl.go_to(ctl.current() as isize - 1);
        assert_eq!(ctl.current(), 2);
        ctl.go_to(7);
        assert_eq!(ctl.current(), 0);
    }

    #[test]
    fn test_disable_below_width() {
        let config = SnapConfig {
            disable_below: 800,
            ..Default::default()
        };
        let mut ctl = controller(3, config);

        ctl.host_mut().set_viewport(Viewport::new(700.0, 600.0));
        assert_eq!(ctl.go_to(1), NavOutcome::Disabled);
        assert_eq!(ctl.current(), 0);

        ctl.host_mut().set_viewport(Viewport::new(900.0, 600.0));
        assert!(ctl.go_to(1).moved());
        assert_eq!(ctl.current(), 1);
    }

    #[test]
    fn test_disabled_keeps_index() {
        let config = SnapConfig {
            disable_below: 800,
            ..Default::default()
        };
        let mut ctl = controller(3, config);
        ctl.go_to(2);
        ctl.host_mut().set_viewport(Viewport::new(500.0, 600.0));
        assert!(!ctl.is_enabled());
        assert_eq!(ctl.current(), 2);
    }

    #[test]
    fn test_swipe_not_bound_when_disabled_at_bind() {
        let config = SnapConfig {
            disable_below: 2000,
            ..Default::default()
        };
        let ctl = controller(3, config);
        assert!(!ctl.host().listeners().contains(&EventKind::Touch));
        assert_eq!(ctl.host().swipe_config(), None);
    }

    #[test]
    fn test_wheel_waits_for_section_boundary() {
        let t0 = Instant::now();
        let mut ctl = controller(3, SnapConfig::default());
        ctl.host_mut().set_metrics(
            0,
            ScrollMetrics {
                scroll_top: 0.0,
                scroll_height: 2000.0,
                client_height: 800.0,
            },
        );

        let outcome = ctl.dispatch(wheel(100.0, t0));
        assert!(!outcome.default_prevented);
        assert_eq!(ctl.current(), 0);

        ctl.host_mut().scroll_section(0, 1200.0);
        let outcome = ctl.dispatch(wheel(100.0, t0 + Duration::from_millis(700)));
        assert!(outcome.default_prevented);
        assert_eq!(ctl.current(), 1);
    }

    #[test]
    fn test_wheel_burst_moves_once() {
        let t0 = Instant::now();
        let mut ctl = controller(5, SnapConfig::default());
        for i in 0..10 {
            ctl.dispatch(wheel(40.0, t0 + Duration::from_millis(i * 30)));
        }
        assert_eq!(ctl.current(), 1);

        ctl.dispatch(wheel(40.0, t0 + Duration::from_millis(700)));
        assert_eq!(ctl.current(), 2);
    }

    #[test]
    fn test_wheel_at_clamped_end_still_prevents_default() {
        let mut ctl = controller(2, SnapConfig::default());
        ctl.go_to(1);
        let outcome = ctl.dispatch(wheel(100.0, Instant::now()));
        assert!(outcome.default_prevented);
        assert_eq!(ctl.current(), 1);
    }

    #[test]
    fn test_channels_throttle_independently() {
        let t0 = Instant::now();
        let mut ctl = controller(5, SnapConfig::default());

        ctl.dispatch(wheel(100.0, t0));
        ctl.dispatch(key(Key::ArrowDown, t0 + Duration::from_millis(10)));
        assert_eq!(ctl.current(), 2);

        ctl.dispatch(key(Key::ArrowUp, t0 + Duration::from_millis(20)));
        assert_eq!(ctl.current(), 2);
    }

    #[test]
    fn test_keys() {
        let t0 = Instant::now();
        let gap = Duration::from_millis(700);
        let mut ctl = controller(3, SnapConfig::default());

        ctl.dispatch(key(Key::ArrowDown, t0));
        assert_eq!(ctl.current(), 1);
        ctl.dispatch(key(Key::Other("PageDown".into()), t0 + gap));
        assert_eq!(ctl.current(), 1);
        ctl.dispatch(key(Key::ArrowUp, t0 + gap * 2));
        assert_eq!(ctl.current(), 0);
    }

    #[test]
    fn test_swipe() {
        let t0 = Instant::now();
        let mut ctl = controller(3, SnapConfig::default());
        let touch = |phase, y, ms| HostEvent::Touch {
            phase,
            y,
            at: t0 + Duration::from_millis(ms),
        };

        ctl.dispatch(touch(TouchPhase::Start, 600.0, 0));
        ctl.dispatch(touch(TouchPhase::Move, 450.0, 40));
        ctl.dispatch(touch(TouchPhase::End, 300.0, 80));
        assert_eq!(ctl.current(), 1);

        ctl.dispatch(touch(TouchPhase::Start, 300.0, 200));
        ctl.dispatch(touch(TouchPhase::End, 600.0, 260));
        assert_eq!(ctl.current(), 0);
    }

    #[test]
    fn test_dot_click() {
        let mut ctl = controller(4, SnapConfig::default());
        ctl.dispatch(HostEvent::DotClick(3));
        assert_eq!(ctl.current(), 3);
    }

    #[test]
    fn test_dot_click_out_of_range_ignored() {
        let mut ctl = controller(4, looping());
        ctl.go_to(1);
        ctl.dispatch(HostEvent::DotClick(4));
        ctl.dispatch(HostEvent::DotClick(usize::MAX));
        assert_eq!(ctl.current(), 1);
    }

    #[test]
    fn test_hash_round_trip() {
        let config = SnapConfig {
            hash: true,
            ..Default::default()
        };
        let mut ctl = Controller::new(
            host(&[Some("intro"), Some("features"), Some("pricing")]),
            "main",
            config,
            Hooks::new(),
        )
        .unwrap();

        ctl.host_mut().navigate_fragment("pricing");
        ctl.dispatch(HostEvent::HashChange);
        assert_eq!(ctl.current(), 2);

        ctl.host_mut().navigate_fragment("nowhere");
        ctl.dispatch(HostEvent::HashChange);
        assert_eq!(ctl.current(), 2);
        assert_eq!(ctl.host().fragment().as_deref(), Some("nowhere"));
    }

    #[test]
    fn test_hash_round_trip_with_encoded_anchors() {
        let config = SnapConfig {
            hash: true,
            ..Default::default()
        };
        let mut ctl = Controller::new(
            host(&[Some("intro"), Some("café"), Some("my intro")]),
            "main",
            config,
            Hooks::new(),
        )
        .unwrap();

        ctl.host_mut().navigate_fragment("café");
        ctl.dispatch(HostEvent::HashChange);
        assert_eq!(ctl.current(), 1);

        ctl.host_mut().navigate_fragment("my intro");
        ctl.dispatch(HostEvent::HashChange);
        assert_eq!(ctl.current(), 2);

        ctl.go_to(1);
        ctl.flush_frames();
        assert_eq!(ctl.host().fragment().as_deref(), Some("café"));
        assert_eq!(ctl.last_synced_hash(), Some("café"));
    }

    #[test]
    fn test_hash_outbound_replaces_without_history() {
        let config = SnapConfig {
            hash: true,
            ..Default::default()
        };
        let mut ctl = Controller::new(
            host(&[Some("intro"), None, Some("end")]),
            "main",
            config,
            Hooks::new(),
        )
        .unwrap();
        let history = ctl.host().history_len();

        ctl.go_to(2);
        ctl.flush_frames();
        assert_eq!(ctl.host().fragment().as_deref(), Some("end"));
        assert_eq!(ctl.last_synced_hash(), Some("end"));

        // Section without an anchor leaves the fragment alone
        ctl.go_to(1);
        ctl.flush_frames();
        assert_eq!(ctl.host().fragment().as_deref(), Some("end"));
        assert_eq!(ctl.host().fragment_writes(), 1);
        assert_eq!(ctl.host().history_len(), history);
    }

    #[test]
    fn test_initial_fragment_applied_at_bind() {
        let mut host = host(&[Some("a"), Some("b"), Some("c")]);
        host.navigate_fragment("c");
        let config = SnapConfig {
            hash: true,
            ..Default::default()
        };
        let mut ctl = Controller::new(host, "main", config, Hooks::new()).unwrap();

        assert_eq!(ctl.current(), 2);
        assert_eq!(ctl.flush_frames(), 1);
        assert_eq!(ctl.host().offset(), Some(1600.0));
    }

    #[test]
    fn test_hash_ignored_when_disabled() {
        let mut host = host(&[Some("a"), Some("b")]);
        host.navigate_fragment("b");
        let mut ctl = Controller::new(host, "main", SnapConfig::default(), Hooks::new()).unwrap();
        assert_eq!(ctl.current(), 0);

        ctl.go_to(1);
        ctl.flush_frames();
        assert_eq!(ctl.host().fragment_writes(), 0);
    }

    #[test]
    fn test_destroy_tears_down() {
        let mut ctl = controller(3, SnapConfig::default());
        ctl.go_to(1);
        ctl.flush_frames();
        ctl.go_to(2);
        let stale = ctl.pending_frame().unwrap();

        assert!(ctl.destroy());
        assert_eq!(ctl.phase(), Phase::Destroyed);
        assert!(ctl.host().listeners().is_empty());
        assert!(ctl.host().pending_frames().is_empty());
        assert_eq!(ctl.host().offset(), None);
        assert!(!ctl.host().indicator_attached());
        assert!(ctl.indicator().is_empty());

        // A frame that fires anyway must not resurrect anything
        assert!(!ctl.run_frame(stale));
        assert_eq!(ctl.host().offset(), None);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut ctl = controller(3, SnapConfig::default());
        assert!(ctl.destroy());
        let writes = ctl.host().offset_writes();
        assert!(!ctl.destroy());
        assert_eq!(ctl.host().offset_writes(), writes);
    }

    #[test]
    fn test_destroyed_controller_ignores_input() {
        let mut ctl = controller(3, SnapConfig::default());
        ctl.destroy();
        assert_eq!(ctl.go_to(1), NavOutcome::Inactive);
        let outcome = ctl.dispatch(wheel(100.0, Instant::now()));
        assert!(!outcome.default_prevented);
        assert_eq!(ctl.current(), 0);
    }

    #[test]
    fn test_rebuild_restores_controller() {
        let mut ctl = controller(4, SnapConfig::default());
        ctl.go_to(2);
        ctl.flush_frames();

        assert!(!ctl.rebuild());
        ctl.destroy();
        assert!(ctl.rebuild());

        assert_eq!(ctl.phase(), Phase::Bound);
        assert_eq!(ctl.current(), 2);
        assert_eq!(ctl.indicator().len(), ctl.section_count());
        assert_eq!(ctl.host().dots().len(), 4);
        assert_eq!(ctl.indicator().active(), Some(2));
        assert!(ctl.host().indicator_attached());
        assert_eq!(ctl.host().offset(), Some(1600.0));
        assert!(ctl.host().listeners().contains(&EventKind::Wheel));

        assert!(ctl.go_to(3).moved());
    }

    #[test]
    fn test_rebuild_rechecks_hash() {
        let config = SnapConfig {
            hash: true,
            ..Default::default()
        };
        let mut ctl =
            Controller::new(host(&[Some("a"), Some("b")]), "main", config, Hooks::new()).unwrap();
        ctl.destroy();
        ctl.host_mut().navigate_fragment("b");
        ctl.rebuild();
        assert_eq!(ctl.current(), 1);
    }

    #[test]
    fn test_loop_scenario() {
        let config = SnapConfig {
            loop_sections: true,
            delay_ms: 700,
            ..Default::default()
        };
        let mut ctl = controller(3, config);

        assert!(ctl.go_to(2).moved());
        assert_eq!(ctl.current(), 2);
        ctl.flush_frames();

        let outcome = ctl.dispatch(wheel(120.0, Instant::now()));
        assert!(outcome.default_prevented);
        assert_eq!(ctl.current(), 0);
        ctl.flush_frames();

        assert_eq!(ctl.go_to(0), NavOutcome::Unchanged);
        assert!(ctl.pending_frame().is_none());
    }
}
