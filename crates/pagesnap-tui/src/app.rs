use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use pagesnap_core::host::{HostEvent, Key};
use pagesnap_core::input::TouchPhase;
use pagesnap_core::{AppConfig, Controller, Phase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::debug;

use crate::host::{TerminalHost, INDICATOR_WIDTH};
use crate::input::Action;
use crate::theme::Theme;
use crate::widgets::{dot_at, IndicatorWidget, SectionViewWidget, StatusBarWidget};

/// Rows the current section scrolls per wheel notch when it is not at a boundary
pub const WHEEL_LINES: i32 = 3;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal viewing
    Normal,
    /// Typing a location fragment
    Fragment(String),
}

/// Viewer state around a controller bound to a terminal host
pub struct App {
    pub controller: Controller<TerminalHost>,
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub mode: Mode,
    /// Deck name shown in the status bar
    pub title: String,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Where the indicator was last drawn, for click hit-testing
    indicator_area: Rect,
}

impl App {
    pub fn new(
        controller: Controller<TerminalHost>,
        config: Arc<AppConfig>,
        theme: Theme,
        title: String,
    ) -> Self {
        Self {
            controller,
            config,
            theme,
            mode: Mode::Normal,
            title,
            should_quit: false,
            status_message: None,
            indicator_area: Rect::default(),
        }
    }

    /// Split a terminal area into section area and status bar
    pub fn layout(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (chunks[0], chunks[1])
    }

    pub fn handle_action(&mut self, action: Action) {
        debug!(?action, "Handling action");
        match action {
            Action::Quit => self.should_quit = true,
            Action::Destroy => {
                if self.controller.destroy() {
                    self.status_message =
                        Some("Destroyed; press rebuild to bind again".to_string());
                }
            }
            Action::Rebuild => {
                if self.controller.rebuild() {
                    self.status_message = None;
                }
            }
            Action::PromptFragment => self.mode = Mode::Fragment(String::new()),
            Action::First => {
                self.controller.go_to(0);
            }
            Action::Last => {
                let last = self.controller.section_count() as isize - 1;
                self.controller.go_to(last);
            }
            Action::ScrollDown => self.scroll_current(1),
            Action::ScrollUp => self.scroll_current(-1),
            Action::JumpDot(index) => {
                if index < self.controller.section_count() {
                    self.controller.dispatch(HostEvent::DotClick(index));
                }
            }
            Action::Forward(key) => self.forward_key(key),
            Action::Confirm => {
                if let Mode::Fragment(fragment) = std::mem::replace(&mut self.mode, Mode::Normal) {
                    self.follow_fragment(fragment.trim_start_matches('#'));
                }
            }
            Action::Cancel => self.mode = Mode::Normal,
            Action::InputChar(c) => {
                if let Mode::Fragment(ref mut input) = self.mode {
                    input.push(c);
                }
            }
            Action::Backspace => {
                if let Mode::Fragment(ref mut input) = self.mode {
                    input.pop();
                }
            }
            Action::None => {}
        }
    }

    fn forward_key(&mut self, key: Key) {
        self.controller.dispatch(HostEvent::KeyDown {
            key,
            at: Instant::now(),
        });
    }

    /// Change the location fragment and raise a hashchange if it differs
    pub fn follow_fragment(&mut self, fragment: &str) {
        if self.controller.host_mut().navigate_fragment(fragment) {
            self.controller.dispatch(HostEvent::HashChange);
        }
    }

    fn scroll_current(&mut self, delta: i32) {
        let current = self.controller.current();
        self.controller.host_mut().scroll_section(current, delta);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let at = Instant::now();
        let y = mouse.row as f64;

        match mouse.kind {
            MouseEventKind::ScrollDown => self.wheel(WHEEL_LINES, at),
            MouseEventKind::ScrollUp => self.wheel(-WHEEL_LINES, at),
            MouseEventKind::Down(MouseButton::Left) => {
                let dots = self.controller.host().dots().len();
                if let Some(index) = dot_at(self.indicator_area, dots, mouse.column, mouse.row) {
                    self.controller.dispatch(HostEvent::DotClick(index));
                } else {
                    self.touch(TouchPhase::Start, y, at);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.touch(TouchPhase::Move, y, at),
            MouseEventKind::Up(MouseButton::Left) => self.touch(TouchPhase::End, y, at),
            _ => {}
        }
    }

    fn wheel(&mut self, lines: i32, at: Instant) {
        let outcome = self.controller.dispatch(HostEvent::Wheel {
            delta_y: lines as f64,
            at,
        });
        // Not claimed by the controller, so the section scrolls natively
        if !outcome.default_prevented {
            self.scroll_current(lines);
        }
    }

    fn touch(&mut self, phase: TouchPhase, y: f64, at: Instant) {
        self.controller.dispatch(HostEvent::Touch { phase, y, at });
    }

    /// Apply a terminal resize and keep the current section aligned
    pub fn resize(&mut self, width: u16, height: u16) {
        let (sections, _) = Self::layout(Rect::new(0, 0, width, height));
        let host = self.controller.host_mut();
        host.resize(sections.width, sections.height);

        let offset = self.controller.current() as f64 * sections.height.max(1) as f64;
        self.controller.host_mut().snap_offset(offset);
    }

    /// Run pending animation frames; returns how many committed
    pub fn run_frames(&mut self) -> usize {
        let frames = self.controller.host_mut().take_frames();
        frames
            .into_iter()
            .filter(|handle| self.controller.run_frame(*handle))
            .count()
    }

    /// Whether the next poll should use the animation frame rate
    pub fn needs_fast_update(&self) -> bool {
        let host = self.controller.host();
        host.is_animating() || host.has_pending_frames()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let (sections, status) = Self::layout(frame.area());
        let indicator_width = INDICATOR_WIDTH.min(sections.width);
        let text_area = Rect {
            width: sections.width - indicator_width,
            ..sections
        };
        self.indicator_area = Rect {
            x: sections.x + text_area.width,
            width: indicator_width,
            ..sections
        };

        let offset = self.controller.host_mut().visible_offset(Instant::now());
        let host = self.controller.host();
        SectionViewWidget::render(frame, text_area, host, offset, &self.theme);
        IndicatorWidget::render(frame, self.indicator_area, host.dots(), &self.theme);
        StatusBarWidget::render(frame, status, self);
    }
}
