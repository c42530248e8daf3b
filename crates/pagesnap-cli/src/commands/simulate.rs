use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::info;

use pagesnap_core::host::{Host, HostEvent, Key, ScrollMetrics, Viewport};
use pagesnap_core::input::TouchPhase;
use pagesnap_core::{
    AppConfig, Controller, Deck, HeadlessHost, Hooks, NavOutcome, Phase, SnapConfig,
};

use super::{deck_location, load_deck};
use crate::SnapArgs;

const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};
/// Finger travel and duration of a scripted swipe
const SWIPE_DISTANCE: f64 = 200.0;
const SWIPE_MS: u64 = 100;

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    GoTo(isize),
    Wheel { down: bool, at: Option<u64> },
    Key { key: Key, at: Option<u64> },
    Swipe { up: bool, at: Option<u64> },
    Hash(String),
    Dot(usize),
    Frame,
    Resize(f64, f64),
    Destroy,
    Rebuild,
    Height(usize, f64),
    Scroll(f64),
}

/// State after one step
#[derive(Debug, Serialize)]
pub struct TraceRecord {
    pub line: usize,
    pub step: String,
    pub time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<NavOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_prevented: Option<bool>,
    pub current: usize,
    pub phase: Phase,
    pub offset: Option<f64>,
    pub fragment: Option<String>,
    pub commits: u64,
    pub callbacks: Vec<String>,
}

pub async fn run(
    config: &AppConfig,
    deck_path: &Path,
    script: &Path,
    args: &SnapArgs,
) -> Result<()> {
    let deck = load_deck(deck_path).await?;
    let text = read_script(script).await?;
    let steps = parse_script(&text)?;

    let location = deck_location(deck_path, args.fragment.as_deref())?;
    let snap = args.apply(&config.snap);
    let mut sim = Simulation::new(&deck, location.as_str(), &args.selector, snap)?;

    info!(steps = steps.len(), "Running simulation");
    let trace: Vec<TraceRecord> = steps
        .into_iter()
        .map(|(line, source, step)| sim.apply(line, source, step))
        .collect();

    println!("{}", serde_json::to_string_pretty(&trace)?);
    Ok(())
}

async fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read script {}", path.display()))
    }
}

/// Parse a script into (line number, source text, step) triples
pub fn parse_script(text: &str) -> Result<Vec<(usize, String, Step)>> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        // `hash` ids are written without their leading '#'
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}: '{}'", i + 1, raw.trim()))?;
        steps.push((i + 1, line.to_string(), step));
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (command, rest) = words
        .split_first()
        .ok_or_else(|| anyhow!("empty step"))?;

    let step = match (*command, rest) {
        ("goto", [n]) => Step::GoTo(n.parse()?),
        ("wheel", [dir, at @ ..]) => Step::Wheel {
            down: parse_direction(dir, "down", "up")?,
            at: parse_at(at)?,
        },
        ("key", [name, at @ ..]) => Step::Key {
            key: match *name {
                "up" => Key::ArrowUp,
                "down" => Key::ArrowDown,
                other => Key::Other(other.to_string()),
            },
            at: parse_at(at)?,
        },
        ("swipe", [dir, at @ ..]) => Step::Swipe {
            up: parse_direction(dir, "up", "down")?,
            at: parse_at(at)?,
        },
        ("hash", [id]) => Step::Hash(id.to_string()),
        ("dot", [n]) => Step::Dot(n.parse()?),
        ("frame", []) => Step::Frame,
        ("resize", [w, h]) => Step::Resize(w.parse()?, h.parse()?),
        ("destroy", []) => Step::Destroy,
        ("rebuild", []) => Step::Rebuild,
        ("height", [n, px]) => Step::Height(n.parse()?, px.parse()?),
        ("scroll", [top]) => Step::Scroll(top.parse()?),
        _ => bail!("unrecognized step"),
    };
    Ok(step)
}

/// `true` for `yes`, `false` for `no`
fn parse_direction(word: &str, yes: &str, no: &str) -> Result<bool> {
    if word == yes {
        Ok(true)
    } else if word == no {
        Ok(false)
    } else {
        bail!("expected '{}' or '{}', got '{}'", yes, no, word)
    }
}

fn parse_at(words: &[&str]) -> Result<Option<u64>> {
    match words {
        [] => Ok(None),
        ["at", ms] => Ok(Some(ms.parse()?)),
        _ => bail!("expected 'at MS'"),
    }
}

/// Headless controller with a simulated clock
pub struct Simulation {
    controller: Controller<HeadlessHost>,
    callbacks: Rc<RefCell<Vec<String>>>,
    base: Instant,
    clock_ms: u64,
    step_ms: u64,
}

impl Simulation {
    pub fn new(deck: &Deck, location: &str, selector: &str, snap: SnapConfig) -> Result<Self> {
        let host = HeadlessHost::from_deck(deck, location, VIEWPORT)?;

        let callbacks = Rc::new(RefCell::new(Vec::new()));
        let leave = callbacks.clone();
        let load = callbacks.clone();
        let hooks = Hooks::new()
            .on_before_leave(move |from, to| {
                leave.borrow_mut().push(format!("before_leave({from}, {to})"))
            })
            .on_after_load(move |index| load.borrow_mut().push(format!("after_load({index})")));

        let step_ms = snap.delay().as_millis() as u64;
        let controller = Controller::new(host, selector, snap, hooks)?;

        Ok(Self {
            controller,
            callbacks,
            base: Instant::now(),
            clock_ms: 0,
            step_ms,
        })
    }

    /// Move the clock for an input step and return the event time
    fn tick(&mut self, at: Option<u64>) -> Instant {
        self.clock_ms = at.unwrap_or(self.clock_ms + self.step_ms);
        self.base + Duration::from_millis(self.clock_ms)
    }

    pub fn apply(&mut self, line: usize, source: String, step: Step) -> TraceRecord {
        let mut outcome = None;
        let mut prevented = None;

        match step {
            Step::GoTo(index) => outcome = Some(self.controller.go_to(index)),
            Step::Wheel { down, at } => {
                let at = self.tick(at);
                let delta_y = if down { 100.0 } else { -100.0 };
                let result = self.controller.dispatch(HostEvent::Wheel { delta_y, at });
                prevented = Some(result.default_prevented);
            }
            Step::Key { key, at } => {
                let at = self.tick(at);
                self.controller.dispatch(HostEvent::KeyDown { key, at });
            }
            Step::Swipe { up, at } => {
                let start = self.tick(at);
                let end = start + Duration::from_millis(SWIPE_MS);
                let from = VIEWPORT.height / 2.0;
                let to = if up { from - SWIPE_DISTANCE } else { from + SWIPE_DISTANCE };
                self.controller.dispatch(HostEvent::Touch {
                    phase: TouchPhase::Start,
                    y: from,
                    at: start,
                });
                self.controller.dispatch(HostEvent::Touch {
                    phase: TouchPhase::End,
                    y: to,
                    at: end,
                });
                self.clock_ms += SWIPE_MS;
            }
            Step::Hash(id) => {
                self.controller.host_mut().navigate_fragment(&id);
                self.controller.dispatch(HostEvent::HashChange);
            }
            Step::Dot(index) => {
                self.controller.dispatch(HostEvent::DotClick(index));
            }
            Step::Frame => {
                self.controller.flush_frames();
            }
            Step::Resize(width, height) => {
                self.controller.host_mut().set_viewport(Viewport::new(width, height));
            }
            Step::Destroy => {
                self.controller.destroy();
            }
            Step::Rebuild => {
                self.controller.rebuild();
            }
            Step::Height(index, height) => {
                let client_height = self.controller.host().viewport().height;
                self.controller.host_mut().set_metrics(
                    index,
                    ScrollMetrics {
                        scroll_top: 0.0,
                        scroll_height: height.max(client_height),
                        client_height,
                    },
                );
            }
            Step::Scroll(top) => {
                let current = self.controller.current();
                self.controller.host_mut().scroll_section(current, top);
            }
        }

        let host = self.controller.host();
        TraceRecord {
            line,
            step: source,
            time_ms: self.clock_ms,
            outcome,
            default_prevented: prevented,
            current: self.controller.current(),
            phase: self.controller.phase(),
            offset: host.offset(),
            fragment: host.location().fragment().map(str::to_string),
            commits: self.controller.commit_count(),
            callbacks: std::mem::take(&mut *self.callbacks.borrow_mut()),
        }
    }
}
