pub mod config;
pub mod controller;
pub mod deck;
pub mod error;
pub mod hash;
pub mod headless;
pub mod hooks;
pub mod host;
pub mod indicator;
pub mod input;
pub mod navigation;
pub mod scheduler;
pub mod state;

pub use config::{AppConfig, EasingType, KeymapConfig, SnapConfig, UiConfig};
pub use controller::Controller;
pub use deck::{Container, Deck, DeckSection};
pub use error::{Error, Result};
pub use headless::HeadlessHost;
pub use hooks::Hooks;
pub use host::{
    EventKind, EventOutcome, FrameHandle, Host, HostEvent, Key, ScrollMetrics, Section, Viewport,
};
pub use indicator::Dot;
pub use input::{SwipeConfig, SwipeRecognizer, TouchPhase};
pub use navigation::NavOutcome;
pub use state::Phase;
