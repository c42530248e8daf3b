use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Fallback transition delay when none (or zero) is configured
pub const DEFAULT_DELAY_MS: u64 = 700;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Navigation controller options, fixed for the lifetime of a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Throttle window and transition duration in milliseconds (0 = default)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Wrap from the last section to the first and back
    #[serde(default, rename = "loop")]
    pub loop_sections: bool,
    /// Mirror the current section into the location fragment
    #[serde(default)]
    pub hash: bool,
    /// Viewport width below which navigation is disabled
    #[serde(default)]
    pub disable_below: u32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            loop_sections: false,
            hash: false,
            disable_below: 0,
        }
    }
}

impl SnapConfig {
    /// Effective transition delay; a zero delay counts as unset
    pub fn delay(&self) -> Duration {
        if self.delay_ms == 0 {
            Duration::from_millis(DEFAULT_DELAY_MS)
        } else {
            Duration::from_millis(self.delay_ms)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate used while a transition is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Easing curve for the section transition
    #[serde(default)]
    pub easing: EasingType,
    /// Minimum drag distance (terminal rows) to count as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,
    /// Minimum drag velocity (rows per millisecond) to count as a swipe
    #[serde(default = "default_swipe_velocity")]
    pub swipe_velocity: f64,
    /// Theme color overrides
    #[serde(default)]
    pub theme: ThemeColorOverrides,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
            swipe_threshold: default_swipe_threshold(),
            swipe_velocity: default_swipe_velocity(),
            theme: ThemeColorOverrides::default(),
        }
    }
}

/// Easing curve applied to the container offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump straight to the target
    None,
    Linear,
    /// CSS `ease`, cubic-bezier(0.25, 0.1, 0.25, 1.0)
    #[default]
    Ease,
    /// Cubic ease-out
    EaseOut,
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg: Option<String>,
    pub fg: Option<String>,
    pub accent: Option<String>,
    pub dot: Option<String>,
    pub dot_active: Option<String>,
    pub status_bg: Option<String>,
}

/// Viewer keymap using Vim-style notation
/// Format: "q", "<C-c>", "<S-g>", "<CR>", "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the viewer
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Tear the controller down
    #[serde(default = "default_key_destroy")]
    pub destroy: String,
    /// Rebuild a destroyed controller
    #[serde(default = "default_key_rebuild")]
    pub rebuild: String,
    /// Prompt for a location fragment
    #[serde(default = "default_key_fragment")]
    pub fragment: String,
    /// Jump to the first section
    #[serde(default = "default_key_first")]
    pub first: String,
    /// Jump to the last section
    #[serde(default = "default_key_last")]
    pub last: String,
    /// Scroll the current section down without snapping
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    /// Scroll the current section up without snapping
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            destroy: default_key_destroy(),
            rebuild: default_key_rebuild(),
            fragment: default_key_fragment(),
            first: default_key_first(),
            last: default_key_last(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_destroy() -> String { "x".to_string() }
fn default_key_rebuild() -> String { "b".to_string() }
fn default_key_fragment() -> String { "#".to_string() }
fn default_key_first() -> String { "<Home>".to_string() }
fn default_key_last() -> String { "<End>".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagesnap")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_swipe_threshold() -> f64 {
    3.0 // Terminal rows, not pixels
}

fn default_swipe_velocity() -> f64 {
    0.01
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pagesnap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pagesnap")
            .join("config.toml")
    }

    /// Get the log file path used while the terminal viewer is running
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("pagesnap.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
