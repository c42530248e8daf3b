use pagesnap_core::config::ThemeColorOverrides;
use ratatui::style::Color;
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg: Color,
    pub status_bg: Color,

    // Foreground colors
    pub fg: Color,
    pub muted: Color,

    // Semantic colors
    pub accent: Color,
    pub dot: Color,
    pub dot_active: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg: Color::Rgb(0x28, 0x28, 0x28),
            status_bg: Color::Rgb(0x45, 0x40, 0x3d),
            fg: Color::Rgb(0xd4, 0xbe, 0x98),
            muted: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            dot: Color::Rgb(0x7c, 0x6f, 0x64),
            dot_active: Color::Rgb(0xd8, 0xa6, 0x57),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        }
    }
}

impl Theme {
    /// Default theme with any configured overrides applied
    pub fn from_overrides(overrides: &ThemeColorOverrides) -> Self {
        let mut theme = Self::default();
        let slots: [(&Option<String>, &mut Color, &str); 6] = [
            (&overrides.bg, &mut theme.bg, "bg"),
            (&overrides.fg, &mut theme.fg, "fg"),
            (&overrides.accent, &mut theme.accent, "accent"),
            (&overrides.dot, &mut theme.dot, "dot"),
            (&overrides.dot_active, &mut theme.dot_active, "dot_active"),
            (&overrides.status_bg, &mut theme.status_bg, "status_bg"),
        ];

        for (value, slot, name) in slots {
            let Some(value) = value else { continue };
            match parse_hex_color(value) {
                Some(color) => *slot = color,
                None => warn!("Invalid color for theme.{}: '{}', using default", name, value),
            }
        }
        theme
    }
}

/// Parse "#rrggbb" or "rrggbb"
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
