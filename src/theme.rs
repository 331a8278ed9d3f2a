//! Color themes shared by the terminal UI and the DOM page.
//!
//! Colors are plain RGB so the same scheme can drive ratatui styles and be
//! exported as CSS custom properties.

use ratatui::style::Color;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Available color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Nord-inspired (default)
    #[default]
    Nord,
    /// Bright white on blue
    DosBlue,
    /// Amber text on black
    AmberCrt,
    /// Green text on black
    GreenPhosphor,
}

impl Theme {
    /// Parse theme name from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "nord" => Ok(Theme::Nord),
            "dos" | "dosblue" | "dos-blue" => Ok(Theme::DosBlue),
            "amber" | "ambercrt" | "amber-crt" => Ok(Theme::AmberCrt),
            "green" | "greenphosphor" | "green-phosphor" => Ok(Theme::GreenPhosphor),
            _ => Err(format!(
                "Unknown theme '{}'. Available: nord, dos-blue, amber-crt, green-phosphor",
                s
            )),
        }
    }

    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Nord => ColorScheme::nord(),
            Theme::DosBlue => ColorScheme::dos_blue(),
            Theme::AmberCrt => ColorScheme::amber_crt(),
            Theme::GreenPhosphor => ColorScheme::green_phosphor(),
        }
    }

    /// CSS custom properties for the DOM page, e.g. `("--cb-text", "#eceff4")`.
    pub fn to_css_vars(&self) -> Vec<(&'static str, String)> {
        let c = self.colors();
        vec![
            ("--cb-bg", c.background.to_css()),
            ("--cb-panel", c.panel.to_css()),
            ("--cb-text", c.text.to_css()),
            ("--cb-text-dim", c.text_dim.to_css()),
            ("--cb-accent", c.accent.to_css()),
            ("--cb-border", c.border.to_css()),
            ("--cb-selection-bg", c.selection_bg.to_css()),
            ("--cb-selection-fg", c.selection_fg.to_css()),
            ("--cb-ok", c.toast_success.to_css()),
            ("--cb-error", c.toast_error.to_css()),
        ]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Nord => write!(f, "nord"),
            Theme::DosBlue => write!(f, "dos-blue"),
            Theme::AmberCrt => write!(f, "amber-crt"),
            Theme::GreenPhosphor => write!(f, "green-phosphor"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub background: Rgb,
    /// Pane background
    pub panel: Rgb,
    pub text: Rgb,
    /// Secondary info, key hints
    pub text_dim: Rgb,
    /// Focused border and titles
    pub accent: Rgb,
    /// Unfocused border
    pub border: Rgb,
    pub selection_bg: Rgb,
    pub selection_fg: Rgb,
    pub toast_success: Rgb,
    pub toast_error: Rgb,
}

impl ColorScheme {
    pub fn nord() -> Self {
        Self {
            background: Rgb(0x2e, 0x34, 0x40),
            panel: Rgb(0x2e, 0x34, 0x40),
            text: Rgb(0xec, 0xef, 0xf4),
            text_dim: Rgb(0xb4, 0xbc, 0xcc),
            accent: Rgb(0xeb, 0xcb, 0x8b),
            border: Rgb(0x81, 0x8c, 0xa0),
            selection_bg: Rgb(0x88, 0xc0, 0xd0),
            selection_fg: Rgb(0x2e, 0x34, 0x40),
            toast_success: Rgb(0xa3, 0xbe, 0x8c),
            toast_error: Rgb(0xef, 0x8a, 0x8f),
        }
    }

    pub fn dos_blue() -> Self {
        Self {
            background: Rgb(0, 0, 0xaa),
            panel: Rgb(0, 0, 0xaa),
            text: Rgb(0xff, 0xff, 0xff),
            text_dim: Rgb(0xd0, 0xd8, 0xff),
            accent: Rgb(0xff, 0xff, 0x55),
            border: Rgb(0x55, 0xff, 0xff),
            selection_bg: Rgb(0x55, 0xff, 0xff),
            selection_fg: Rgb(0, 0, 0),
            toast_success: Rgb(0x55, 0xff, 0x55),
            toast_error: Rgb(0xff, 0xaa, 0xaa),
        }
    }

    pub fn amber_crt() -> Self {
        let amber = Rgb(255, 176, 0);
        Self {
            background: Rgb(0, 0, 0),
            panel: Rgb(0, 0, 0),
            text: amber,
            text_dim: Rgb(200, 140, 20),
            accent: Rgb(255, 200, 100),
            border: Rgb(180, 120, 0),
            selection_bg: amber,
            selection_fg: Rgb(0, 0, 0),
            toast_success: Rgb(100, 255, 100),
            toast_error: Rgb(255, 90, 90),
        }
    }

    pub fn green_phosphor() -> Self {
        let green = Rgb(0, 255, 0);
        Self {
            background: Rgb(0, 0, 0),
            panel: Rgb(0, 0, 0),
            text: green,
            text_dim: Rgb(0, 190, 0),
            accent: Rgb(100, 255, 100),
            border: Rgb(0, 180, 0),
            selection_bg: green,
            selection_fg: Rgb(0, 0, 0),
            toast_success: Rgb(100, 255, 100),
            toast_error: Rgb(255, 80, 80),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::nord()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!(Theme::from_str("nord").unwrap(), Theme::Nord);
        assert_eq!(Theme::from_str("NORD").unwrap(), Theme::Nord);
        assert_eq!(Theme::from_str("dos-blue").unwrap(), Theme::DosBlue);
        assert_eq!(Theme::from_str("amber").unwrap(), Theme::AmberCrt);
        assert_eq!(Theme::from_str("green").unwrap(), Theme::GreenPhosphor);
        assert!(Theme::from_str("invalid").is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for theme in [Theme::Nord, Theme::DosBlue, Theme::AmberCrt, Theme::GreenPhosphor] {
            assert_eq!(Theme::from_str(&theme.to_string()).unwrap(), theme);
        }
    }

    #[test]
    fn css_vars_are_hex() {
        let vars = Theme::Nord.to_css_vars();
        assert!(vars.iter().all(|(name, v)| name.starts_with("--cb-") && v.len() == 7 && v.starts_with('#')));
        assert_eq!(Rgb(0x2e, 0x34, 0x40).to_css(), "#2e3440");
    }
}
