//! Viewer colours: chrome roles per theme, node colours from the palette.

use crate::config::Palette;
use crate::render::NodeKind;
use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Colour roles for everything around the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Panel titles and the recipe counter
    pub title: Color,
    /// Selected values and key hints
    pub highlight: Color,
    pub separator: Color,
    pub border: Color,
    pub canvas_border: Color,
    pub text: Color,
    /// Secondary text: labels in the details panel, hints
    pub hint: Color,
    pub warning: Color,
    pub error: Color,
}

impl ColorScheme {
    pub const DARK: Self = Self {
        title: Color::Green,
        highlight: Color::Yellow,
        separator: Color::DarkGray,
        border: Color::DarkGray,
        canvas_border: Color::Green,
        text: Color::White,
        hint: Color::Gray,
        warning: Color::Yellow,
        error: Color::LightRed,
    };

    pub const LIGHT: Self = Self {
        title: Color::Rgb(46, 125, 50),
        highlight: Color::Rgb(191, 144, 0),
        separator: Color::Rgb(158, 158, 158),
        border: Color::Rgb(189, 189, 189),
        canvas_border: Color::Rgb(46, 125, 50),
        text: Color::Rgb(33, 33, 33),
        hint: Color::Rgb(97, 97, 97),
        warning: Color::Rgb(230, 81, 0),
        error: Color::Rgb(198, 40, 40),
    };
}

/// Viewer theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn colors(self) -> ColorScheme {
        match self {
            Self::Dark => ColorScheme::DARK,
            Self::Light => ColorScheme::LIGHT,
        }
    }
}

/// Active theme, switchable at runtime with `T`.
static THEME: RwLock<Theme> = RwLock::new(Theme::Dark);

pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Switch to the other theme and return its name.
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name()
}

/// Colours of the active theme.
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors()
}

/// Parse `#rgb` or `#rrggbb`.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            let (r, g, b) = (digits.next()??, digits.next()??, digits.next()??);
            Some(Color::Rgb(r, g, b))
        }
        6 => Some(Color::Rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

/// Terminal color for a node kind. Unparseable palette entries fall back
/// to the separator colour.
pub fn node_color(kind: NodeKind, palette: &Palette) -> Color {
    parse_hex(kind.color(palette)).unwrap_or_else(|| colors().separator)
}

pub fn link_color(palette: &Palette) -> Color {
    parse_hex(&palette.link).unwrap_or_else(|| colors().border)
}

/// Key hints shown in the footer.
pub const FOOTER_HINTS: [(&str, &str); 8] = [
    ("←↑↓→/hjkl", "pan"),
    ("+/-", "zoom"),
    ("0", "reset"),
    ("n/p", "tree"),
    ("e", "export"),
    ("T", "theme"),
    ("?", "help"),
    ("q", "quit"),
];

/// `[key]desc` spans separated by single spaces.
pub fn hint_spans(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let scheme = colors();
    let key_style = Style::default().fg(scheme.highlight).bold();
    let desc_style = Style::default().fg(scheme.hint);

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, desc) in hints {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), key_style));
        spans.push(Span::styled((*desc).to_string(), desc_style));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FFEB3B"), Some(Color::Rgb(255, 235, 59)));
        assert_eq!(parse_hex("#ccc"), Some(Color::Rgb(204, 204, 204)));
        assert_eq!(parse_hex("ccc"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_default_palette_maps_to_rgb() {
        let palette = Palette::default();
        for kind in NodeKind::ALL {
            assert!(matches!(node_color(kind, &palette), Color::Rgb(..)));
        }
        assert_eq!(link_color(&palette), Color::Rgb(204, 204, 204));
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_name("LIGHT"), Theme::Light);
        assert_eq!(Theme::from_name("solarized"), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Light);
        assert_eq!(Theme::Light.next().name(), "dark");
        assert_ne!(Theme::Dark.colors(), Theme::Light.colors());
    }

    #[test]
    fn test_hint_spans_layout() {
        let spans = hint_spans(&[("q", "quit"), ("?", "help")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[q]quit [?]help");
    }
}
