use ratatui::style::Color;

use crate::model::blank::BlankId;
use crate::model::config::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x10, 0x20),
            text: Color::Rgb(0xC8, 0xC8, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x41, 0xA6, 0xF6),
            dim: Color::Rgb(0x70, 0x70, 0x88),
            red: Color::Rgb(0xFF, 0x53, 0x53),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x53, 0xE0, 0x8A),
            selection_bg: Color::Rgb(0x26, 0x30, 0x48),
            selection_border: Color::Rgb(0x41, 0xA6, 0xF6),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from bank UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// The display color of a blank: its id read as RGB.
    pub fn blank_color(&self, id: &BlankId) -> Color {
        let (r, g, b) = id.rgb();
        Color::Rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF4444"), Some(Color::Rgb(0xFF, 0x44, 0x44)));
        assert_eq!(parse_hex_color("#000000"), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(parse_hex_color("FF4444"), None); // missing '#'
        assert_eq!(parse_hex_color("#FFF"), None); // short form unsupported
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut colors = IndexMap::new();
        colors.insert("highlight".to_string(), "#123456".to_string());
        colors.insert("bogus_key".to_string(), "#FFFFFF".to_string());
        colors.insert("red".to_string(), "not-a-color".to_string());
        let ui = UiConfig { colors };

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.highlight, Color::Rgb(0x12, 0x34, 0x56));
        // Invalid value leaves the default in place
        assert_eq!(theme.red, Theme::default().red);
    }

    #[test]
    fn test_blank_color_follows_id() {
        let theme = Theme::default();
        let id = BlankId::parse("a1b2c3").unwrap();
        assert_eq!(theme.blank_color(&id), Color::Rgb(0xa1, 0xb2, 0xc3));
    }
}
