use std::collections::HashMap;

use ratatui::style::Color;

use crate::config::UiConfig;
use crate::model::Priority;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub lane_border: Color,
    /// Border of the lane the drag currently hovers
    pub drop_active: Color,
    pub placeholder: Color,
    pub selection_border: Color,
    pub urgent: Color,
    pub medium: Color,
    pub low: Color,
    pub progress_done: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    pub error: Color,
    /// Per-category badge colors
    pub category_colors: HashMap<String, Color>,
    pub category_default: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let mut category_colors = HashMap::new();
        category_colors.insert("User Story".into(), Color::Rgb(0x00, 0x38, 0xFF));
        category_colors.insert("Technical Task".into(), Color::Rgb(0x1F, 0xD7, 0xC1));

        Theme {
            background: Color::Rgb(0x10, 0x14, 0x19),
            text: Color::Rgb(0xCD, 0xD6, 0xF4),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6C, 0x70, 0x86),
            highlight: Color::Rgb(0x29, 0xAB, 0xE2),
            lane_border: Color::Rgb(0x2A, 0x36, 0x47),
            drop_active: Color::Rgb(0x29, 0xAB, 0xE2),
            placeholder: Color::Rgb(0x42, 0x52, 0x6E),
            selection_border: Color::Rgb(0x29, 0xAB, 0xE2),
            urgent: Color::Rgb(0xFF, 0x3D, 0x00),
            medium: Color::Rgb(0xFF, 0xA8, 0x00),
            low: Color::Rgb(0x7A, 0xE2, 0x29),
            progress_done: Color::Rgb(0x45, 0x89, 0xFF),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x10, 0x14, 0x19),
            error: Color::Rgb(0xFF, 0x44, 0x44),
            category_colors,
            category_default: Color::Rgb(0x2A, 0x36, 0x47),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
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
    /// Create a theme from the config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "highlight" => theme.highlight = color,
                    "lane_border" => theme.lane_border = color,
                    "drop_active" => theme.drop_active = color,
                    "placeholder" => theme.placeholder = color,
                    "selection_border" => theme.selection_border = color,
                    "urgent" => theme.urgent = color,
                    "medium" => theme.medium = color,
                    "low" => theme.low = color,
                    "progress_done" => theme.progress_done = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    "error" => theme.error = color,
                    _ => {}
                }
            }
        }
        theme
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Urgent => self.urgent,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    /// Badge color for a category label
    pub fn category_color(&self, category: &str) -> Color {
        self.category_colors
            .get(category)
            .copied()
            .unwrap_or(self.category_default)
    }

    /// Avatar color for a contact's stored hex color
    pub fn contact_color(&self, hex: &str) -> Color {
        parse_hex_color(hex).unwrap_or(self.category_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00FF00"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors
            .insert("background".to_string(), "#000000".to_string());
        ui.colors.insert("bogus".to_string(), "#111111".to_string());
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        // Unknown keys are ignored, defaults stay put.
        assert_eq!(theme.urgent, Theme::default().urgent);
    }

    #[test]
    fn test_category_colors() {
        let theme = Theme::default();
        assert_ne!(
            theme.category_color("User Story"),
            theme.category_color("Technical Task")
        );
        assert_eq!(theme.category_color("anything"), theme.category_default);
    }
}
