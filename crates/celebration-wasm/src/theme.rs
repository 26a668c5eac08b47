//! Color themes for the canvas effects

use serde::{Deserialize, Serialize};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn as_css_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Colors and fonts used when drawing the page's canvases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Fill used to dim the rain surface between frames
    pub rain_fade: Color,
    /// Falling glyph color
    pub rain_glyph: Color,
    /// Font family for glyphs
    pub glyph_font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default): green glyphs on black
    pub fn dark() -> Self {
        Self {
            rain_fade: Color::new(0, 0, 0),
            rain_glyph: Color::new(0, 255, 0),
            glyph_font: "monospace".to_string(),
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            rain_fade: Color::new(0, 0, 0),
            rain_glyph: Color::new(255, 255, 255),
            glyph_font: "'JetBrains Mono', 'Fira Code', 'Consolas', monospace".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "high_contrast" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}
