use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Headings and the active tab
    pub accent: Color,
    /// Section tab and box border color
    pub border: Color,
    /// Active tab background
    pub selected_bg: Color,
    /// Wrong answers, expired rounds
    pub error: Color,
    /// Correct answers
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Visitor's chat lines
    pub user: Color,
    /// Bot chat lines
    pub bot: Color,
    /// Brain-mode glyphs at full brightness
    pub rain: (u8, u8, u8),
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            accent: Color::Rgb { r: 255, g: 120, b: 200 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            user: Color::Rgb { r: 80, g: 180, b: 255 },
            bot: Color::Rgb { r: 200, g: 160, b: 255 },
            rain: (0, 255, 0),
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Yellow,
            border: Color::Grey,
            selected_bg: Color::Blue,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
            user: Color::Cyan,
            bot: Color::Magenta,
            rain: (255, 255, 255),
        }
    }
}
