use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub accent: Color,
    pub positive: Color,
    pub warning: Color,
    pub error: Color,
    /// Dark and light modules of the QR preview.
    pub qr_dark: Color,
    pub qr_light: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
            accent: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(110, 190, 110),
            warning: Color::Rgb(220, 180, 80),
            error: Color::Rgb(200, 80, 80),
            qr_dark: Color::Rgb(0, 0, 0),
            qr_light: Color::Rgb(255, 255, 255),
        }
    }
}
