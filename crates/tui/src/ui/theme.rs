use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    /// Roster entry waiting for its replacement.
    pub armed: Color,
    pub border: Color,
    pub positive: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            armed: Color::Rgb(230, 180, 60),
            border: Color::Rgb(70, 80, 90),
            positive: Color::Rgb(90, 180, 110),
            warning: Color::Rgb(220, 150, 60),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
