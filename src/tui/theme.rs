use ratatui::style::Color;

/// Fixed color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub done: Color,
    pub title: Color,
    pub help: Color,
    pub error: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0A, 0x0F, 0x0A),
            text: Color::Rgb(0x62, 0xD9, 0x6B),
            done: Color::Rgb(0x3A, 0x6B, 0x3E),
            title: Color::Rgb(0xE8, 0xC5, 0x47),
            help: Color::Rgb(0x4F, 0xC3, 0xD9),
            error: Color::Rgb(0xE8, 0x5D, 0x5D),
            cursor_fg: Color::Rgb(0x0A, 0x0F, 0x0A),
            cursor_bg: Color::Rgb(0x62, 0xD9, 0x6B),
            selection_bg: Color::Rgb(0x1E, 0x3A, 0x2E),
        }
    }
}
