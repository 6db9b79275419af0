use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 20, 18);
pub const SURFACE: Color = Color::Rgb(22, 31, 28);
pub const BORDER: Color = Color::Rgb(44, 64, 56);
pub const TEXT: Color = Color::Rgb(226, 222, 204);
pub const TEXT_DIM: Color = Color::Rgb(112, 124, 112);
pub const GOLD: Color = Color::Rgb(196, 160, 68);
pub const TURQUOISE: Color = Color::Rgb(72, 170, 160);
pub const AMBER: Color = Color::Rgb(210, 138, 60);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn turquoise() -> Style {
    Style::default().fg(TURQUOISE)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}
