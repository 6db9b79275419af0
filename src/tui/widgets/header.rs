use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub struct HeaderDates<'a> {
    pub location: &'a str,
    pub gregorian: &'a str,
    pub persian: &'a str,
    pub hijri: &'a str,
}

pub fn render(frame: &mut Frame, area: Rect, dates: &HeaderDates) {
    let title_line = Line::from(vec![
        Span::styled("  مِنبَر  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("minbar", theme::gold()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(dates.location, theme::turquoise()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(dates.gregorian, theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(dates.persian, theme::turquoise()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(dates.hijri, theme::amber()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, Line::from(""), date_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
