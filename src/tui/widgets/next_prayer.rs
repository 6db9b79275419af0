use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::models::NextPrayer;
use crate::tui::theme;
use crate::utils::format::format_duration_mins;

pub fn render(frame: &mut Frame, area: Rect, next: Option<&NextPrayer>, minutes_left: Option<u32>) {
    let block = Block::default()
        .title(Span::styled(" Next Prayer ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(next) = next else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("  No data", theme::dim()))),
            inner,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // spacer
            Constraint::Length(4), // banner
            Constraint::Length(1), // spacer
            Constraint::Min(0),    // clock + countdown
        ])
        .split(inner);

    let banner = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::gold().add_modifier(Modifier::BOLD))
        .lines(vec![Line::from(format!(" {}", next.name.to_uppercase()))])
        .build();
    frame.render_widget(banner, chunks[1]);

    let countdown = minutes_left
        .map(format_duration_mins)
        .unwrap_or_else(|| "--".to_string());

    let details = vec![
        Line::from(vec![
            Span::styled("  at  ", theme::dim()),
            Span::styled(next.time.as_str(), theme::turquoise().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("  in  ", theme::dim()),
            Span::styled(countdown, theme::amber().add_modifier(Modifier::BOLD)),
        ]),
    ];
    frame.render_widget(Paragraph::new(details), chunks[3]);
}
