use chrono::NaiveTime;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{NextPrayer, PrayerTimesOfDay};
use crate::prayer_times::clock::{has_passed, is_tomorrow};
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    times: Option<&PrayerTimesOfDay>,
    next: Option<&NextPrayer>,
    now: NaiveTime,
) {
    let block = Block::default()
        .title(Span::styled(" Prayer Times ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let Some(times) = times else {
        let list = List::new(vec![ListItem::new(Span::styled("  No times loaded", theme::dim()))])
            .block(block);
        frame.render_widget(list, area);
        return;
    };

    let items: Vec<ListItem> = times
        .entries()
        .into_iter()
        .map(|(prayer, clock)| {
            let is_next = next.is_some_and(|n| n.name == prayer.display_name());
            let (icon, name_style, time_style) = if is_next {
                (
                    "▶",
                    theme::gold().add_modifier(Modifier::BOLD),
                    theme::amber().add_modifier(Modifier::BOLD),
                )
            } else if has_passed(clock, now) {
                ("·", theme::dim(), theme::dim())
            } else {
                (" ", theme::bold(), theme::turquoise())
            };

            let mut spans = vec![
                Span::styled(format!(" {} ", icon), name_style),
                Span::styled(format!("{:<9}", prayer.display_name()), name_style),
                Span::styled(clock.to_string(), time_style),
            ];
            if is_next && next.is_some_and(|n| is_tomorrow(n, now)) {
                spans.push(Span::styled(" (tomorrow)", theme::dim()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
