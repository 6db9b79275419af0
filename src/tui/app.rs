use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::calendar::GregorianDate;
use crate::config::AppConfig;
use crate::models::{NextPrayer, PrayerTimesOfDay};
use crate::prayer_times::{minutes_until, next_prayer, TimesProvider};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::header::HeaderDates;
use crate::tui::widgets::{header, next_prayer as next_prayer_widget, prayers, statusbar};
use crate::utils::hijri::hijri_string;

pub struct App {
    pub config: AppConfig,
    provider: TimesProvider,
    pub should_quit: bool,
    pub show_help: bool,

    // Per-day state, rebuilt when the date changes
    pub date: NaiveDate,
    pub gregorian_str: String,
    pub persian_str: String,
    pub hijri_str: String,
    pub times: Option<PrayerTimesOfDay>,
    pub load_error: Option<String>,

    // Per-tick state
    pub now: NaiveTime,
    pub next: Option<NextPrayer>,
    pub minutes_left: Option<u32>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let provider = TimesProvider::from_config(&config)?;
        let now = Local::now();
        Ok(App {
            config,
            provider,
            should_quit: false,
            show_help: false,
            date: now.date_naive(),
            gregorian_str: String::new(),
            persian_str: String::new(),
            hijri_str: String::new(),
            times: None,
            load_error: None,
            now: now.time(),
            next: None,
            minutes_left: None,
        })
    }

    /// Resolve the dates and the prayer table for `date`.
    pub fn load_day(&mut self, conn: &Connection, date: NaiveDate) {
        self.date = date;
        self.gregorian_str = date.format("%A, %b %-d, %Y").to_string();
        self.persian_str = GregorianDate::from(date).to_persian().formatted();
        self.hijri_str = hijri_string(date, self.config.board.hijri_offset);

        match self.provider.times_for_date(conn, date) {
            Ok(times) => {
                self.times = Some(times);
                self.load_error = None;
            }
            Err(e) => {
                log::warn!("Could not load prayer times for {}: {:#}", date, e);
                self.times = None;
                self.load_error = Some(format!("{:#}", e));
            }
        }
    }

    /// Re-run the selector for the given moment, reloading the day first if
    /// the date rolled over.
    pub fn refresh_at(&mut self, conn: &Connection, date: NaiveDate, now: NaiveTime) {
        if date != self.date || (self.times.is_none() && self.load_error.is_none()) {
            log::debug!("Loading day {}", date);
            self.load_day(conn, date);
        }
        self.now = now;
        match &self.times {
            Some(times) => {
                let next = next_prayer(times, now);
                self.minutes_left = minutes_until(&next.time, now);
                self.next = Some(next);
            }
            None => {
                self.next = None;
                self.minutes_left = None;
            }
        }
    }

    pub fn tick(&mut self, conn: &Connection) {
        let now = Local::now();
        self.refresh_at(conn, now.date_naive(), now.time());
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('r') => {
                let date = self.date;
                self.load_day(conn, date);
                self.tick(conn);
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_board(frame);
        if self.show_help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_board(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer_chunks[0],
            &HeaderDates {
                location: &self.config.board.location_name,
                gregorian: &self.gregorian_str,
                persian: &self.persian_str,
                hijri: &self.hijri_str,
            },
        );
        statusbar::render(frame, outer_chunks[2], self.provider.label());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(outer_chunks[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[0]);

        prayers::render(
            frame,
            left[0],
            self.times.as_ref(),
            self.next.as_ref(),
            self.now,
        );

        if let Some(err) = &self.load_error {
            let msg = Paragraph::new(vec![
                Line::from(Span::styled("  Could not load times:", theme::amber())),
                Line::from(Span::styled(format!("  {}", err), theme::dim())),
            ]);
            frame.render_widget(msg, left[1]);
        }

        next_prayer_widget::render(
            frame,
            columns[1],
            self.next.as_ref(),
            self.minutes_left,
        );
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(8).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  [r]        ", theme::gold()),
                Span::styled("Reload today's times", theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("  [?]        ", theme::gold()),
                Span::styled("Toggle help", theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("  [q] / Esc  ", theme::gold()),
                Span::styled("Quit", theme::dim()),
            ]),
        ];

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the board: redraw and re-select the next prayer on every tick.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let tick_rate = config.board.tick_rate_ms;
    let mut app = App::new(config)?;
    app.tick(&conn);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                Event::Resize => {}
                Event::Tick => app.tick(&conn),
            }
        }
    })();

    ratatui::restore();
    result
}
