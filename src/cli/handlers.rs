use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use rusqlite::Connection;
use serde::Serialize;

use crate::calendar::{gregorian_to_persian, GregorianDate, PersianDate};
use crate::cli::args::{CacheCommands, SetupArgs};
use crate::config::{AppConfig, TimesSource};
use crate::db::repository::{CacheRepo, MetaRepo};
use crate::models::{NextPrayer, PrayerTimesOfDay};
use crate::prayer_times::clock::{has_passed, is_tomorrow};
use crate::prayer_times::{minutes_until, next_prayer, PrayerCalculator, TimesProvider};
use crate::utils::format::{format_duration_mins, pad_display};
use crate::utils::hijri::to_hijri;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

const SETUP_CACHE_DAYS: u32 = 30;
const BOARD_CACHE_DAYS: u32 = 7;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts "3:00 PM", "3:00 pm" or "15:00".
pub fn parse_clock_arg(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| anyhow!("Invalid time '{}', expected H:MM AM/PM or HH:MM", s))
}

// ─── Setup ───────────────────────────────────────────────────────────────────

/// Merge setup flags into `config`, rejecting values the board could not use.
pub fn apply_setup(config: &AppConfig, args: &SetupArgs) -> Result<AppConfig> {
    let mut config = config.clone();
    if let Some(location) = &args.location {
        config.board.location_name = location.clone();
    }
    if let Some(lat) = args.lat {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(anyhow!("Latitude {} is outside -90..90", lat));
        }
        config.salah.latitude = lat;
    }
    if let Some(lng) = args.lng {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(anyhow!("Longitude {} is outside -180..180", lng));
        }
        config.salah.longitude = lng;
    }
    if let Some(method) = &args.method {
        config.salah.calc_method = method.clone();
    }
    if let Some(madhab) = &args.madhab {
        config.salah.madhab = madhab.clone();
    }
    if let Some(tz) = args.tz_offset {
        config.salah.timezone_offset = tz;
    }
    if let Some(offset) = args.hijri_offset {
        config.board.hijri_offset = offset;
    }
    if let Some(source) = args.source {
        config.board.source = source;
    }

    match config.board.source {
        TimesSource::Calculated => {
            PrayerCalculator::from_config(&config.salah)?;
        }
        TimesSource::Static => {
            config
                .times
                .validate()
                .context("The [times] table in config.toml is malformed")?;
        }
    }
    Ok(config)
}

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, args: &SetupArgs) -> Result<()> {
    if !args.reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("Minbar is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }

    let updated = apply_setup(config, args)?;
    updated.save()?;
    log::info!(
        "Saved config for {} (source: {})",
        updated.board.location_name,
        updated.board.source.as_str()
    );

    if updated.board.source == TimesSource::Calculated {
        CacheRepo::clear_all(conn)?;
        let calc = PrayerCalculator::from_config(&updated.salah)?;
        calc.ensure_cached(conn, Local::now().date_naive(), SETUP_CACHE_DAYS)?;
    }
    MetaRepo::set(conn, "setup_done", "1")?;
    *config = updated;

    println_colored!(GREEN, "  ✓ Configuration saved to {:?}", AppConfig::config_path()?);
    Ok(())
}

/// Keep a week of calculated times ready before the board starts.
pub fn warm_cache_for_board(conn: &Connection, config: &AppConfig) -> Result<()> {
    if config.board.source == TimesSource::Calculated {
        let calc = PrayerCalculator::from_config(&config.salah)?;
        calc.ensure_cached(conn, Local::now().date_naive(), BOARD_CACHE_DAYS)?;
    }
    Ok(())
}

// ─── Dates ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct DateReport {
    gregorian: GregorianDate,
    persian: PersianDate,
    persian_formatted: String,
    hijri: Option<String>,
}

pub fn handle_today(config: &AppConfig, json: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let persian = GregorianDate::from(today).to_persian();
    let hijri = match to_hijri(today, config.board.hijri_offset) {
        Ok(info) => Some(info.formatted()),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };

    if json {
        return print_json(&DateReport {
            gregorian: GregorianDate::from(today),
            persian,
            persian_formatted: persian.formatted(),
            hijri,
        });
    }

    println!();
    println_colored!(GOLD, "  {}", today.format("%A, %B %-d, %Y"));
    println!("  {}  {}", pad_display("Persian", 9), persian.formatted());
    if let Some(hijri) = hijri {
        println!("  {}  {}", pad_display("Hijri", 9), hijri);
    }
    println!();
    Ok(())
}

pub fn handle_persian(date: Option<&str>, json: bool) -> Result<()> {
    let date = match date {
        Some(s) => parse_date_arg(s)?,
        None => Local::now().date_naive(),
    };
    let persian = gregorian_to_persian(date.year(), date.month(), date.day());

    if json {
        return print_json(&persian);
    }
    println!("{}  {}", persian, persian.formatted());
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

/// Suffix for the highlighted row; Fajr after Isha belongs to tomorrow.
fn next_marker(next: &NextPrayer, now: NaiveTime) -> &'static str {
    if is_tomorrow(next, now) {
        "← next (tomorrow)"
    } else {
        "← next"
    }
}

#[derive(Debug, Serialize)]
struct TimesReport<'a> {
    date: String,
    source: &'a str,
    times: &'a PrayerTimesOfDay,
}

pub fn handle_times(
    conn: &Connection,
    config: &AppConfig,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let today = Local::now().date_naive();
    let date = match date {
        Some(s) => parse_date_arg(s)?,
        None => today,
    };
    let provider = TimesProvider::from_config(config)?;
    let times = provider.times_for_date(conn, date)?;

    if json {
        return print_json(&TimesReport {
            date: date.format("%Y-%m-%d").to_string(),
            source: provider.label(),
            times: &times,
        });
    }

    let persian = GregorianDate::from(date).to_persian();
    println!();
    println_colored!(
        GOLD,
        "  Prayer Times — {} ({} · {})",
        config.board.location_name,
        date.format("%Y-%m-%d"),
        persian.formatted()
    );
    println!();

    // Only today's table has a "now" to compare against
    let now = (date == today).then(|| Local::now().time());
    let next = now.map(|now| (next_prayer(&times, now), now));

    for (prayer, clock) in times.entries() {
        let name = pad_display(prayer.display_name(), 10);
        let marker = next
            .as_ref()
            .filter(|(n, _)| n.name == prayer.display_name())
            .map(|(n, now)| next_marker(n, *now));
        let is_past = now.is_some_and(|now| has_passed(clock, now));
        if let Some(marker) = marker {
            println_colored!(AMBER, "  {}  {}  {}", name, clock, marker);
        } else if is_past {
            println_colored!(DIM, "  {}  {}", name, clock);
        } else {
            println_colored!(BOLD, "  {}  {}", name, clock);
        }
    }
    println!();
    Ok(())
}

// ─── Next ────────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Serialize)]
pub struct NextReport {
    #[serde(flatten)]
    pub prayer: NextPrayer,
    pub minutes_until: Option<u32>,
}

pub fn next_report(times: &PrayerTimesOfDay, now: NaiveTime) -> NextReport {
    let prayer = next_prayer(times, now);
    let minutes_until = minutes_until(&prayer.time, now);
    NextReport {
        prayer,
        minutes_until,
    }
}

pub fn handle_next(
    conn: &Connection,
    config: &AppConfig,
    at: Option<&str>,
    json: bool,
) -> Result<()> {
    let now = match at {
        Some(s) => parse_clock_arg(s)?,
        None => Local::now().time(),
    };
    let provider = TimesProvider::from_config(config)?;
    let times = provider.times_for_date(conn, Local::now().date_naive())?;
    let report = next_report(&times, now);

    if json {
        return print_json(&report);
    }

    let day = if is_tomorrow(&report.prayer, now) {
        " tomorrow"
    } else {
        ""
    };
    println!();
    match report.minutes_until {
        Some(mins) => println_colored!(
            AMBER,
            "  Next: {} at {}{} (in {})",
            report.prayer.name,
            report.prayer.time,
            day,
            format_duration_mins(mins)
        ),
        None => println_colored!(
            AMBER,
            "  Next: {} at {}{}",
            report.prayer.name,
            report.prayer.time,
            day
        ),
    }
    println!();
    Ok(())
}

// ─── Cache ───────────────────────────────────────────────────────────────────

pub fn handle_cache(conn: &Connection, config: &AppConfig, action: &CacheCommands) -> Result<()> {
    match action {
        CacheCommands::Warm { days } => {
            if config.board.source != TimesSource::Calculated {
                println_colored!(DIM, "  Times source is static; nothing to cache");
                return Ok(());
            }
            let calc = PrayerCalculator::from_config(&config.salah)?;
            let computed = calc.ensure_cached(conn, Local::now().date_naive(), *days)?;
            println_colored!(
                GREEN,
                "  ✓ Cached {} new day(s), {} total",
                computed,
                CacheRepo::count(conn)?
            );
        }
        CacheCommands::Clear => {
            let removed = CacheRepo::clear_all(conn)?;
            println_colored!(GREEN, "  ✓ Removed {} cached day(s)", removed);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_argument() {
        assert_eq!(
            parse_date_arg("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(parse_date_arg("01/01/2024").is_err());
        assert!(parse_date_arg("2024-02-30").is_err());
    }

    #[test]
    fn parses_clock_argument() {
        let three_pm = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        assert_eq!(parse_clock_arg("3:00 PM").unwrap(), three_pm);
        assert_eq!(parse_clock_arg("3:00 pm").unwrap(), three_pm);
        assert_eq!(parse_clock_arg("15:00").unwrap(), three_pm);
        assert_eq!(
            parse_clock_arg("12:01 AM").unwrap(),
            NaiveTime::from_hms_opt(0, 1, 0).unwrap()
        );
        assert!(parse_clock_arg("teatime").is_err());
    }

    #[test]
    fn next_report_includes_countdown() {
        let times = PrayerTimesOfDay::default();
        let report = next_report(&times, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(report.prayer.name, "Asr");
        assert_eq!(report.minutes_until, Some(45));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["name"], "Asr");
        assert_eq!(json["time"], "3:45 PM");
        assert_eq!(json["minutes_until"], 45);
    }

    #[test]
    fn next_report_after_isha_counts_to_tomorrow() {
        let times = PrayerTimesOfDay::default();
        let report = next_report(&times, NaiveTime::from_hms_opt(23, 0, 0).unwrap());
        assert_eq!(report.prayer.name, "Fajr");
        assert_eq!(report.minutes_until, Some(375));
    }

    #[test]
    fn marker_tags_rolled_over_fajr() {
        let times = PrayerTimesOfDay::default();
        let late = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        assert_eq!(next_marker(&next_prayer(&times, late), late), "← next (tomorrow)");

        let early = NaiveTime::from_hms_opt(3, 0, 0).unwrap();
        assert_eq!(next_marker(&next_prayer(&times, early), early), "← next");
    }

    #[test]
    fn persian_runs_without_config() {
        assert!(handle_persian(Some("2024-01-01"), true).is_ok());
        assert!(handle_persian(Some("2024-13-01"), false).is_err());
    }

    #[test]
    fn setup_applies_flags() {
        let args = SetupArgs {
            location: Some("Karachi".to_string()),
            lat: Some(24.86),
            lng: Some(67.0),
            method: Some("Karachi".to_string()),
            madhab: Some("Hanafi".to_string()),
            tz_offset: Some(300),
            source: Some(TimesSource::Calculated),
            ..Default::default()
        };
        let config = apply_setup(&AppConfig::default(), &args).unwrap();
        assert_eq!(config.board.location_name, "Karachi");
        assert_eq!(config.board.source, TimesSource::Calculated);
        assert_eq!(config.salah.calc_method, "Karachi");
        assert_eq!(config.salah.timezone_offset, 300);
    }

    #[test]
    fn setup_rejects_bad_values() {
        let args = SetupArgs {
            lat: Some(95.0),
            ..Default::default()
        };
        assert!(apply_setup(&AppConfig::default(), &args).is_err());

        let args = SetupArgs {
            method: Some("Atlantis".to_string()),
            source: Some(TimesSource::Calculated),
            ..Default::default()
        };
        assert!(apply_setup(&AppConfig::default(), &args).is_err());
    }

    #[test]
    fn setup_rejects_malformed_static_table() {
        let mut config = AppConfig::default();
        config.times.dhuhr = "noon".to_string();
        assert!(apply_setup(&config, &SetupArgs::default()).is_err());
    }
}
