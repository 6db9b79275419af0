use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::config::{AppConfig, TimesSource};
use crate::models::PrayerTimesOfDay;
use crate::prayer_times::calculator::PrayerCalculator;

/// Where a day's five clock strings come from.
pub enum TimesProvider {
    Static(PrayerTimesOfDay),
    Calculated(PrayerCalculator),
}

impl TimesProvider {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.board.source {
            TimesSource::Static => Ok(TimesProvider::Static(config.times.clone())),
            TimesSource::Calculated => Ok(TimesProvider::Calculated(
                PrayerCalculator::from_config(&config.salah)?,
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimesProvider::Static(_) => "static table",
            TimesProvider::Calculated(_) => "calculated",
        }
    }

    pub fn times_for_date(&self, conn: &Connection, date: NaiveDate) -> Result<PrayerTimesOfDay> {
        match self {
            TimesProvider::Static(times) => Ok(times.clone()),
            TimesProvider::Calculated(calc) => calc.get_cached_or_compute(conn, date),
        }
    }
}
