use anyhow::{anyhow, Result};
use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime};
use rusqlite::Connection;
use salah::prelude::*;

use crate::config::SalahConfig;
use crate::db::repository::CacheRepo;
use crate::models::PrayerTimesOfDay;
use crate::utils::format::format_clock_12h;

/// Offline astronomical prayer times for one location.
pub struct PrayerCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
}

impl PrayerCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
    ) -> Result<Self> {
        // Validate method + madhab early
        parse_method(method)?;
        parse_madhab(madhab)?;
        FixedOffset::east_opt(tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", tz_offset_minutes))?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
        })
    }

    pub fn from_config(salah: &SalahConfig) -> Result<Self> {
        Self::new(
            salah.latitude,
            salah.longitude,
            &salah.calc_method,
            &salah.madhab,
            salah.timezone_offset,
        )
    }

    fn compute_local(&self, date: NaiveDate) -> Result<[NaiveTime; 5]> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> NaiveTime {
            utc.with_timezone(&offset).time()
        };

        Ok([
            to_local(times.time(Prayer::Fajr)),
            to_local(times.time(Prayer::Dhuhr)),
            to_local(times.time(Prayer::Asr)),
            to_local(times.time(Prayer::Maghrib)),
            to_local(times.time(Prayer::Isha)),
        ])
    }

    /// Compute a day's table as 12-hour clock strings.
    pub fn times_for_date(&self, date: NaiveDate) -> Result<PrayerTimesOfDay> {
        let [fajr, dhuhr, asr, maghrib, isha] = self.compute_local(date)?;
        Ok(PrayerTimesOfDay {
            fajr: format_clock_12h(fajr),
            dhuhr: format_clock_12h(dhuhr),
            asr: format_clock_12h(asr),
            maghrib: format_clock_12h(maghrib),
            isha: format_clock_12h(isha),
        })
    }

    /// Ensure prayer_times_cache has entries from `from` through `days_ahead` days.
    /// Returns how many days were newly computed.
    pub fn ensure_cached(&self, conn: &Connection, from: NaiveDate, days_ahead: u32) -> Result<u32> {
        let mut computed = 0;
        for i in 0..=(days_ahead as i64) {
            let date = from + Duration::days(i);
            let date_str = date.format("%Y-%m-%d").to_string();

            if CacheRepo::get_times_for_date(conn, &date_str)?.is_none() {
                let times = self.times_for_date(date)?;
                CacheRepo::store_times(conn, &date_str, &times)?;
                computed += 1;
            }
        }
        log::info!("Cached prayer times for {} new day(s) from {}", computed, from);
        Ok(computed)
    }

    /// Get times from cache (or compute and store if missing) for a specific date.
    pub fn get_cached_or_compute(
        &self,
        conn: &Connection,
        date: NaiveDate,
    ) -> Result<PrayerTimesOfDay> {
        let date_str = date.format("%Y-%m-%d").to_string();

        if let Some(cached) = CacheRepo::get_times_for_date(conn, &date_str)? {
            log::debug!("Prayer times cache hit for {}", date_str);
            return Ok(cached);
        }

        log::debug!("Prayer times cache miss for {}, computing", date_str);
        let times = self.times_for_date(date)?;
        CacheRepo::store_times(conn, &date_str, &times)?;
        Ok(times)
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!(
            "Unknown calculation method: '{}'. Use one of: {}",
            s,
            CALC_METHODS.join(", ")
        )),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::prayer_times::clock::minutes_since_midnight;

    fn islamabad() -> PrayerCalculator {
        PrayerCalculator::new(33.6938, 73.0651, "MuslimWorldLeague", "Hanafi", 300).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn rejects_unknown_method_and_madhab() {
        assert!(PrayerCalculator::new(0.0, 0.0, "Martian", "Hanafi", 0).is_err());
        assert!(PrayerCalculator::new(0.0, 0.0, "Karachi", "Zahiri", 0).is_err());
        assert!(PrayerCalculator::new(0.0, 0.0, "Karachi", "Shafi'i", 0).is_ok());
    }

    #[test]
    fn rejects_impossible_offset() {
        assert!(PrayerCalculator::new(0.0, 0.0, "Karachi", "Hanafi", 24 * 60).is_err());
    }

    #[test]
    fn computed_table_is_ordered_twelve_hour_strings() {
        let times = islamabad().times_for_date(date()).unwrap();
        times.validate().unwrap();

        let minutes: Vec<u32> = times
            .entries()
            .iter()
            .map(|(_, clock)| minutes_since_midnight(clock).unwrap())
            .collect();
        assert!(minutes.windows(2).all(|w| w[0] < w[1]), "{:?}", times);
        assert!(times.fajr.ends_with("AM"));
        assert!(times.isha.ends_with("PM"));
    }

    #[test]
    fn cache_is_filled_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let calc = islamabad();

        assert_eq!(calc.ensure_cached(&conn, date(), 2).unwrap(), 3);
        assert_eq!(calc.ensure_cached(&conn, date(), 3).unwrap(), 1);

        let cached = CacheRepo::get_times_for_date(&conn, "2024-06-01").unwrap().unwrap();
        assert_eq!(cached, calc.times_for_date(date()).unwrap());
    }

    #[test]
    fn cached_value_wins_over_computation() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let stored = PrayerTimesOfDay::default();
        CacheRepo::store_times(&conn, "2024-06-01", &stored).unwrap();

        let times = islamabad().get_cached_or_compute(&conn, date()).unwrap();
        assert_eq!(times, stored);
    }
}
