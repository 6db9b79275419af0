use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::PrayerTimesOfDay;

// ─── Cached prayer times ────────────────────────────────────────────────────

pub struct CacheRepo;

impl CacheRepo {
    pub fn get_times_for_date(conn: &Connection, date: &str) -> Result<Option<PrayerTimesOfDay>> {
        let row = conn
            .query_row(
                "SELECT fajr, dhuhr, asr, maghrib, isha FROM prayer_times_cache WHERE date = ?1",
                params![date],
                |row| {
                    Ok(PrayerTimesOfDay {
                        fajr: row.get(0)?,
                        dhuhr: row.get(1)?,
                        asr: row.get(2)?,
                        maghrib: row.get(3)?,
                        isha: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn clear_all(conn: &Connection) -> Result<usize> {
        let removed = conn.execute("DELETE FROM prayer_times_cache", [])?;
        Ok(removed)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        let n = conn.query_row("SELECT COUNT(*) FROM prayer_times_cache", [], |row| row.get(0))?;
        Ok(n)
    }

    pub fn store_times(conn: &Connection, date: &str, times: &PrayerTimesOfDay) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO prayer_times_cache (date, fajr, dhuhr, asr, maghrib, isha)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                date,
                times.fajr,
                times.dhuhr,
                times.asr,
                times.maghrib,
                times.isha,
            ],
        )?;
        Ok(())
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        let val = conn
            .query_row(
                "SELECT value FROM app_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(val)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO app_meta (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
