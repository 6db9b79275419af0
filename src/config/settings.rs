use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::PrayerTimesOfDay;

fn default_latitude() -> f64 {
    35.6892
}
fn default_longitude() -> f64 {
    51.3890
}
fn default_location_name() -> String {
    "Tehran".to_string()
}
fn default_calc_method() -> String {
    "Tehran".to_string()
}
fn default_madhab() -> String {
    "Shafi".to_string()
}
fn default_timezone_offset() -> i32 {
    210
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_tick_rate_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimesSource {
    /// Use the `[times]` table as-is every day
    #[default]
    Static,
    /// Compute times offline from the `[salah]` location
    Calculated,
}

impl TimesSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimesSource::Static => "static",
            TimesSource::Calculated => "calculated",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_location_name")]
    pub location_name: String,
    #[serde(default)]
    pub source: TimesSource,
    /// Days to add/subtract from Hijri date for local moon sighting.
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            location_name: default_location_name(),
            source: TimesSource::default(),
            hijri_offset: default_hijri_offset(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalahConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_calc_method")]
    pub calc_method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
}

impl Default for SalahConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            calc_method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub salah: SalahConfig,
    /// Table used when `board.source = "static"`.
    #[serde(default)]
    pub times: PrayerTimesOfDay,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "minbar")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("minbar.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;

        if config.board.source == TimesSource::Static {
            if let Err(e) = config.times.validate() {
                log::warn!("Prayer-time table in {:?} looks malformed: {}", path, e);
            }
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.board.source, TimesSource::Static);
        assert_eq!(config.board.tick_rate_ms, 1000);
        assert_eq!(config.times, PrayerTimesOfDay::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[board]\nsource = \"calculated\"\n\n[times]\nfajr = \"4:50 AM\"\ndhuhr = \"1:05 PM\"\nasr = \"4:40 PM\"\nmaghrib = \"7:55 PM\"\nisha = \"9:20 PM\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.board.source, TimesSource::Calculated);
        assert_eq!(config.board.location_name, "Tehran");
        assert_eq!(config.salah.timezone_offset, 210);
        assert_eq!(config.times.fajr, "4:50 AM");
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.board.location_name = "Mashhad".to_string();
        config.salah.latitude = 36.2972;
        config.times.maghrib = "6:58 PM".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.board.location_name, "Mashhad");
        assert_eq!(loaded.salah.latitude, 36.2972);
        assert_eq!(loaded.times.maghrib, "6:58 PM");
    }

    #[test]
    fn malformed_table_still_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[times]\nfajr = \"dawn\"\ndhuhr = \"12:30 PM\"\nasr = \"3:45 PM\"\nmaghrib = \"6:20 PM\"\nisha = \"7:45 PM\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.times.fajr, "dawn");
    }

    #[test]
    fn broken_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[board\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
