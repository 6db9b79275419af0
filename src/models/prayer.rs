use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    /// Daily order.
    pub fn all() -> [PrayerName; 5] {
        [
            PrayerName::Fajr,
            PrayerName::Dhuhr,
            PrayerName::Asr,
            PrayerName::Maghrib,
            PrayerName::Isha,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Shape problems in a prayer-time table. Raised by callers that accept
/// external tables, never by the selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimesError {
    #[error("{prayer}: '{value}' is missing the AM/PM marker")]
    MissingPeriod { prayer: PrayerName, value: String },
    #[error("{prayer}: '{value}' has unknown period '{period}' (expected AM or PM)")]
    UnknownPeriod {
        prayer: PrayerName,
        value: String,
        period: String,
    },
    #[error("{prayer}: '{value}' is not in H:MM form")]
    BadClock { prayer: PrayerName, value: String },
    #[error("{prayer}: '{value}' is out of range (hour 1-12, minute 00-59)")]
    OutOfRange { prayer: PrayerName, value: String },
}

/// One day's five prayer times as 12-hour clock strings ("5:15 AM").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimesOfDay {
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl Default for PrayerTimesOfDay {
    fn default() -> Self {
        Self {
            fajr: "5:15 AM".to_string(),
            dhuhr: "12:30 PM".to_string(),
            asr: "3:45 PM".to_string(),
            maghrib: "6:20 PM".to_string(),
            isha: "7:45 PM".to_string(),
        }
    }
}

impl PrayerTimesOfDay {
    pub fn get(&self, prayer: PrayerName) -> &str {
        match prayer {
            PrayerName::Fajr => &self.fajr,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
        }
    }

    /// (prayer, clock string) pairs in daily order.
    pub fn entries(&self) -> [(PrayerName, &str); 5] {
        PrayerName::all().map(|p| (p, self.get(p)))
    }

    pub fn validate(&self) -> Result<(), TimesError> {
        for (prayer, value) in self.entries() {
            validate_clock(prayer, value)?;
        }
        Ok(())
    }
}

fn validate_clock(prayer: PrayerName, value: &str) -> Result<(), TimesError> {
    let (clock, period) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| TimesError::MissingPeriod {
            prayer,
            value: value.to_string(),
        })?;

    if period != "AM" && period != "PM" {
        return Err(TimesError::UnknownPeriod {
            prayer,
            value: value.to_string(),
            period: period.to_string(),
        });
    }

    let bad_clock = || TimesError::BadClock {
        prayer,
        value: value.to_string(),
    };
    let (h, m) = clock.split_once(':').ok_or_else(bad_clock)?;
    if m.len() != 2 {
        return Err(bad_clock());
    }
    let hour: u32 = h.parse().map_err(|_| bad_clock())?;
    let minute: u32 = m.parse().map_err(|_| bad_clock())?;

    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(TimesError::OutOfRange {
            prayer,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Which prayer is next and its clock string, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub name: String,
    pub time: String,
}
