pub mod prayer;

pub use prayer::{NextPrayer, PrayerName, PrayerTimesOfDay};
