pub mod calculator;
pub mod clock;
pub mod source;

pub use calculator::PrayerCalculator;
pub use clock::{minutes_until, next_prayer};
pub use source::TimesProvider;
