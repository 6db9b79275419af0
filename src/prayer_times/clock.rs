use chrono::{NaiveTime, Timelike};

use crate::models::{NextPrayer, PrayerName, PrayerTimesOfDay};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes since midnight for a "H:MM AM" / "H:MM PM" string.
///
/// 12 PM stays at noon and 12 AM maps to midnight. Any other period marker
/// leaves the hour as written. Returns `None` when the hour or minute is not
/// a number or is too large to count in minutes, which callers treat as
/// "never upcoming".
pub fn minutes_since_midnight(clock: &str) -> Option<u32> {
    let (time, period) = match clock.trim().split_once(' ') {
        Some((time, period)) => (time, period.trim()),
        None => (clock.trim(), ""),
    };
    let (h, m) = time.split_once(':')?;
    let mut hour: u32 = h.trim().parse().ok()?;
    let minute: u32 = m.trim().parse().ok()?;

    if period == "PM" && hour != 12 {
        hour = hour.checked_add(12)?;
    } else if period == "AM" && hour == 12 {
        hour = 0;
    }
    hour.checked_mul(60)?.checked_add(minute)
}

fn now_minutes(now: NaiveTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Pick the next prayer after `now`.
///
/// Prayers are scanned in daily order and the first one strictly after `now`
/// wins. When every prayer has passed the result is Fajr with today's clock
/// string, meaning Fajr tomorrow; the result itself does not say which day.
pub fn next_prayer(times: &PrayerTimesOfDay, now: NaiveTime) -> NextPrayer {
    let now = now_minutes(now);

    for (prayer, clock) in times.entries() {
        if minutes_since_midnight(clock).is_some_and(|m| m > now) {
            return NextPrayer {
                name: prayer.display_name().to_string(),
                time: clock.to_string(),
            };
        }
    }

    NextPrayer {
        name: PrayerName::Fajr.display_name().to_string(),
        time: times.fajr.clone(),
    }
}

/// Minutes from `now` until `clock`, rolling over to tomorrow when the clock
/// is not after `now`.
pub fn minutes_until(clock: &str, now: NaiveTime) -> Option<u32> {
    let target = minutes_since_midnight(clock)?;
    let now = now_minutes(now);
    if target > now {
        Some(target - now)
    } else {
        Some(target + MINUTES_PER_DAY - now)
    }
}

/// Whether `next` is the rolled-over Fajr, i.e. it falls on tomorrow.
///
/// The selector only returns a clock at or before `now` when every prayer
/// has passed, so a passed clock here means the next day.
pub fn is_tomorrow(next: &NextPrayer, now: NaiveTime) -> bool {
    has_passed(&next.time, now)
}

/// Whether `clock` is already behind `now` today.
pub fn has_passed(clock: &str, now: NaiveTime) -> bool {
    minutes_since_midnight(clock).is_some_and(|m| m <= now_minutes(now))
}
