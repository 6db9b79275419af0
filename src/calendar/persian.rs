use serde::Serialize;

/// Persian (Solar Hijri) month names in English (index 0 = Farvardin = month 1)
const PERSIAN_MONTH_NAMES: &[&str] = &[
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// Days elapsed before the first of each Gregorian month in a common year.
const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Length of the 33-year cycle used to fold the day count.
const CYCLE_DAYS: i64 = 12053;

/// The within-cycle year offset never goes past this.
const MAX_CYCLE_OFFSET: i64 = 29;

pub fn persian_month_name(month: u32) -> &'static str {
    if (1..=12).contains(&month) {
        PERSIAN_MONTH_NAMES[month as usize - 1]
    } else {
        "Unknown"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl GregorianDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn to_persian(self) -> PersianDate {
        gregorian_to_persian(self.year, self.month, self.day)
    }
}

impl From<chrono::NaiveDate> for GregorianDate {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl PersianDate {
    pub fn month_name(&self) -> &'static str {
        persian_month_name(self.month)
    }

    /// "26 Mordad 1388"
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name(), self.year)
    }
}

impl std::fmt::Display for PersianDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Era base and March-based day count for a Gregorian date (steps 1-3).
fn era_and_day_count(year: i32, month: u32, day: u32) -> (i64, i64) {
    let (era, gy) = if year <= 1600 {
        (0, year as i64 - 621)
    } else {
        (979, year as i64 - 1600)
    };
    let march_year = if month > 2 { gy + 1 } else { gy };
    let month_idx = month.clamp(1, 12) as usize - 1;

    let days = 365 * march_year
        + (march_year + 3).div_euclid(4)
        + DAYS_BEFORE_MONTH[month_idx]
        + day as i64
        - 80
        + march_year.div_euclid(100)
        - march_year.div_euclid(400)
        - 150;
    (era, days)
}

/// Approximate Gregorian -> Persian conversion.
///
/// This is a closed-form arithmetic approximation: one fold over a 33-year
/// cycle, fixed month lengths (31 x 6, then 30) and no Persian leap-year
/// correction. Output drifts from the official Solar Hijri calendar and
/// dates late in a cycle clamp to the last day of the year. Every division
/// floors, so negative intermediate values stay consistent.
///
/// Input is not validated; an impossible day simply shifts the result. Years
/// too far out for `i32` saturate at its bounds instead of wrapping.
pub fn gregorian_to_persian(year: i32, month: u32, day: u32) -> PersianDate {
    let (era, mut days) = era_and_day_count(year, month, day);

    let mut pyear = era + 33 * days.div_euclid(CYCLE_DAYS) - 14;
    days = days.rem_euclid(CYCLE_DAYS);

    let mut offset = days.div_euclid(365);
    if offset >= MAX_CYCLE_OFFSET {
        offset = MAX_CYCLE_OFFSET;
        days = 365;
    } else if offset >= 0 {
        days -= offset * 365;
    }
    pyear += offset;

    let (pmonth, pday) = if days < 186 {
        (1 + days.div_euclid(31), 1 + days.rem_euclid(31))
    } else {
        (7 + (days - 186).div_euclid(30), 1 + (days - 186).rem_euclid(30))
    };

    // Month and day come out of rem_euclid/div_euclid over fixed tables, so
    // only the year can leave its type's range.
    let year = i32::try_from(pyear).unwrap_or(if pyear < 0 { i32::MIN } else { i32::MAX });
    PersianDate {
        year,
        month: u32::try_from(pmonth).unwrap_or(12),
        day: u32::try_from(pday).unwrap_or(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(d: PersianDate) -> (i32, u32, u32) {
        (d.year, d.month, d.day)
    }

    #[test]
    fn known_dates_match_reference_values() {
        assert_eq!(triple(gregorian_to_persian(2024, 1, 1)), (1388, 5, 26));
        assert_eq!(triple(gregorian_to_persian(2000, 3, 21)), (1365, 8, 8));
        assert_eq!(triple(gregorian_to_persian(1999, 12, 31)), (1365, 5, 19));
        assert_eq!(triple(gregorian_to_persian(2024, 2, 29)), (1388, 7, 23));
        assert_eq!(triple(gregorian_to_persian(2024, 3, 1)), (1389, 7, 24));
    }

    #[test]
    fn late_cycle_dates_clamp_to_year_end() {
        assert_eq!(triple(gregorian_to_persian(1925, 8, 5)), (1291, 12, 30));
        assert_eq!(triple(gregorian_to_persian(1925, 8, 6)), (1291, 12, 30));
        assert_eq!(triple(gregorian_to_persian(2026, 10, 16)), (1390, 12, 30));
    }

    #[test]
    fn era_split_at_1600() {
        let (era_1600, _) = era_and_day_count(1600, 1, 1);
        let (era_1601, _) = era_and_day_count(1601, 1, 1);
        assert_eq!(era_1600, 0);
        assert_eq!(era_1601, 979);

        assert_eq!(triple(gregorian_to_persian(1600, 1, 1)), (964, 6, 2));
        assert_eq!(triple(gregorian_to_persian(1601, 1, 1)), (965, 5, 14));
    }

    #[test]
    fn next_day_adds_one_to_day_count() {
        for month in 1..=12 {
            for day in 1..28 {
                let (_, a) = era_and_day_count(2024, month, day);
                let (_, b) = era_and_day_count(2024, month, day + 1);
                assert_eq!(b - a, 1, "month {} day {}", month, day);
            }
        }
    }

    #[test]
    fn output_stays_in_month_table() {
        for year in [1, 621, 1300, 1600, 1601, 1979, 2024, 2100] {
            for month in 1..=12 {
                for day in [1, 15, 28] {
                    let p = gregorian_to_persian(year, month, day);
                    assert!((1..=12).contains(&p.month), "{:?}", p);
                    if p.month <= 6 {
                        assert!((1..=31).contains(&p.day), "{:?}", p);
                    } else {
                        assert!((1..=30).contains(&p.day), "{:?}", p);
                    }
                }
            }
        }
    }

    #[test]
    fn ancient_dates_do_not_panic() {
        assert_eq!(triple(gregorian_to_persian(1, 1, 1)), (-635, 5, 5));
        assert_eq!(triple(gregorian_to_persian(621, 1, 1)), (-18, 12, 30));
    }

    #[test]
    fn extreme_years_keep_sign_and_range() {
        let far = gregorian_to_persian(i32::MAX, 12, 31);
        assert!(far.year > 0, "{:?}", far);
        assert!((1..=12).contains(&far.month));

        let early = gregorian_to_persian(i32::MIN, 1, 1);
        assert!(early.year < 0, "{:?}", early);
        assert!((1..=12).contains(&early.month));
    }

    #[test]
    fn invalid_month_and_day_do_not_panic() {
        let _ = gregorian_to_persian(2024, 0, 1);
        let _ = gregorian_to_persian(2024, 13, 40);
        let _ = gregorian_to_persian(2024, 2, 31);
    }

    #[test]
    fn conversion_is_idempotent() {
        let a = gregorian_to_persian(1979, 2, 11);
        let b = gregorian_to_persian(1979, 2, 11);
        assert_eq!(a, b);
    }

    #[test]
    fn from_naive_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let g = GregorianDate::from(date);
        assert_eq!(g, GregorianDate::new(2024, 1, 1));
        assert_eq!(g.to_persian(), gregorian_to_persian(2024, 1, 1));
    }

    #[test]
    fn display_and_formatted() {
        let p = gregorian_to_persian(2024, 1, 1);
        assert_eq!(p.to_string(), "1388/05/26");
        assert_eq!(p.formatted(), "26 Mordad 1388");
        assert_eq!(persian_month_name(0), "Unknown");
        assert_eq!(persian_month_name(12), "Esfand");
    }
}
