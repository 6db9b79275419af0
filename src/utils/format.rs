use chrono::NaiveTime;
use unicode_width::UnicodeWidthStr;

/// Format a countdown in minutes to "Xh Ym" or "Ym"
pub fn format_duration_mins(mins: u32) -> String {
    if mins == 0 {
        return "now".to_string();
    }
    let hours = mins / 60;
    let minutes = mins % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format a NaiveTime as a 12-hour clock string, e.g. "5:15 AM"
pub fn format_clock_12h(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Right-pad to a display width, counting wide glyphs correctly
pub fn pad_display(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration_mins(0), "now");
        assert_eq!(format_duration_mins(45), "45m");
        assert_eq!(format_duration_mins(375), "6h 15m");
    }

    #[test]
    fn clock_formatting() {
        let t = NaiveTime::from_hms_opt(5, 15, 0).unwrap();
        assert_eq!(format_clock_12h(t), "5:15 AM");
        let t = NaiveTime::from_hms_opt(0, 7, 0).unwrap();
        assert_eq!(format_clock_12h(t), "12:07 AM");
        let t = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
        assert_eq!(format_clock_12h(t), "12:30 PM");
    }

    #[test]
    fn padding_uses_display_width() {
        assert_eq!(pad_display("Asr", 6), "Asr   ");
        assert_eq!(pad_display("فجر", 5), "فجر  ");
        assert_eq!(pad_display("Maghrib", 3), "Maghrib");
    }
}
