//! Wall-clock time-of-day parsing.

use time::macros::format_description;
use time::Time;

/// Minutes in a day; the depot's window closes here.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses `"H:MM"` or `"HH:MM"` into minutes since midnight.
///
/// Returns `None` for anything that is not a valid time of day.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::parse_clock;
///
/// assert_eq!(parse_clock("08:30"), Some(510));
/// assert_eq!(parse_clock("8:00"), Some(480));
/// assert_eq!(parse_clock("25:00"), None);
/// assert_eq!(parse_clock("noon"), None);
/// ```
pub fn parse_clock(value: &str) -> Option<u32> {
    let format = format_description!("[hour padding:none]:[minute]");
    let time = Time::parse(value.trim(), &format).ok()?;
    Some(u32::from(time.hour()) * 60 + u32::from(time.minute()))
}

/// Formats minutes since midnight as `"HH:MM"`.
pub fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_clock("00:00"), Some(0));
        assert_eq!(parse_clock("11:30"), Some(690));
        assert_eq!(parse_clock(" 9:05 "), Some(545));
        assert_eq!(parse_clock("23:59"), Some(1439));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("12"), None);
        assert_eq!(parse_clock("12:60"), None);
        assert_eq!(parse_clock("24:00"), None);
        assert_eq!(parse_clock("09:15:00"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_clock(480), "08:00");
        assert_eq!(format_clock(545), "09:05");
    }
}
