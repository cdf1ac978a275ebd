//! Display formatting for timing values
//!
//! All inputs are integer milliseconds. Minutes are never zero-padded, so a
//! lap reads `1:35.234` and the race clock reads `12:34`. The same rule
//! applies to gaps, which keeps every field of a payload in one style.

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Format a lap (or cumulative) time as `M:SS.mmm`
pub fn format_lap_time(ms: u64) -> String {
    let minutes = ms / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

/// Format a same-lap gap to the leader
///
/// Returns an empty string for a zero gap, `S.mmm` below one minute and
/// `M:SS.mmm` from one minute upward.
pub fn format_gap(ms: u64) -> String {
    if ms == 0 {
        return String::new();
    }

    if ms < MS_PER_MINUTE {
        format!("{}.{:03}", ms / MS_PER_SECOND, ms % MS_PER_SECOND)
    } else {
        format_lap_time(ms)
    }
}

/// Format a gap for a competitor that is one or more laps down
pub fn format_lap_gap(laps_behind: u32) -> String {
    format!("+{} lap", laps_behind)
}

/// Format the race clock as `M:SS`, truncating milliseconds
pub fn format_clock(ms: u64) -> String {
    let minutes = ms / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lap_time_pads_seconds_and_millis() {
        assert_eq!(format_lap_time(95_234), "1:35.234");
        assert_eq!(format_lap_time(61_005), "1:01.005");
        assert_eq!(format_lap_time(0), "0:00.000");
    }

    #[test]
    fn test_format_lap_time_does_not_pad_minutes() {
        assert_eq!(format_lap_time(285_702), "4:45.702");
        assert_eq!(format_lap_time(12 * 60_000 + 3_000), "12:03.000");
    }

    #[test]
    fn test_format_gap_zero_is_empty() {
        assert_eq!(format_gap(0), "");
    }

    #[test]
    fn test_format_gap_under_a_minute() {
        assert_eq!(format_gap(3_834), "3.834");
        assert_eq!(format_gap(7), "0.007");
        assert_eq!(format_gap(59_999), "59.999");
    }

    #[test]
    fn test_format_gap_one_minute_thirty() {
        assert_eq!(format_gap(90_000), "1:30.000");
        assert_eq!(format_gap(90_000), format_lap_time(90_000));
    }

    #[test]
    fn test_format_lap_gap() {
        assert_eq!(format_lap_gap(1), "+1 lap");
        assert_eq!(format_lap_gap(3), "+3 lap");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(754_999), "12:34");
        assert_eq!(format_clock(30 * 60_000), "30:00");
    }

    #[test]
    fn test_formatters_handle_large_values() {
        let ms = u64::MAX;
        assert!(!format_lap_time(ms).is_empty());
        assert!(!format_gap(ms).is_empty());
        assert!(!format_clock(ms).is_empty());
    }
}
