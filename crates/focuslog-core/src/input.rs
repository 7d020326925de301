//! Parsing and formatting of user-facing time values.
//!
//! Text typed into a duration field is never an error: anything that is not
//! a non-negative integer becomes 0.

/// Parse a whole number of units, falling back to 0.
///
/// Leading/trailing whitespace is ignored. Negative, fractional, empty or
/// otherwise malformed input yields 0.
pub fn parse_or_zero(input: &str) -> u64 {
    input.trim().parse::<u64>().unwrap_or(0)
}

/// Combine minute and second text fields into total seconds.
///
/// Seconds of 60 or more are carried into minutes, so `("1", "75")` is the
/// same duration as `("2", "15")`.
pub fn parse_duration_fields(minutes: &str, seconds: &str) -> u64 {
    let minutes = parse_or_zero(minutes);
    let seconds = parse_or_zero(seconds);
    minutes
        .saturating_add(seconds / 60)
        .saturating_mul(60)
        .saturating_add(seconds % 60)
}

/// `HH:MM:SS`, used by the stopwatch display.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// `MM:SS`, used by the countdown display. Minutes are not wrapped into hours.
pub fn format_mmss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Compact duration for lists: `45s`, `3m`, `3m 20s`.
pub fn format_compact(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    if minutes == 0 {
        format!("{seconds}s")
    } else if seconds > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{minutes}m")
    }
}
