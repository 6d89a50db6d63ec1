use chrono::{DateTime, Utc};

/// Timer display, "m:ss".
#[must_use]
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Workout length for the history list, rounded to whole minutes:
/// "<1m", "45m", "2h", "1h 30m".
#[must_use]
pub fn format_duration(started_at: DateTime<Utc>, completed_at: DateTime<Utc>) -> String {
    let seconds = (completed_at - started_at).num_seconds().max(0);
    let total_minutes = (seconds + 30) / 60;

    if total_minutes < 1 {
        return "<1m".to_string();
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
