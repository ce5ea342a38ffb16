use chrono::{DateTime, Local};
use std::time::Duration;

/// 24-hour "HH:MM".
pub fn format_clock(time: &DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}

/// Whole seconds with an "s" suffix, e.g. "28s".
pub fn format_seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs_f64().round() as u64)
}
