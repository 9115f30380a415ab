use chrono::NaiveDateTime;

/// Zero-padded HH:MM:SS from a second count. Hours are not wrapped at 24.
pub fn hms(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Elapsed HH:MM:SS between a fixed start and "now". Clock skew clamps to zero.
pub fn elapsed_hms(start: NaiveDateTime, now: NaiveDateTime) -> String {
    hms((now - start).num_seconds())
}

/// Compact duration for status lines, minutes only under one hour.
pub fn short_duration(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn time_hm(t: NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

/// Long date for headers, e.g. "10 February 2026".
pub fn date(t: NaiveDateTime) -> String {
    t.format("%-d %B %Y").to_string()
}

pub fn date_time(t: NaiveDateTime) -> String {
    t.format("%d/%m/%Y %H:%M").to_string()
}
