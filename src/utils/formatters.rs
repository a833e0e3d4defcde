// Formatting utilities

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Cut a response body down to at most `max_chars` characters for error messages
pub fn snippet(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}

/// Format a timestamp as local wall-clock time (e.g., "1/1/2024, 9:00:00 AM").
/// Accepts RFC 3339, a zone-less date-time (taken as local) or a bare date (taken as UTC midnight).
/// Unparseable input is shown as-is.
pub fn format_local_time(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

/// Status line under the embed: the title wins, then the update time, else nothing
pub fn status_text(title: Option<&str>, updated_at: Option<&str>) -> String {
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        return format!("Now playing: {}", title);
    }
    if let Some(updated_at) = updated_at.filter(|u| !u.is_empty()) {
        return format!("Updated: {}", format_local_time(updated_at));
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet() {
        assert_eq!(snippet("short", 200), "short");
        assert_eq!(snippet(&"x".repeat(500), 300).len(), 300);
        // char boundary safe
        assert_eq!(snippet("ééé", 2), "éé");
    }

    #[test]
    fn test_title_preferred() {
        assert_eq!(
            status_text(Some("Episode 1"), Some("2024-01-01T00:00:00Z")),
            "Now playing: Episode 1"
        );
    }

    #[test]
    fn test_updated_time_when_no_title() {
        let expected = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string();

        assert_eq!(
            status_text(None, Some("2024-01-01T00:00:00Z")),
            format!("Updated: {}", expected)
        );
        assert_eq!(
            status_text(Some(""), Some("2024-01-01T00:00:00Z")),
            format!("Updated: {}", expected)
        );
    }

    #[test]
    fn test_empty_when_nothing_known() {
        assert_eq!(status_text(None, None), "");
        assert_eq!(status_text(Some(""), Some("")), "");
    }

    #[test]
    fn test_unparseable_time_shown_raw() {
        assert_eq!(format_local_time("yesterday"), "yesterday");
    }
    fn local_fmt(ts: DateTime<Local>) -> String {
        ts.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }

    #[test]
    fn test_date_only_is_utc_midnight() {
        let expected = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap()
            .with_timezone(&Local);
        assert_eq!(format_local_time("2024-01-01"), local_fmt(expected));
    }

    #[test]
    fn test_zoneless_time_is_local() {
        let expected = Local.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).earliest().unwrap();
        assert_eq!(format_local_time("2024-06-01T14:30:00"), local_fmt(expected));
        assert_eq!(format_local_time("2024-06-01T14:30"), local_fmt(expected));
    }
}
