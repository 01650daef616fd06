//! Google Calendar deep-link construction.
//!
//! Pure string building, no network: the link opens the provider's event
//! template pre-filled with a one-hour review slot. Scheduling state never
//! depends on whether the user follows the link.

use chrono::{DateTime, Duration, Utc};

/// Google's `dates=` parameter wants `YYYYMMDDTHHMMSSZ`, whole seconds, UTC.
fn format_gcal(date: DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Builds a calendar link for a one-hour event titled `Review {cycle}: {topic}`
/// starting at the review's due date.
pub fn google_calendar_link(topic: &str, due_date: DateTime<Utc>, cycle: u32) -> String {
    let start = format_gcal(due_date);
    let end = format_gcal(due_date + Duration::hours(1));

    let title = format!("Review {cycle}: {topic}");
    let title = urlencoding::encode(&title);
    let details = urlencoding::encode("Review scheduled by Med Recall.");

    format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={title}&dates={start}/{end}&details={details}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_link_dates_span_one_hour() {
        let due = Utc.with_ymd_and_hms(2026, 3, 1, 14, 30, 5).unwrap();
        let link = google_calendar_link("Cardiology", due, 2);

        assert!(link.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE"));
        assert!(link.contains("&dates=20260301T143005Z/20260301T153005Z"));
    }

    #[test]
    fn test_title_carries_cycle_and_topic() {
        let due = Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap();
        let link = google_calendar_link("Renal physiology", due, 3);

        assert!(link.contains("text=Review%203%3A%20Renal%20physiology"));
    }

    #[test]
    fn test_hour_rollover_crosses_midnight() {
        let due = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap();
        let link = google_calendar_link("x", due, 1);

        assert!(link.contains("&dates=20260301T233000Z/20260302T003000Z"));
    }
}
