use chrono::{DateTime, NaiveDateTime, Utc};

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Bare datetime-local values ("2026-08-07T09:30") come back from the
    // server for due dates created through the form.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Display form of a server timestamp; unparsable input renders as-is.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// Value for an `<input type="datetime-local">`, which takes minute precision
/// and no zone suffix.
pub fn datetime_local_value(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(parsed) => parsed.format("%Y-%m-%dT%H:%M").to_string(),
        None => raw.to_string(),
    }
}

pub fn is_overdue(due_date: Option<&str>, now: DateTime<Utc>) -> bool {
    due_date
        .and_then(parse_timestamp)
        .map(|due| due < now)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn rfc3339_formats_to_minutes() {
        assert_eq!(
            format_timestamp("2026-08-07T09:30:12Z"),
            "2026-08-07 09:30"
        );
    }

    #[test]
    fn unparsable_input_passes_through() {
        assert_eq!(format_timestamp("sometime soon"), "sometime soon");
    }

    #[test]
    fn datetime_local_round_trip() {
        assert_eq!(
            datetime_local_value("2026-08-07T09:30:00Z"),
            "2026-08-07T09:30"
        );
        assert_eq!(
            parse_timestamp("2026-08-07T09:30").map(|dt| dt.timestamp()),
            parse_timestamp("2026-08-07T09:30:00Z").map(|dt| dt.timestamp())
        );
    }

    #[test]
    fn overdue_compares_against_now() {
        let now = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).single().expect("now");
        assert!(is_overdue(Some("2026-08-06T00:00:00Z"), now));
        assert!(!is_overdue(Some("2026-08-08T00:00:00Z"), now));
        assert!(!is_overdue(Some("not a date"), now));
        assert!(!is_overdue(None, now));
    }
}
