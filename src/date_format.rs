use chrono::{DateTime, NaiveDateTime};

/// Display format for show start times, mirroring the two fixed renderings the
/// pages use. Medium is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFormat {
    Full,
    #[default]
    Medium,
}

/// Parse the datetime strings this application traffics in: RFC 3339, the
/// `YYYY-MM-DD HH:MM:SS` shape the show form posts, and the `datetime-local`
/// input shape without seconds.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Render a parsed timestamp for display. Unparseable input is shown as-is
/// rather than failing the whole page.
pub fn format_datetime(value: &str, format: DisplayFormat) -> String {
    match parse_datetime(value) {
        Some(dt) => format_timestamp(&dt, format),
        None => value.to_string(),
    }
}

pub fn format_timestamp(dt: &NaiveDateTime, format: DisplayFormat) -> String {
    match format {
        DisplayFormat::Full => dt.format("%A %B, %-d, %Y at %-I:%M%p").to_string(),
        DisplayFormat::Medium => dt.format("%a %b, %d, %Y %-I:%M%p").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_and_rfc3339_shapes() {
        assert!(parse_datetime("2026-06-01 21:30:00").is_some());
        assert!(parse_datetime("2026-06-01T21:30").is_some());
        assert!(parse_datetime("2026-06-01T21:30:00+00:00").is_some());
        assert!(parse_datetime("not a date").is_none());
    }

    #[test]
    fn medium_is_the_default_format() {
        assert_eq!(
            format_datetime("2026-06-01 21:30:00", DisplayFormat::default()),
            "Mon Jun, 01, 2026 9:30PM"
        );
    }

    #[test]
    fn full_format_spells_out_the_day() {
        assert_eq!(
            format_datetime("2026-06-01 21:30:00", DisplayFormat::Full),
            "Monday June, 1, 2026 at 9:30PM"
        );
    }

    #[test]
    fn unparseable_input_is_passed_through() {
        assert_eq!(
            format_datetime("soon", DisplayFormat::Medium),
            "soon".to_string()
        );
    }
}
