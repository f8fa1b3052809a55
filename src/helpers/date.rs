//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    // Convert Moment.js format to chrono format
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Render a publication timestamp for display.
///
/// The original front-end formats every publication date with a fixed
/// day/month-abbrev/year pattern and lower-cases the result; this is a
/// locale-insensitive transformation, not a translation. A missing
/// timestamp renders as an empty string.
pub fn publication_date<Tz: TimeZone>(date: &Option<DateTime<Tz>>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match date {
        Some(date) => format_date(date, format).to_lowercase(),
        None => String::new(),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Process from longest to shortest patterns within each category
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month (uppercase M)
        ("MMMM", "%B"), // Full month name
        ("MMM", "%b"),  // Abbreviated month name
        ("MM", "%m"),   // Two-digit month
        // Day of month
        ("DD", "%d"),
        // Hour / minute / second
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "YYYY/MM/DD"), "2024/01/15");
    }

    #[test]
    fn test_publication_date_is_lowercased_and_zero_padded() {
        let date = Utc.with_ymd_and_hms(2021, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(publication_date(&Some(date), "DD MMM YYYY"), "01 mar 2021");
    }

    #[test]
    fn test_missing_publication_date_renders_empty() {
        let date: Option<DateTime<Utc>> = None;
        assert_eq!(publication_date(&date, "DD MMM YYYY"), "");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("DD MMM YYYY"), "%d %b %Y");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
