use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::errors::AppError;

/// Canonical calendar-day form. Every duplicate check and every sweep
/// decision routes through [`normalize_day`].
pub const DAY_FMT: &str = "%Y-%m-%d";

/// Canonicalizes a date input to a `%Y-%m-%d` local calendar day.
///
/// Already-canonical strings pass through untouched: round-tripping a plain
/// day through an instant could shift it across a timezone boundary.
pub fn normalize_day(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidDate("date is required".to_string()));
    }

    if let Ok(day) = NaiveDate::parse_from_str(trimmed, DAY_FMT) {
        let canonical = day.format(DAY_FMT).to_string();
        if canonical == trimmed {
            return Ok(trimmed.to_string());
        }
        // Parsed but not byte-identical: unpadded month/day, re-emit padded.
        return Ok(canonical);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant
            .with_timezone(&Local)
            .date_naive()
            .format(DAY_FMT)
            .to_string());
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date().format(DAY_FMT).to_string());
        }
    }

    for fmt in ["%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(day.format(DAY_FMT).to_string());
        }
    }

    Err(AppError::InvalidDate(format!("could not parse \"{trimmed}\"")))
}

/// The current local calendar day in canonical form.
pub fn today() -> String {
    Local::now().date_naive().format(DAY_FMT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_passes_through() {
        assert_eq!(normalize_day("2025-03-10").unwrap(), "2025-03-10");
    }

    #[test]
    fn test_idempotent() {
        for input in ["2025-03-10", "2025-3-1", "2025/03/10", "10/03/2025"] {
            let once = normalize_day(input).unwrap();
            let twice = normalize_day(&once).unwrap();
            assert_eq!(once, twice, "normalize must be idempotent for {input}");
        }
    }

    #[test]
    fn test_unpadded_gets_padded() {
        assert_eq!(normalize_day("2025-3-1").unwrap(), "2025-03-01");
    }

    #[test]
    fn test_datetime_truncates_to_day() {
        assert_eq!(
            normalize_day("2025-03-10 14:30:00").unwrap(),
            "2025-03-10"
        );
        assert_eq!(
            normalize_day("2025-03-10T14:30:00").unwrap(),
            "2025-03-10"
        );
    }

    #[test]
    fn test_slash_and_dotted_formats() {
        assert_eq!(normalize_day("2025/03/10").unwrap(), "2025-03-10");
        assert_eq!(normalize_day("10-03-2025").unwrap(), "2025-03-10");
        assert_eq!(normalize_day("10/03/2025").unwrap(), "2025-03-10");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(normalize_day("  2025-03-10  ").unwrap(), "2025-03-10");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(normalize_day(""), Err(AppError::InvalidDate(_))));
        assert!(matches!(normalize_day("   "), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            normalize_day("next tuesday"),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            normalize_day("2025-13-45"),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_today_is_canonical() {
        let today = today();
        assert_eq!(normalize_day(&today).unwrap(), today);
    }
}
