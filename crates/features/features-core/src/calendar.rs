//! Timestamp parsing and calendar features.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use features_spi::{CalendarInput, FeatureError, Result};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a purchase or delivery timestamp.
///
/// Accepts the dataset format (`2017-10-02 10:56:33`), ISO-8601 without
/// offset, RFC 3339 (converted to UTC) and bare dates (midnight).
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let v = value.trim();

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(v, format) {
            return Ok(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(v) {
        return Ok(ts.naive_utc());
    }
    if let Some(ts) = NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(ts);
    }

    Err(FeatureError::InvalidTimestamp {
        value: value.to_string(),
    })
}

/// Like [`parse_timestamp`], but an empty field means "absent".
pub fn parse_optional_timestamp(value: &str) -> Result<Option<NaiveDateTime>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_timestamp(value).map(Some)
    }
}

/// Month and day-of-week of a purchase.
pub fn calendar_of(ts: &NaiveDateTime) -> CalendarInput {
    CalendarInput {
        month: ts.month(),
        day_of_week: ts.weekday().num_days_from_monday(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset_format() {
        let ts = parse_timestamp("2017-10-02 10:56:33").unwrap();
        assert_eq!(ts.to_string(), "2017-10-02 10:56:33");
    }

    #[test]
    fn test_parse_iso_and_rfc3339() {
        let naive = parse_timestamp("2018-01-05T08:00:00").unwrap();
        let offset = parse_timestamp("2018-01-05T05:00:00-03:00").unwrap();
        assert_eq!(naive, offset);
    }

    #[test]
    fn test_parse_bare_date() {
        let ts = parse_timestamp("2017-11-24").unwrap();
        assert_eq!(ts.to_string(), "2017-11-24 00:00:00");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "yesterday", "2017-13-01 00:00:00", "2017/10/02", "02-10-2017"] {
            assert!(
                matches!(parse_timestamp(bad), Err(FeatureError::InvalidTimestamp { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_optional_empty_is_none() {
        assert_eq!(parse_optional_timestamp("  ").unwrap(), None);
        assert!(parse_optional_timestamp("2017-10-02").unwrap().is_some());
        assert!(parse_optional_timestamp("nope").is_err());
    }

    #[test]
    fn test_calendar_year_boundary() {
        let dec = calendar_of(&parse_timestamp("2017-12-31 23:59:59").unwrap());
        let jan = calendar_of(&parse_timestamp("2018-01-01 00:00:00").unwrap());
        assert_eq!(dec.month, 12);
        assert_eq!(jan.month, 1);
        // 2017-12-31 was a Sunday, 2018-01-01 a Monday
        assert_eq!(dec.day_of_week, 6);
        assert_eq!(jan.day_of_week, 0);
    }
}
