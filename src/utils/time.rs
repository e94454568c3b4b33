use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::constants::DEFAULT_RANGE_LOOKBACK_SECS;
use crate::error::{QueryError, Result};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Parse a Unix timestamp in (fractional) seconds or an RFC 3339 time
pub fn parse_time(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(secs) = trimmed.parse::<f64>() {
        if !secs.is_finite() {
            return Err(invalid_time(input));
        }
        let whole = secs.floor();
        let nanos = ((secs - whole) * NANOS_PER_SECOND).round().min(NANOS_PER_SECOND - 1.0);
        return Utc
            .timestamp_opt(whole as i64, nanos as u32)
            .single()
            .ok_or_else(|| invalid_time(input));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| invalid_time(input))
}

/// Render a time as Unix seconds, keeping milliseconds only when present
pub fn format_time(time: &DateTime<Utc>) -> String {
    let millis = time.timestamp_subsec_millis();
    if millis == 0 {
        return time.timestamp().to_string();
    }
    let rendered = format!("{}.{:03}", time.timestamp(), millis);
    rendered.trim_end_matches('0').to_string()
}

/// Fill in missing range bounds and check their order.
///
/// A missing end means now and a missing start means five minutes before
/// the end. Both bounds are sent as Unix seconds.
pub fn resolve_range(start: &str, end: &str) -> Result<(String, String)> {
    let end = if end.is_empty() {
        Utc::now()
    } else {
        parse_time(end)?
    };

    let start = if start.is_empty() {
        end - TimeDelta::seconds(DEFAULT_RANGE_LOOKBACK_SECS)
    } else {
        parse_time(start)?
    };

    if start >= end {
        return Err(QueryError::InvalidArgument(format!(
            "start time {} is not before end time {}",
            start.to_rfc3339(),
            end.to_rfc3339()
        )));
    }

    Ok((format_time(&start), format_time(&end)))
}

fn invalid_time(input: &str) -> QueryError {
    QueryError::InvalidArgument(format!(
        "invalid time '{}': expected a Unix timestamp or an RFC 3339 time",
        input
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("0").unwrap(), Utc.timestamp_opt(0, 0).unwrap());
        assert_eq!(
            parse_time("1.5").unwrap(),
            Utc.timestamp_opt(1, 500_000_000).unwrap()
        );
        assert_eq!(
            parse_time("2024-01-01T01:00:00Z").unwrap().timestamp(),
            1_704_070_800
        );
        assert_eq!(
            parse_time("2024-01-01T03:00:00+02:00").unwrap().timestamp(),
            1_704_070_800
        );
        assert!(parse_time("yesterday").is_err());
        assert!(parse_time("NaN").is_err());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(&Utc.timestamp_opt(300, 0).unwrap()), "300");
        assert_eq!(
            format_time(&Utc.timestamp_opt(12, 250_000_000).unwrap()),
            "12.25"
        );
    }

    #[test]
    fn test_resolve_range_explicit() {
        let (start, end) = resolve_range("0", "300").unwrap();
        assert_eq!(start, "0");
        assert_eq!(end, "300");
    }

    #[test]
    fn test_resolve_range_default_start() {
        let (start, end) = resolve_range("", "1000").unwrap();
        assert_eq!(start, "700");
        assert_eq!(end, "1000");
    }

    #[test]
    fn test_resolve_range_default_end() {
        let (start, end) = resolve_range("", "").unwrap();
        let start: f64 = start.parse().unwrap();
        let end: f64 = end.parse().unwrap();
        assert!((end - start - DEFAULT_RANGE_LOOKBACK_SECS as f64).abs() < 0.01);
    }

    #[test]
    fn test_resolve_range_rfc3339() {
        let (start, end) =
            resolve_range("2024-01-01T00:00:00Z", "2024-01-01T01:00:00Z").unwrap();
        assert_eq!(start, "1704067200");
        assert_eq!(end, "1704070800");
    }

    #[test]
    fn test_resolve_range_rfc3339_default_start() {
        let (start, end) = resolve_range("", "2024-01-01T01:00:00Z").unwrap();
        assert_eq!(start, "1704070500");
        assert_eq!(end, "1704070800");
    }

    #[test]
    fn test_resolve_range_unordered() {
        assert!(matches!(
            resolve_range("300", "0"),
            Err(QueryError::InvalidArgument(_))
        ));
        assert!(matches!(
            resolve_range("2024-01-01T02:00:00Z", "2024-01-01T01:00:00Z"),
            Err(QueryError::InvalidArgument(_))
        ));
        assert!(resolve_range("300", "300").is_err());
    }

    #[test]
    fn test_resolve_range_invalid_time() {
        assert!(matches!(
            resolve_range("soon", "300"),
            Err(QueryError::InvalidArgument(_))
        ));
    }
}
