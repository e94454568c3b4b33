use std::time::Duration;

use crate::constants::DEFAULT_STEP;
use crate::error::{QueryError, Result};

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: u64 = 7 * MILLIS_PER_DAY;
const MILLIS_PER_YEAR: u64 = 365 * MILLIS_PER_DAY;

/// Parse a step duration.
///
/// Accepts a plain number of seconds (`15`, `0.5`) or a Prometheus duration
/// made of `<integer><unit>` pairs (`10ms`, `1m30s`, `2h`). Units are `ms`,
/// `s`, `m`, `h`, `d`, `w` and `y`, each used at most once from largest to
/// smallest. An empty string is a zero duration.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Duration::ZERO);
    }

    if let Ok(secs) = trimmed.parse::<f64>() {
        if !secs.is_finite() || secs < 0.0 {
            return Err(invalid_duration(input));
        }
        return Duration::try_from_secs_f64(secs).map_err(|_| invalid_duration(input));
    }

    let mut total_millis: u64 = 0;
    let mut previous_unit = u64::MAX;
    let mut rest = trimmed;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(invalid_duration(input));
        }
        let value: u64 = rest[..digits_end]
            .parse()
            .map_err(|_| invalid_duration(input))?;
        rest = &rest[digits_end..];

        let unit_end = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let unit_millis = match &rest[..unit_end] {
            "ms" => 1,
            "s" => MILLIS_PER_SECOND,
            "m" => MILLIS_PER_MINUTE,
            "h" => MILLIS_PER_HOUR,
            "d" => MILLIS_PER_DAY,
            "w" => MILLIS_PER_WEEK,
            "y" => MILLIS_PER_YEAR,
            _ => return Err(invalid_duration(input)),
        };
        if unit_millis >= previous_unit {
            return Err(invalid_duration(input));
        }
        previous_unit = unit_millis;
        rest = &rest[unit_end..];

        total_millis = value
            .checked_mul(unit_millis)
            .and_then(|millis| total_millis.checked_add(millis))
            .ok_or_else(|| invalid_duration(input))?;
    }

    Ok(Duration::from_millis(total_millis))
}

/// Render a step as the decimal number of seconds the API expects.
///
/// Sub-second steps keep their fraction (10ms is `0.01`); a zero step falls
/// back to one second.
pub fn format_step(step: Duration) -> String {
    if step.is_zero() {
        return DEFAULT_STEP.to_string();
    }
    format!("{}", step.as_secs_f64())
}

fn invalid_duration(input: &str) -> QueryError {
    QueryError::InvalidArgument(format!(
        "invalid duration '{}': expected seconds (e.g. 15) or a duration like 1m30s",
        input
    ))
}
