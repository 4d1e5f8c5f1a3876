//! Clock and duration text formats
//!
//! Event timestamps and the race report both use `HH:MM:SS.mmm`. For a
//! time of day the hours wrap at 24; for a duration they are unbounded.

use crate::types::{BiathlonError, Result};
use chrono::{Duration, NaiveTime, Timelike};

/// Time-of-day format with milliseconds
pub const CLOCK_FORMAT: &str = "%H:%M:%S%.3f";

/// Time-of-day format without milliseconds (accepted in config files)
pub const CLOCK_FORMAT_NO_MS: &str = "%H:%M:%S";

/// Parse a strict `HH:MM:SS.mmm` time of day
pub fn parse_clock(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text, CLOCK_FORMAT)
        .map_err(|_| BiathlonError::InvalidTime(text.to_string()))
}

/// Parse `HH:MM:SS.mmm`, falling back to `HH:MM:SS`
pub fn parse_clock_lenient(text: &str) -> Result<NaiveTime> {
    parse_clock(text).or_else(|_| {
        NaiveTime::parse_from_str(text, CLOCK_FORMAT_NO_MS)
            .map_err(|_| BiathlonError::InvalidTime(text.to_string()))
    })
}

/// Render a time of day as `HH:MM:SS.mmm`
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Whole seconds elapsed since midnight; sub-second precision is dropped
pub fn clock_as_duration(time: NaiveTime) -> Duration {
    Duration::seconds(i64::from(time.num_seconds_from_midnight()))
}

/// Render a duration as `HH:MM:SS.mmm`
///
/// Each component is truncated independently, so hours are not capped at 24.
pub fn format_duration(d: Duration) -> String {
    let hours = d.num_hours();
    let minutes = d.num_minutes() % 60;
    let seconds = d.num_seconds() % 60;
    let millis = d.num_milliseconds() % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Parse a non-negative `HH:MM:SS.mmm` duration (hours may exceed 23)
pub fn parse_duration(text: &str) -> Result<Duration> {
    let invalid = || BiathlonError::InvalidDuration(text.to_string());

    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), Some(rest), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let (seconds, millis) = rest.split_once('.').ok_or_else(invalid)?;

    if minutes.len() != 2 || seconds.len() != 2 || millis.len() != 3 || hours.len() < 2 {
        return Err(invalid());
    }

    let number = |s: &str| -> Result<i64> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<i64>().map_err(|_| invalid())
    };

    let hours = number(hours)?;
    let minutes = number(minutes)?;
    let seconds = number(seconds)?;
    let millis = number(millis)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    Ok(Duration::hours(hours)
        + Duration::minutes(minutes)
        + Duration::seconds(seconds)
        + Duration::milliseconds(millis))
}
