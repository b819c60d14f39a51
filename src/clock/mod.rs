//! Wall-clock reading and ctime-style formatting.
//!
//! Time strings use the fixed English layout `Www Mmm dd hh:mm:ss yyyy\n`
//! with the day of month space-padded, independent of the process locale.
//! Every call builds a fresh `String`; nothing is shared between callers.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::models::error::{UtilResult, UtilityError};

/// ctime layout, trailing newline included.
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y\n";

/// Source of the current time.
///
/// Lets tests pin the clock instead of reading the system one.
pub trait Clock: Send + Sync {
    /// Returns the current UTC instant, or `ClockUnavailable`.
    fn now(&self) -> UtilResult<DateTime<Utc>>;
}

/// The operating system's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtilResult<DateTime<Utc>> {
        utc_from_system_time(SystemTime::now())
    }
}

/// Converts a `SystemTime` on either side of the Unix epoch.
///
/// Fails with `ClockUnavailable` only when chrono cannot represent it.
pub fn utc_from_system_time(time: SystemTime) -> UtilResult<DateTime<Utc>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok(), after.subsec_nanos()),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok().map(|s| -s);
            match before.subsec_nanos() {
                0 => (secs, 0),
                n => (secs.and_then(|s| s.checked_sub(1)), 1_000_000_000 - n),
            }
        }
    };
    secs.and_then(|s| DateTime::<Utc>::from_timestamp(s, nanos))
        .ok_or_else(|| UtilityError::ClockUnavailable(format!("{time:?} not representable")))
}

/// Formats `time` with [`CTIME_FORMAT`].
pub fn format_ctime<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.format(CTIME_FORMAT).to_string()
}

/// Reads `clock` and formats the instant in the local time zone.
pub fn time_string_from(clock: &dyn Clock) -> UtilResult<String> {
    let now = clock.now().map_err(|err| {
        tracing::warn!(error = %err, "failed to read clock");
        err
    })?;
    Ok(format_ctime(&now.with_timezone(&Local)))
}

/// Current local time as an owned ctime-style string.
pub fn current_time_string() -> UtilResult<String> {
    time_string_from(&SystemClock)
}
