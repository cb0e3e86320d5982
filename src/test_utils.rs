//! Shared helpers for the module tests.

use chrono::{FixedOffset, NaiveDate, TimeZone};

use crate::Moment;

/// A fixed offset of the given whole hours east of UTC.
pub fn fixed(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap()
}

/// Builds a moment from local calendar fields in the given zone.
/// Panics on unrepresentable or ambiguous wall-clock times.
pub fn moment_in<Tz: TimeZone>(
    tz: &Tz,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Moment<Tz> {
    moment_ms_in(tz, year, month, day, hour, minute, second, 0)
}

/// Like [`moment_in`], with explicit milliseconds.
#[allow(clippy::too_many_arguments)]
pub fn moment_ms_in<Tz: TimeZone>(
    tz: &Tz,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    milli: u32,
) -> Moment<Tz> {
    let wall = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_milli_opt(hour, minute, second, milli)
        .unwrap();
    Moment(tz.from_local_datetime(&wall).single().unwrap())
}
