//! Calendar math and a pattern-driven date formatter/parser with
//! pluggable locales.
//!
//! The central type is [`Moment`], a point in time with millisecond
//! resolution read through the calendar of the zone it carries. Around
//! it the crate provides derived calendar fields (ISO week and year,
//! ordinal day, leap years, Easter, DST transition points), a PHP-style
//! pattern mini-language for rendering ([`format`]) and its structural
//! inverse for reading ([`parse`]), and calendar-aware date arithmetic
//! ([`Shift`]).
//!
//! The crate never consults the IANA timezone database: it only asks
//! the zone a `Moment` carries for its offset at a given instant.
//! Locale tables ([`Locale`]) are plain injected data.
//!
//! ```
//! use almanac::{DBD, Locale, Moment};
//! use chrono::FixedOffset;
//!
//! let tz = FixedOffset::east_opt(3600).unwrap();
//! let moment = Moment::parse_in(&tz, "2024-03-05 14:30", "Y-m-d H:i", Locale::en()).unwrap();
//! assert_eq!(moment.format_with(DBD, Locale::en()), "2024-03-05");
//! ```

mod calendar;
mod consts;
mod format;
mod locale;
mod parse;
mod pattern;
mod prelude;
mod shift;
#[cfg(test)]
mod test_utils;

pub use calendar::{days_in_month, easter, is_leap_year};
pub use consts::{DAYS_IN_MONTH, DBD, DBT, EUD, EUR, ISO_8601, JPD, JPN, ORD, ORT, RFC_2822, USA, USD};
pub use format::format;
pub use locale::{Locale, timezone_offset_minutes};
pub use parse::{ParseError, parse, parse_auto};
pub use pattern::{Code, Token, tokenize};
pub use shift::Shift;

use crate::prelude::*;
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone};

/// A point in time with millisecond resolution, read through the local
/// calendar of the zone it was created in.
///
/// `Moment` wraps a [`chrono::DateTime`] and dereferences to it, so all
/// of chrono's field accessors ([`Datelike`](chrono::Datelike),
/// [`Timelike`](chrono::Timelike)) are available directly. Construction
/// is fallible: an epoch-millisecond count outside the representable
/// range yields `None`, so a `Moment` always denotes a real calendar
/// point and formatting is total.
#[derive(Debug, Clone, Deref, From)]
pub struct Moment<Tz: TimeZone = chrono::Local>(pub(crate) DateTime<Tz>);

impl Moment {
    /// The current instant in the system's local zone.
    pub fn now() -> Self {
        Self(chrono::Local::now())
    }

    /// Builds a local-zone instant from a signed epoch-millisecond
    /// count, `None` when the count is outside the representable range.
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        Self::from_epoch_millis_in(&chrono::Local, millis)
    }
}

impl<Tz: TimeZone> Moment<Tz> {
    /// Builds an instant in the given zone from a signed
    /// epoch-millisecond count, `None` when the count is outside the
    /// representable range.
    pub fn from_epoch_millis_in(tz: &Tz, millis: i64) -> Option<Self> {
        Some(Self(DateTime::from_timestamp_millis(millis)?.with_timezone(tz)))
    }

    /// Signed milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The wrapped [`chrono::DateTime`].
    pub fn into_inner(self) -> DateTime<Tz> {
        self.0
    }
}

impl<Tz: TimeZone> PartialEq for Moment<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<Tz: TimeZone> Eq for Moment<Tz> {}

impl<Tz: TimeZone> std::fmt::Display for Moment<Tz> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format(self, DBT, Locale::en()))
    }
}

/// Resolves a wall-clock time in a zone to a concrete instant.
///
/// Times a fall-back transition makes ambiguous resolve to the earlier
/// instant; times a spring-forward gap swallows are read with the
/// offset in force just before the transition, so the result lands
/// right after the gap (a gap-time 02:30 becomes 03:30 across a
/// one-hour jump).
pub(crate) fn resolve_wall_clock<Tz: TimeZone>(
    tz: &Tz,
    wall: NaiveDateTime,
) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => {
            let probe = wall.checked_sub_signed(TimeDelta::days(1))?;
            let before = chrono::Offset::fix(&tz.offset_from_utc_datetime(&probe));
            let utc = wall.checked_sub_signed(TimeDelta::seconds(i64::from(
                before.local_minus_utc(),
            )))?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}
