use chrono::{DateTime, Datelike, Days, NaiveDate, Offset, TimeDelta, TimeZone, Timelike, Weekday};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DST_SEARCH_STEP, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
};
use crate::{Moment, resolve_wall_clock};

/// Checks if a year is leap under the Gregorian rule.
pub fn is_leap_year(year: i32) -> bool {
    year % LEAP_YEAR_CYCLE == 0 && (year % CENTURY_CYCLE != 0 || year % GREGORIAN_CYCLE == 0)
}

/// Returns the number of days in a month, 0 when the month number is
/// out of range.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == FEBRUARY && is_leap_year(year) {
        return u32::from(FEBRUARY_DAYS_LEAP);
    }
    DAYS_IN_MONTH
        .get(month as usize)
        .copied()
        .map_or(0, u32::from)
}

/// Gregorian Easter Sunday for a given year, computed with the
/// Meeus/Jones/Butcher algorithm. Always lands in March or April.
///
/// Returns `None` when the year is outside the representable date range.
pub fn easter(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let month = (h + l - 7 * m + 114).div_euclid(31);
    let day = (h + l - 7 * m + 114).rem_euclid(31) + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

impl<Tz: TimeZone> Moment<Tz> {
    /// Checks if the instant's local year is leap.
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.0.year())
    }

    /// Checks if two instants fall on the same local calendar day.
    pub fn is_same_day(&self, other: &Self) -> bool {
        self.date_naive() == other.date_naive()
    }

    /// Checks if the instant falls on Easter Sunday.
    pub fn is_easter(&self) -> bool {
        if self.0.weekday() != Weekday::Sun {
            return false;
        }
        let (month, day) = (self.0.month(), self.0.day());
        // Easter can only land on March 22 through April 25
        let in_window = (month == 3 && day >= 22) || (month == 4 && day <= 25);
        in_window
            && easter(self.0.year()).is_some_and(|date| date.month() == month && date.day() == day)
    }

    /// One-based ordinal day of the local year, 1 through 366.
    pub fn ordinal_day(&self) -> u32 {
        self.0.ordinal()
    }

    /// ISO 8601 week-numbering year of the instant. Differs from the
    /// calendar year around January 1st.
    pub fn iso_year(&self) -> i32 {
        self.0.iso_week().year()
    }

    /// ISO 8601 week number of the instant, 1 through 53.
    pub fn iso_week_number(&self) -> u32 {
        self.0.iso_week().week()
    }

    /// Moves the instant to the given ISO week of the same
    /// week-numbering year, keeping the weekday and the wall-clock time.
    ///
    /// Returns the new epoch milliseconds, or `None` when the result is
    /// unrepresentable; the instant is left unchanged on `None`.
    pub fn set_iso_week(&mut self, week: u32) -> Option<i64> {
        let delta = (i64::from(week) - i64::from(self.iso_week_number())) * 7;
        self.move_local_days(delta)
    }

    /// ISO 8601 weekday number, Monday 1 through Sunday 7.
    pub fn iso_weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Moves the instant to the given weekday within its Sunday-started
    /// week, keeping the wall-clock time.
    ///
    /// Returns the new epoch milliseconds, or `None` when the result is
    /// unrepresentable; the instant is left unchanged on `None`.
    pub fn set_weekday(&mut self, day: Weekday) -> Option<i64> {
        let current = self.0.weekday().num_days_from_sunday();
        self.move_local_days(i64::from(day.num_days_from_sunday()) - i64::from(current))
    }

    /// Moves the instant to the given weekday within its ISO
    /// (Monday-started) week, keeping the wall-clock time.
    ///
    /// Returns the new epoch milliseconds, or `None` when the result is
    /// unrepresentable; the instant is left unchanged on `None`.
    pub fn set_iso_weekday(&mut self, day: Weekday) -> Option<i64> {
        let current = self.0.weekday().number_from_monday();
        self.move_local_days(i64::from(day.number_from_monday()) - i64::from(current))
    }

    /// Number of days in the instant's local month.
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.0.year(), self.0.month())
    }

    /// Wall-clock milliseconds since local midnight.
    ///
    /// Computed from the local time-of-day fields, so on a day with a
    /// DST transition this is not the elapsed real time since midnight.
    pub fn millis_since_midnight(&self) -> i64 {
        let time = self.0.time();
        i64::from(time.hour()) * MILLIS_PER_HOUR
            + i64::from(time.minute()) * MILLIS_PER_MINUTE
            + i64::from(time.second()) * MILLIS_PER_SECOND
            + i64::from(time.nanosecond() / 1_000_000)
    }

    /// UTC offset delta across the instant's local day in minutes east:
    /// offset at the next local midnight minus offset at the day's own
    /// midnight. `Some(0)` on days without a transition.
    pub fn dst_change_minutes(&self) -> Option<i32> {
        let (midnight, next) = self.day_bounds()?;
        let east1 = midnight.offset().fix().local_minus_utc();
        let east2 = next.offset().fix().local_minus_utc();
        Some((east2 - east1).div_euclid(60))
    }

    /// The instant the UTC offset changes during the instant's local
    /// day, at 15-minute granularity. Returns the day's local midnight
    /// when no transition happens.
    pub fn dst_changepoint(&self) -> Option<Self> {
        let tz = self.0.timezone();
        let (midnight, next) = self.day_bounds()?;
        let east_midnight = midnight.offset().fix().local_minus_utc();
        if next.offset().fix().local_minus_utc() == east_midnight {
            return Some(Self(midnight));
        }

        // Binary search between the two midnights: t1 keeps the old
        // offset, t2 the new one. Probes snap down to the 15-minute
        // grid, which every transition since the timezone database era
        // falls on.
        let mut t1 = midnight.timestamp_millis();
        let mut t2 = next.timestamp_millis();
        while t2 - t1 > DST_SEARCH_STEP {
            let mid = (t1 + t2).div_euclid(2).div_euclid(DST_SEARCH_STEP) * DST_SEARCH_STEP;
            if mid <= t1 {
                // Bounds off the grid (pre-database local mean time)
                break;
            }
            let probe = DateTime::from_timestamp_millis(mid)?.with_timezone(&tz);
            if probe.offset().fix().local_minus_utc() == east_midnight {
                t1 = mid;
            } else {
                t2 = mid;
            }
        }
        Self::from_epoch_millis_in(&tz, t2)
    }

    /// Resolved local midnight of the instant's day and of the next day.
    fn day_bounds(&self) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let tz = self.0.timezone();
        let date = self.date_naive();
        let midnight = resolve_wall_clock(&tz, date.and_hms_opt(0, 0, 0)?)?;
        let next_date = date.checked_add_days(Days::new(1))?;
        let next = resolve_wall_clock(&tz, next_date.and_hms_opt(0, 0, 0)?)?;
        Some((midnight, next))
    }

    /// Shifts the local calendar date by whole days, keeping the
    /// wall-clock time, and re-resolves in the instant's zone.
    fn move_local_days(&mut self, days: i64) -> Option<i64> {
        let shifted = self
            .0
            .naive_local()
            .checked_add_signed(TimeDelta::try_days(days)?)?;
        let resolved = resolve_wall_clock(&self.0.timezone(), shifted)?;
        self.0 = resolved;
        Some(self.epoch_millis())
    }
}
