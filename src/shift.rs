use chrono::{Days, Months, NaiveDateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::consts::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::{Moment, resolve_wall_clock};

/// A calendar-aware displacement: so many years, months, days and so
/// much time. Fields default to zero, so struct-update syntax applies
/// just the units named:
///
/// ```
/// # use almanac::Shift;
/// let two_weeks_back = Shift { days: -14, ..Shift::default() };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shift {
    pub years: i32,
    pub months: i32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis: i64,
}

impl Shift {
    /// The time-of-day part collapsed to milliseconds, `None` on
    /// overflow.
    fn time_millis(&self) -> Option<i64> {
        self.hours
            .checked_mul(MILLIS_PER_HOUR)?
            .checked_add(self.minutes.checked_mul(MILLIS_PER_MINUTE)?)?
            .checked_add(self.seconds.checked_mul(MILLIS_PER_SECOND)?)?
            .checked_add(self.millis)
    }
}

impl<Tz: TimeZone> Moment<Tz> {
    /// Moves the instant along the epoch timeline by a raw millisecond
    /// delta.
    ///
    /// Returns the new epoch milliseconds, or `None` when the result is
    /// unrepresentable; the instant is left unchanged on `None`.
    pub fn shift_millis(&mut self, millis: i64) -> Option<i64> {
        let shifted = self
            .0
            .clone()
            .checked_add_signed(TimeDelta::try_milliseconds(millis)?)?;
        self.0 = shifted;
        Some(self.epoch_millis())
    }

    /// Moves the instant by calendar units: years, then months, then
    /// days on the local calendar (preserving the wall-clock time, with
    /// month arithmetic clamping to the target month's last day), then
    /// the time-of-day units along the epoch timeline.
    ///
    /// Returns the new epoch milliseconds, or `None` when any step is
    /// unrepresentable; the instant is left unchanged on `None`.
    pub fn shift_by(&mut self, shift: Shift) -> Option<i64> {
        let mut wall = self.0.naive_local();
        wall = add_months(wall, i64::from(shift.years).checked_mul(12)?)?;
        wall = add_months(wall, i64::from(shift.months))?;
        wall = add_days(wall, shift.days)?;
        let resolved = resolve_wall_clock(&self.0.timezone(), wall)?;
        let shifted = resolved.checked_add_signed(TimeDelta::try_milliseconds(shift.time_millis()?)?)?;
        self.0 = shifted;
        Some(self.epoch_millis())
    }

    /// An independent copy moved by the given calendar units; the
    /// original is untouched.
    pub fn shifted_by(&self, shift: Shift) -> Option<Self> {
        let mut copy = self.clone();
        copy.shift_by(shift)?;
        Some(copy)
    }

    /// An independent copy moved by a raw millisecond delta; the
    /// original is untouched.
    pub fn shifted_millis(&self, millis: i64) -> Option<Self> {
        let mut copy = self.clone();
        copy.shift_millis(millis)?;
        Some(copy)
    }
}

fn add_months(wall: NaiveDateTime, delta: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(delta.unsigned_abs()).ok()?);
    if delta >= 0 {
        wall.checked_add_months(months)
    } else {
        wall.checked_sub_months(months)
    }
}

fn add_days(wall: NaiveDateTime, delta: i64) -> Option<NaiveDateTime> {
    let days = Days::new(delta.unsigned_abs());
    if delta >= 0 {
        wall.checked_add_days(days)
    } else {
        wall.checked_sub_days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixed, moment_in};
    use chrono::NaiveDate;
    use chrono_tz::America::New_York;

    #[test]
    fn test_shift_millis_moves_the_timeline() {
        let tz = fixed(1);
        let mut moment = moment_in(&tz, 2024, 3, 5, 14, 30, 0);
        let base = moment.epoch_millis();

        assert_eq!(moment.shift_millis(1500), Some(base + 1500));
        assert_eq!(moment.to_string(), "2024-03-05 14:30:01.500000");

        assert_eq!(moment.shift_millis(-1500), Some(base));
        assert_eq!(moment.to_string(), "2024-03-05 14:30:00.000000");
    }

    #[test]
    fn test_month_shift_clamps_to_month_end() {
        let tz = fixed(0);
        // January 31 has no February counterpart; chrono clamps to the
        // last day instead of overflowing into March
        let mut moment = moment_in(&tz, 2024, 1, 31, 12, 0, 0);
        moment.shift_by(Shift { months: 1, ..Shift::default() }).unwrap();
        assert_eq!(moment.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let mut common = moment_in(&tz, 2023, 1, 31, 12, 0, 0);
        common.shift_by(Shift { months: 1, ..Shift::default() }).unwrap();
        assert_eq!(common.date_naive(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());

        // A leap day one year later clamps too
        let mut leap = moment_in(&tz, 2024, 2, 29, 12, 0, 0);
        leap.shift_by(Shift { years: 1, ..Shift::default() }).unwrap();
        assert_eq!(leap.date_naive(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_shift_applies_units_in_calendar_order() {
        let tz = fixed(0);
        let mut moment = moment_in(&tz, 2024, 1, 31, 23, 30, 0);
        let shifted = moment.shift_by(Shift {
            years: 1,
            months: 1,
            days: 2,
            hours: 1,
            minutes: 15,
            seconds: 30,
            millis: 250,
        });
        // 2024-01-31 -> 2025-01-31 -> 2025-02-28 -> 2025-03-02 at
        // 23:30, then 1h 15m 30.25s of timeline
        assert_eq!(shifted, Some(moment.epoch_millis()));
        assert_eq!(moment.to_string(), "2025-03-03 00:45:30.250000");
    }

    #[test]
    fn test_negative_shifts_reverse() {
        let tz = fixed(0);
        let mut moment = moment_in(&tz, 2024, 3, 31, 12, 0, 0);
        moment.shift_by(Shift { months: -1, ..Shift::default() }).unwrap();
        assert_eq!(moment.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        moment.shift_by(Shift { days: -29, ..Shift::default() }).unwrap();
        assert_eq!(moment.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_day_shift_preserves_wall_clock_across_dst() {
        // Crossing the spring-forward night keeps 12:00 on the clock,
        // so the elapsed real time is 23 hours
        let mut moment = moment_in(&New_York, 2024, 3, 9, 12, 0, 0);
        let before = moment.epoch_millis();
        moment.shift_by(Shift { days: 1, ..Shift::default() }).unwrap();
        assert_eq!(
            moment.naive_local(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
        assert_eq!(moment.epoch_millis() - before, 23 * 3_600_000);

        // An hour shift is pure timeline: the clock shows the jump
        let mut hour = moment_in(&New_York, 2024, 3, 10, 1, 30, 0);
        hour.shift_by(Shift { hours: 1, ..Shift::default() }).unwrap();
        assert_eq!(
            hour.naive_local(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(3, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_shifted_clones_leave_the_original() {
        let tz = fixed(1);
        let moment = moment_in(&tz, 2024, 3, 5, 14, 30, 0);
        let later = moment.shifted_by(Shift { days: 7, ..Shift::default() }).unwrap();
        assert_eq!(later.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        assert_eq!(moment.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        let nudged = moment.shifted_millis(250).unwrap();
        assert_eq!(nudged.epoch_millis() - moment.epoch_millis(), 250);
    }

    #[test]
    fn test_failed_shift_leaves_the_instant_unchanged() {
        let tz = fixed(0);
        let mut moment = moment_in(&tz, 2024, 3, 5, 14, 30, 0);
        let before = moment.epoch_millis();
        assert_eq!(moment.shift_by(Shift { years: i32::MAX, ..Shift::default() }), None);
        assert_eq!(moment.epoch_millis(), before);
    }

    #[test]
    fn test_shift_serde_defaults_missing_fields() {
        let shift: Shift = serde_json::from_str(r#"{"days": 3, "hours": -2}"#).unwrap();
        assert_eq!(shift, Shift { days: 3, hours: -2, ..Shift::default() });

        let json = serde_json::to_string(&Shift { months: 1, ..Shift::default() }).unwrap();
        let round: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(round, Shift { months: 1, ..Shift::default() });
    }
}
