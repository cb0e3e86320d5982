use chrono::{Datelike, Offset, TimeZone, Timelike};

use crate::Moment;
use crate::consts::{ISO_8601, RFC_2822};
use crate::locale::{Locale, timezone_offset_minutes};
use crate::pattern::{Code, Token, tokenize};

/// Renders an instant with a pattern of the mini-language described in
/// [`pattern`](crate::pattern), reading display names from the given
/// locale.
///
/// Every placeholder has a defined rendering for every `Moment`, so the
/// call is total; unassigned letters and other literal text copy
/// through unchanged.
pub fn format<Tz: TimeZone>(moment: &Moment<Tz>, pattern: &str, locale: &Locale) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for token in tokenize(pattern) {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Code(code) => render(moment, code, locale, &mut out),
        }
    }
    out
}

impl<Tz: TimeZone> Moment<Tz> {
    /// Renders the instant with the given pattern and locale.
    /// See [`format`].
    pub fn format_with(&self, pattern: &str, locale: &Locale) -> String {
        format(self, pattern, locale)
    }
}

fn render<Tz: TimeZone>(moment: &Moment<Tz>, code: Code, locale: &Locale, out: &mut String) {
    match code {
        Code::Year => out.push_str(&moment.0.year().to_string()),
        Code::IsoYear => out.push_str(&moment.iso_year().to_string()),
        Code::YearShort => out.push_str(&format!("{:02}", moment.0.year().rem_euclid(100))),
        Code::LeapFlag => out.push(if moment.is_leap_year() { '1' } else { '0' }),
        Code::MonthName => out.push_str(moment.month_name(locale)),
        Code::MonthAbbr => out.push_str(moment.month_abbr(locale)),
        Code::MonthPadded => out.push_str(&format!("{:02}", moment.0.month())),
        Code::MonthNumber => out.push_str(&moment.0.month().to_string()),
        Code::MonthLength => out.push_str(&moment.days_in_month().to_string()),
        Code::IsoWeek => out.push_str(&format!("{:02}", moment.iso_week_number())),
        Code::DayAbbr => out.push_str(moment.day_abbr(locale)),
        Code::DayName => out.push_str(moment.day_name(locale)),
        Code::IsoWeekday => out.push_str(&moment.iso_weekday().to_string()),
        Code::WeekdayNumber => {
            out.push_str(&moment.0.weekday().num_days_from_sunday().to_string());
        }
        Code::OrdinalZero => out.push_str(&moment.0.ordinal0().to_string()),
        Code::DayPadded => out.push_str(&format!("{:02}", moment.0.day())),
        Code::DayNumber => out.push_str(&moment.0.day().to_string()),
        Code::Hour12Padded => out.push_str(&format!("{:02}", moment.0.hour12().1)),
        Code::Hour12 => out.push_str(&moment.0.hour12().1.to_string()),
        Code::Hour24Padded => out.push_str(&format!("{:02}", moment.0.hour())),
        Code::Hour24 => out.push_str(&moment.0.hour().to_string()),
        Code::Minute => out.push_str(&format!("{:02}", moment.0.minute())),
        Code::Second => out.push_str(&format!("{:02}", moment.0.second())),
        Code::Millis => out.push_str(&format!("{:03}", millis(moment))),
        Code::Micros => out.push_str(&format!("{:03}000", millis(moment))),
        Code::MeridiemUpper => out.push_str(if moment.0.hour12().0 { "PM" } else { "AM" }),
        Code::MeridiemLower => out.push_str(if moment.0.hour12().0 { "pm" } else { "am" }),
        Code::OffsetBasic => out.push_str(&offset_basic(offset_minutes_east(moment))),
        Code::OffsetColon => {
            let east = offset_minutes_east(moment);
            let sign = if east < 0 { '-' } else { '+' };
            out.push_str(&format!("{sign}{:02}:{:02}", east.abs() / 60, east.abs() % 60));
        }
        Code::OffsetSeconds => {
            out.push_str(&moment.0.offset().fix().local_minus_utc().to_string());
        }
        Code::TzName => {
            let east = offset_minutes_east(moment);
            let abbr = locale
                .timezones
                .iter()
                .find(|abbr| timezone_offset_minutes(abbr) == Some(east));
            match abbr {
                Some(abbr) => out.push_str(abbr),
                None => out.push_str(&format!("UTC{}", offset_basic(east))),
            }
        }
        Code::Iso8601 => out.push_str(&format(moment, ISO_8601, locale)),
        Code::Rfc2822 => out.push_str(&format(moment, RFC_2822, locale)),
        Code::EpochSeconds => {
            out.push_str(&moment.epoch_millis().div_euclid(1000).to_string());
        }
    }
}

fn millis<Tz: TimeZone>(moment: &Moment<Tz>) -> u32 {
    // Leap-second nanos would overflow the three digits; clamp them
    (moment.0.nanosecond() / 1_000_000).min(999)
}

fn offset_minutes_east<Tz: TimeZone>(moment: &Moment<Tz>) -> i32 {
    moment.0.offset().fix().local_minus_utc() / 60
}

fn offset_basic(minutes_east: i32) -> String {
    let sign = if minutes_east < 0 { '-' } else { '+' };
    let abs = minutes_east.abs();
    format!("{sign}{:02}{:02}", abs / 60, abs % 60)
}
