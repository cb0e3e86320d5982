use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

use crate::calendar::days_in_month;
use crate::locale::{Locale, TIMEZONES};
use crate::pattern::{Code, Token, tokenize};
use crate::{Moment, resolve_wall_clock};

/// The ways a date string can fail to become an instant. Bad input is
/// always reported through this enum, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    EmptyInput,
    #[error("input does not match the pattern")]
    Unmatched,
    #[error("unrecognized date string")]
    Unrecognized,
    #[error("{field} {value} is out of range")]
    InvalidField { field: &'static str, value: i64 },
    #[error("no representable instant for the parsed fields")]
    Unrepresentable,
}

/// Reads an instant back from text with the same pattern mini-language
/// [`format`](crate::format) renders with, resolving the wall-clock
/// fields in the given zone.
///
/// Matching is unanchored: the pattern is tried at every character
/// position until one matches, and trailing text is ignored. Each
/// capturing placeholder records its field; when a field is captured
/// twice the later occurrence wins. Missing fields default to the epoch
/// baseline (1970-01-01 00:00:00.000), except that an epoch-seconds
/// capture (`U`) alone determines the result. A meridiem capture
/// resolves the hour capture as `hour % 12 + (PM ? 12 : 0)`; without
/// one the hour is taken as given.
///
/// The composite placeholders `c` and `r` are format-only; in a parse
/// pattern the letters match themselves.
pub fn parse<Tz: TimeZone>(
    tz: &Tz,
    text: &str,
    pattern: &str,
    locale: &Locale,
) -> Result<Moment<Tz>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let tokens = tokenize(pattern);
    for (start, _) in text.char_indices() {
        if let Some(captured) = match_at(&tokens, &text[start..], locale) {
            return assemble(tz, &captured);
        }
    }
    Err(ParseError::Unmatched)
}

/// Reads an instant from text without a pattern: first the compact
/// numeric form `YYYYMMDD[HHmm[ss[fff]]]`, then a chain of standard
/// layouts (RFC 3339, RFC 2822, `Y-m-d H:i:s`, `Y-m-d\TH:i:s`,
/// `Y-m-d`), zoneless layouts resolving in the given zone.
pub fn parse_auto<Tz: TimeZone>(tz: &Tz, text: &str) -> Result<Moment<Tz>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if let Some(result) = parse_compact(tz, trimmed) {
        return result;
    }
    parse_standard(tz, trimmed).ok_or(ParseError::Unrecognized)
}

impl<Tz: TimeZone> Moment<Tz> {
    /// See [`parse`].
    pub fn parse_in(
        tz: &Tz,
        text: &str,
        pattern: &str,
        locale: &Locale,
    ) -> Result<Self, ParseError> {
        parse(tz, text, pattern, locale)
    }

    /// See [`parse_auto`].
    pub fn parse_auto_in(tz: &Tz, text: &str) -> Result<Self, ParseError> {
        parse_auto(tz, text)
    }
}

/// Fields collected while matching; one slot per semantic field.
#[derive(Debug, Default)]
struct Captured {
    year: Option<i32>,
    month: Option<MonthCapture>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    milli: Option<u32>,
    pm: Option<bool>,
    epoch_seconds: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
enum MonthCapture {
    /// Index of a matched locale name, already zero-based and in range.
    Index(u32),
    /// Raw one-based number, validated on assembly.
    Number(u32),
}

fn match_at(tokens: &[Token], input: &str, locale: &Locale) -> Option<Captured> {
    let mut cursor = Cursor { rest: input };
    let mut captured = Captured::default();
    for token in tokens {
        match token {
            Token::Literal(text) => cursor.eat_str(text)?,
            Token::Code(code) => match_code(&mut cursor, *code, locale, &mut captured)?,
        }
    }
    Some(captured)
}

fn match_code(
    cursor: &mut Cursor<'_>,
    code: Code,
    locale: &Locale,
    captured: &mut Captured,
) -> Option<()> {
    match code {
        Code::Year => captured.year = Some(i32::try_from(cursor.eat_digits_exact(4)?).ok()?),
        Code::IsoYear => {
            cursor.eat_digits_exact(4)?;
        }
        Code::YearShort => {
            cursor.eat_digits_exact(2)?;
        }
        Code::LeapFlag => {
            let flag = cursor.eat_digits_exact(1)?;
            if flag > 1 {
                return None;
            }
        }
        Code::MonthName => {
            let index = cursor.eat_name(&locale.months)?;
            captured.month = Some(MonthCapture::Index(u32::try_from(index).ok()?));
        }
        Code::MonthAbbr => {
            let index = cursor.eat_name(&locale.months_short)?;
            captured.month = Some(MonthCapture::Index(u32::try_from(index).ok()?));
        }
        Code::MonthPadded | Code::MonthNumber => {
            captured.month = Some(MonthCapture::Number(cursor.eat_number(1, 2, 99)?));
        }
        Code::MonthLength => {
            cursor.eat_number(1, 2, 31)?;
        }
        Code::IsoWeek => {
            cursor.eat_digits_exact(2)?;
        }
        Code::DayAbbr => {
            cursor.eat_name(&locale.days_short)?;
        }
        Code::DayName => {
            cursor.eat_name(&locale.days)?;
        }
        Code::IsoWeekday => {
            let day = cursor.eat_digits_exact(1)?;
            if day == 0 || day > 7 {
                return None;
            }
        }
        Code::WeekdayNumber => {
            let day = cursor.eat_digits_exact(1)?;
            if day > 6 {
                return None;
            }
        }
        Code::OrdinalZero => {
            cursor.eat_number(1, 3, 365)?;
        }
        Code::DayPadded | Code::DayNumber => {
            captured.day = Some(cursor.eat_number(1, 2, 99)?);
        }
        Code::Hour12Padded | Code::Hour12 => {
            let hour = cursor.eat_number(1, 2, 12)?;
            if hour == 0 {
                return None;
            }
            captured.hour = Some(hour);
        }
        Code::Hour24Padded | Code::Hour24 => {
            captured.hour = Some(cursor.eat_number(1, 2, 23)?);
        }
        Code::Minute => {
            let minute = cursor.eat_digits_exact(2)?;
            if minute > 59 {
                return None;
            }
            captured.minute = Some(minute);
        }
        Code::Second => {
            let second = cursor.eat_digits_exact(2)?;
            if second > 59 {
                return None;
            }
            captured.second = Some(second);
        }
        Code::Millis => captured.milli = Some(cursor.eat_digits_exact(3)?),
        Code::Micros => {
            captured.milli = Some(cursor.eat_digits_exact(3)?);
            cursor.eat_digits_exact(3)?;
        }
        Code::MeridiemUpper | Code::MeridiemLower => captured.pm = Some(cursor.eat_meridiem()?),
        Code::OffsetBasic => {
            cursor.eat_sign()?;
            cursor.eat_digits_exact(4)?;
        }
        Code::OffsetColon => {
            cursor.eat_sign()?;
            cursor.eat_digits_exact(2)?;
            cursor.eat_str(":")?;
            cursor.eat_digits_exact(2)?;
        }
        Code::OffsetSeconds => {
            let _ = cursor.eat_sign();
            cursor.eat_number(1, 6, 999_999)?;
        }
        Code::TzName => cursor.eat_timezone_abbr()?,
        Code::Iso8601 => cursor.eat_str("c")?,
        Code::Rfc2822 => cursor.eat_str("r")?,
        Code::EpochSeconds => captured.epoch_seconds = Some(cursor.eat_epoch_digits()?),
    }
    Some(())
}

fn assemble<Tz: TimeZone>(tz: &Tz, captured: &Captured) -> Result<Moment<Tz>, ParseError> {
    if let Some(seconds) = captured.epoch_seconds {
        let millis = seconds
            .checked_mul(1000)
            .ok_or(ParseError::Unrepresentable)?;
        return Moment::from_epoch_millis_in(tz, millis).ok_or(ParseError::Unrepresentable);
    }

    let year = captured.year.unwrap_or(1970);
    let month0 = match captured.month {
        Some(MonthCapture::Index(index)) => index,
        Some(MonthCapture::Number(number @ 1..=12)) => number - 1,
        Some(MonthCapture::Number(number)) => {
            return Err(ParseError::InvalidField {
                field: "month",
                value: i64::from(number),
            });
        }
        None => 0,
    };
    let day = captured.day.unwrap_or(1);
    if day == 0 || day > days_in_month(year, month0 + 1) {
        return Err(ParseError::InvalidField {
            field: "day",
            value: i64::from(day),
        });
    }
    // A captured meridiem resolves the hour whichever code captured
    // it: `14 PM` stays 14, `2 PM` becomes 14, `12 AM` becomes 0.
    // A meridiem without an hour capture is ignored.
    let hour = match (captured.hour, captured.pm) {
        (Some(hour), Some(pm)) => hour % 12 + if pm { 12 } else { 0 },
        (Some(hour), None) => hour,
        (None, _) => 0,
    };

    let wall = NaiveDate::from_ymd_opt(year, month0 + 1, day)
        .and_then(|date| {
            date.and_hms_milli_opt(
                hour,
                captured.minute.unwrap_or(0),
                captured.second.unwrap_or(0),
                captured.milli.unwrap_or(0),
            )
        })
        .ok_or(ParseError::Unrepresentable)?;
    resolve_wall_clock(tz, wall)
        .map(Moment)
        .ok_or(ParseError::Unrepresentable)
}

fn parse_compact<Tz: TimeZone>(tz: &Tz, text: &str) -> Option<Result<Moment<Tz>, ParseError>> {
    if !matches!(text.len(), 8 | 12 | 14 | 17) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut captured = Captured {
        year: text[0..4].parse().ok(),
        month: text[4..6].parse().ok().map(MonthCapture::Number),
        day: text[6..8].parse().ok(),
        ..Captured::default()
    };
    if text.len() >= 12 {
        captured.hour = text[8..10].parse().ok();
        captured.minute = text[10..12].parse().ok();
    }
    if text.len() >= 14 {
        captured.second = text[12..14].parse().ok();
    }
    if text.len() == 17 {
        captured.milli = text[14..17].parse().ok();
    }
    Some(assemble(tz, &captured))
}

fn parse_standard<Tz: TimeZone>(tz: &Tz, text: &str) -> Option<Moment<Tz>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(Moment(parsed.with_timezone(tz)));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(Moment(parsed.with_timezone(tz)));
    }
    for layout in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(wall) = NaiveDateTime::parse_from_str(text, layout) {
            return resolve_wall_clock(tz, wall).map(Moment);
        }
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    resolve_wall_clock(tz, date.and_hms_opt(0, 0, 0)?).map(Moment)
}

/// Scanning position over the remaining input.
struct Cursor<'a> {
    rest: &'a str,
}

impl Cursor<'_> {
    fn eat_str(&mut self, expected: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    /// Exactly `len` ASCII digits, as a number.
    fn eat_digits_exact(&mut self, len: usize) -> Option<u32> {
        let digits = self.rest.get(..len)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = digits.parse().ok()?;
        self.rest = &self.rest[len..];
        Some(value)
    }

    /// Greedily consumes `min..=max` ASCII digits, stopping early when
    /// the next digit would push the value past `cap`.
    fn eat_number(&mut self, min: usize, max: usize, cap: u32) -> Option<u32> {
        let bytes = self.rest.as_bytes();
        let mut value: u32 = 0;
        let mut len = 0;
        while len < max {
            let Some(digit) = bytes.get(len).filter(|b| b.is_ascii_digit()) else {
                break;
            };
            let next = value * 10 + u32::from(digit - b'0');
            if next > cap {
                break;
            }
            value = next;
            len += 1;
        }
        if len < min {
            return None;
        }
        self.rest = &self.rest[len..];
        Some(value)
    }

    /// 1 to 16 digits of epoch seconds.
    fn eat_epoch_digits(&mut self) -> Option<i64> {
        let len = self
            .rest
            .bytes()
            .take(16)
            .take_while(u8::is_ascii_digit)
            .count();
        if len == 0 {
            return None;
        }
        let value = self.rest[..len].parse().ok()?;
        self.rest = &self.rest[len..];
        Some(value)
    }

    /// First name in the list that prefixes the input; returns its
    /// index. Declaration order decides ties, as with the locale name
    /// tables and the timezone table.
    fn eat_name(&mut self, names: &[String]) -> Option<usize> {
        let index = names
            .iter()
            .position(|name| self.rest.starts_with(name.as_str()))?;
        self.rest = &self.rest[names[index].len()..];
        Some(index)
    }

    fn eat_meridiem(&mut self) -> Option<bool> {
        let bytes = self.rest.as_bytes();
        let pm = match bytes.first()?.to_ascii_lowercase() {
            b'a' => false,
            b'p' => true,
            _ => return None,
        };
        if bytes.get(1)?.to_ascii_lowercase() != b'm' {
            return None;
        }
        self.rest = &self.rest[2..];
        Some(pm)
    }

    fn eat_sign(&mut self) -> Option<char> {
        let sign = self.rest.chars().next().filter(|&c| c == '+' || c == '-')?;
        self.rest = &self.rest[1..];
        Some(sign)
    }

    fn eat_timezone_abbr(&mut self) -> Option<()> {
        let (name, _) = TIMEZONES
            .iter()
            .find(|(name, _)| self.rest.starts_with(name))?;
        self.rest = &self.rest[name.len()..];
        Some(())
    }
}
