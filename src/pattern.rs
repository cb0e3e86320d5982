//! Pattern mini-language shared by the formatter and the parser.
//!
//! Patterns are built the way PHP's `date` function builds them: each
//! ASCII letter with an assigned meaning becomes a placeholder, a
//! backslash escapes the following character, and text enclosed in
//! single or double quotation marks is copied verbatim. Both directions
//! work off the same token stream, so every placeholder the formatter
//! understands has a matching rule in the parser.

use crate::prelude::*;

/// A single placeholder of the pattern mini-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Code {
    /// `Y` — full year, unpadded
    #[display(fmt = "Y")]
    Year,
    /// `o` — ISO week-numbering year
    #[display(fmt = "o")]
    IsoYear,
    /// `y` — two-digit year
    #[display(fmt = "y")]
    YearShort,
    /// `L` — leap year flag, `1` or `0`
    #[display(fmt = "L")]
    LeapFlag,
    /// `F` — full month name
    #[display(fmt = "F")]
    MonthName,
    /// `M` — abbreviated month name
    #[display(fmt = "M")]
    MonthAbbr,
    /// `m` — two-digit month
    #[display(fmt = "m")]
    MonthPadded,
    /// `n` — month number, unpadded
    #[display(fmt = "n")]
    MonthNumber,
    /// `t` — number of days in the month
    #[display(fmt = "t")]
    MonthLength,
    /// `W` — two-digit ISO week number
    #[display(fmt = "W")]
    IsoWeek,
    /// `D` — abbreviated weekday name
    #[display(fmt = "D")]
    DayAbbr,
    /// `l` — full weekday name
    #[display(fmt = "l")]
    DayName,
    /// `N` — ISO weekday number, Monday 1 through Sunday 7
    #[display(fmt = "N")]
    IsoWeekday,
    /// `w` — weekday number, Sunday 0 through Saturday 6
    #[display(fmt = "w")]
    WeekdayNumber,
    /// `z` — zero-based ordinal day of the year
    #[display(fmt = "z")]
    OrdinalZero,
    /// `d` — two-digit day of the month
    #[display(fmt = "d")]
    DayPadded,
    /// `j` — day of the month, unpadded
    #[display(fmt = "j")]
    DayNumber,
    /// `h` — two-digit hour on the 12-hour clock
    #[display(fmt = "h")]
    Hour12Padded,
    /// `g` — hour on the 12-hour clock, unpadded
    #[display(fmt = "g")]
    Hour12,
    /// `H` — two-digit hour on the 24-hour clock
    #[display(fmt = "H")]
    Hour24Padded,
    /// `G` — hour on the 24-hour clock, unpadded
    #[display(fmt = "G")]
    Hour24,
    /// `i` — two-digit minutes
    #[display(fmt = "i")]
    Minute,
    /// `s` — two-digit seconds
    #[display(fmt = "s")]
    Second,
    /// `k` — three-digit milliseconds
    #[display(fmt = "k")]
    Millis,
    /// `u` — milliseconds padded to six digits of microseconds
    #[display(fmt = "u")]
    Micros,
    /// `A` — `AM` or `PM`
    #[display(fmt = "A")]
    MeridiemUpper,
    /// `a` — `am` or `pm`
    #[display(fmt = "a")]
    MeridiemLower,
    /// `O` — UTC offset as `±HHMM`
    #[display(fmt = "O")]
    OffsetBasic,
    /// `P` — UTC offset as `±HH:MM`
    #[display(fmt = "P")]
    OffsetColon,
    /// `Z` — UTC offset in seconds
    #[display(fmt = "Z")]
    OffsetSeconds,
    /// `T` — timezone abbreviation, or `UTC±HHMM` when none is known
    #[display(fmt = "T")]
    TzName,
    /// `c` — the whole [`ISO_8601`](crate::ISO_8601) pattern
    #[display(fmt = "c")]
    Iso8601,
    /// `r` — the whole [`RFC_2822`](crate::RFC_2822) pattern
    #[display(fmt = "r")]
    Rfc2822,
    /// `U` — seconds since the Unix epoch
    #[display(fmt = "U")]
    EpochSeconds,
}

impl Code {
    /// Maps a pattern letter to its placeholder, `None` for letters
    /// without an assigned meaning.
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'Y' => Self::Year,
            'o' => Self::IsoYear,
            'y' => Self::YearShort,
            'L' => Self::LeapFlag,
            'F' => Self::MonthName,
            'M' => Self::MonthAbbr,
            'm' => Self::MonthPadded,
            'n' => Self::MonthNumber,
            't' => Self::MonthLength,
            'W' => Self::IsoWeek,
            'D' => Self::DayAbbr,
            'l' => Self::DayName,
            'N' => Self::IsoWeekday,
            'w' => Self::WeekdayNumber,
            'z' => Self::OrdinalZero,
            'd' => Self::DayPadded,
            'j' => Self::DayNumber,
            'h' => Self::Hour12Padded,
            'g' => Self::Hour12,
            'H' => Self::Hour24Padded,
            'G' => Self::Hour24,
            'i' => Self::Minute,
            's' => Self::Second,
            'k' => Self::Millis,
            'u' => Self::Micros,
            'A' => Self::MeridiemUpper,
            'a' => Self::MeridiemLower,
            'O' => Self::OffsetBasic,
            'P' => Self::OffsetColon,
            'Z' => Self::OffsetSeconds,
            'T' => Self::TzName,
            'c' => Self::Iso8601,
            'r' => Self::Rfc2822,
            'U' => Self::EpochSeconds,
            _ => return None,
        })
    }
}

/// One element of a tokenized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A recognized placeholder letter.
    Code(Code),
    /// Verbatim text: escapes, quoted spans, and unassigned characters.
    Literal(String),
}

/// Splits a pattern into placeholder and literal tokens.
///
/// Every input is a valid pattern; in the worst case the whole string
/// becomes a single literal. Consecutive literal characters collapse
/// into one token.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        i += 1;
        match ch {
            '\\' => {
                // A trailing backslash escapes nothing and is dropped
                if i < chars.len() {
                    literal.push(chars[i]);
                    i += 1;
                }
            }
            '\'' | '"' => match chars[i..].iter().position(|&c| c == ch) {
                Some(len) => {
                    literal.extend(&chars[i..i + len]);
                    i += len + 1;
                }
                // Unterminated quote: the quote itself is literal text
                None => literal.push(ch),
            },
            _ => match Code::from_letter(ch) {
                Some(code) => {
                    flush_literal(&mut literal, &mut tokens);
                    tokens.push(Token::Code(code));
                }
                None => literal.push(ch),
            },
        }
    }

    flush_literal(&mut literal, &mut tokens);
    tokens
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}
