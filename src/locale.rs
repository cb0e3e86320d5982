use std::sync::LazyLock;

use chrono::{Datelike, TimeZone};
use serde::{Deserialize, Serialize};

use crate::Moment;

/// Shared timezone abbreviation table, offsets in minutes east of UTC.
///
/// The order is significant for parser scans: an abbreviation must come
/// before any abbreviation that is a prefix of it (`CEST` before `CET`,
/// `WEST` before `WET`), which the alphabetical layout already satisfies.
pub(crate) const TIMEZONES: [(&str, i32); 56] = [
    ("ACDT", 630),
    ("ACST", 570),
    ("ADT", -180),
    ("AEDT", 660),
    ("AEST", 600),
    ("AKDT", -480),
    ("AKST", -540),
    ("ART", -180),
    ("AST", -240),
    ("AWDT", 540),
    ("AWST", 480),
    ("BIOT", 360),
    ("CAT", 120),
    ("CDT", -300),
    ("CEDT", 120),
    ("CEST", 120),
    ("CET", 60),
    ("CIT", 480),
    ("CKT", -600),
    ("CLST", -180),
    ("CLT", -240),
    ("CST", -360),
    ("CT", 480),
    ("CVT", -60),
    ("EAT", 180),
    ("EDT", -240),
    ("EEDT", 180),
    ("EEST", 180),
    ("EET", 120),
    ("EST", -300),
    ("FET", 180),
    ("GMT", 0),
    ("HADT", -540),
    ("HKT", 480),
    ("HST", -600),
    ("IOT", 180),
    ("IRDT", 480),
    ("IRST", 210),
    ("IST", 330),
    ("JST", 540),
    ("KST", 540),
    ("MDT", -360),
    ("MSK", 240),
    ("NZDT", 780),
    ("NZST", 720),
    ("PDT", -420),
    ("PKT", 300),
    ("PST", -480),
    ("UCT", 0),
    ("UTC", 0),
    ("WAST", 120),
    ("WAT", 60),
    ("WEDT", 60),
    ("WEST", 60),
    ("WET", 0),
    ("WST", 480),
];

/// Returns the UTC offset in minutes east for a known timezone
/// abbreviation.
pub fn timezone_offset_minutes(abbr: &str) -> Option<i32> {
    TIMEZONES
        .iter()
        .find(|(name, _)| *name == abbr)
        .map(|&(_, minutes)| minutes)
}

/// A set of display names and timezone abbreviations used by the
/// formatter and the parser.
///
/// Locales are plain data: callers can use the built-in sets, look one
/// up by identifier, or deserialize their own from configuration. Name
/// arrays have fixed lengths, so a malformed locale cannot be built.
/// `days` and `days_short` start from Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub months: [String; 12],
    pub months_short: [String; 12],
    pub days: [String; 7],
    pub days_short: [String; 7],
    /// Abbreviations preferred when rendering the `T` code, tried in
    /// order; each must be a key of the shared timezone table.
    pub timezones: Vec<String>,
}

fn names<const N: usize>(raw: [&str; N]) -> [String; N] {
    raw.map(str::to_owned)
}

static EN: LazyLock<Locale> = LazyLock::new(|| Locale {
    months: names([
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ]),
    months_short: names([
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ]),
    days: names([
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ]),
    days_short: names(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
    timezones: vec!["UTC".to_owned(), "GMT".to_owned()],
});

static IT: LazyLock<Locale> = LazyLock::new(|| Locale {
    months: names([
        "Gennaio",
        "Febbraio",
        "Marzo",
        "Aprile",
        "Maggio",
        "Giugno",
        "Luglio",
        "Agosto",
        "Settembre",
        "Ottobre",
        "Novembre",
        "Dicembre",
    ]),
    months_short: names([
        "Gen", "Feb", "Mar", "Apr", "Mag", "Giu", "Lug", "Ago", "Set", "Ott", "Nov", "Dic",
    ]),
    days: names([
        "Domenica",
        "Lunedì",
        "Martedì",
        "Mercoledì",
        "Giovedì",
        "Venerdì",
        "Sabato",
    ]),
    days_short: names(["Dom", "Lun", "Mar", "Mer", "Gio", "Ven", "Sab"]),
    timezones: vec!["CET".to_owned(), "CEST".to_owned()],
});

impl Locale {
    /// The built-in English locale.
    pub fn en() -> &'static Self {
        &EN
    }

    /// The built-in Italian locale.
    pub fn it() -> &'static Self {
        &IT
    }

    /// Looks up a built-in locale by identifier.
    ///
    /// Returns `None` for unknown identifiers, leaving the caller with
    /// whatever locale it already holds.
    pub fn lookup(id: &str) -> Option<&'static Self> {
        match id {
            "en" => Some(Self::en()),
            "it" => Some(Self::it()),
            _ => None,
        }
    }

    /// Picks the first built-in locale with a timezone abbreviation
    /// matching the given UTC offset in minutes east.
    ///
    /// This replaces guessing at startup: call it once with the offset
    /// of the zone you run in and keep the result.
    pub fn for_utc_offset(minutes_east: i32) -> Option<&'static Self> {
        [Self::en(), Self::it()].into_iter().find(|locale| {
            locale
                .timezones
                .iter()
                .any(|abbr| timezone_offset_minutes(abbr) == Some(minutes_east))
        })
    }
}

impl<Tz: TimeZone> Moment<Tz> {
    /// Full name of the instant's month in the given locale.
    pub fn month_name<'a>(&self, locale: &'a Locale) -> &'a str {
        &locale.months[self.0.month0() as usize]
    }

    /// Abbreviated name of the instant's month in the given locale.
    pub fn month_abbr<'a>(&self, locale: &'a Locale) -> &'a str {
        &locale.months_short[self.0.month0() as usize]
    }

    /// Full name of the instant's weekday in the given locale.
    pub fn day_name<'a>(&self, locale: &'a Locale) -> &'a str {
        &locale.days[self.0.weekday().num_days_from_sunday() as usize]
    }

    /// Abbreviated name of the instant's weekday in the given locale.
    pub fn day_abbr<'a>(&self, locale: &'a Locale) -> &'a str {
        &locale.days_short[self.0.weekday().num_days_from_sunday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixed, moment_in};

    #[test]
    fn test_lookup_builtin_locales() {
        assert_eq!(Locale::lookup("en"), Some(Locale::en()));
        assert_eq!(Locale::lookup("it"), Some(Locale::it()));
        assert_eq!(Locale::lookup("de"), None);
        assert_eq!(Locale::lookup(""), None);
    }

    #[test]
    fn test_timezone_table_lookups() {
        assert_eq!(timezone_offset_minutes("UTC"), Some(0));
        assert_eq!(timezone_offset_minutes("CET"), Some(60));
        assert_eq!(timezone_offset_minutes("CEST"), Some(120));
        assert_eq!(timezone_offset_minutes("EST"), Some(-300));
        assert_eq!(timezone_offset_minutes("IST"), Some(330));
        assert_eq!(timezone_offset_minutes("NZDT"), Some(780));
        assert_eq!(timezone_offset_minutes("XYZ"), None);
    }

    #[test]
    fn test_timezone_table_order_puts_longer_forms_first() {
        let position = |abbr: &str| {
            TIMEZONES
                .iter()
                .position(|(name, _)| *name == abbr)
                .unwrap()
        };
        assert!(position("CEST") < position("CET"));
        assert!(position("WEST") < position("WET"));
        assert!(position("EEST") < position("EET"));
    }

    #[test]
    fn test_for_utc_offset() {
        // UTC is in the English preference list
        assert_eq!(Locale::for_utc_offset(0), Some(Locale::en()));
        // CET only appears in the Italian list
        assert_eq!(Locale::for_utc_offset(60), Some(Locale::it()));
        assert_eq!(Locale::for_utc_offset(120), Some(Locale::it()));
        // IST is a known abbreviation but no built-in locale prefers it
        assert_eq!(Locale::for_utc_offset(330), None);
    }

    #[test]
    fn test_name_accessors() {
        // 2024-03-05 is a Tuesday
        let moment = moment_in(&fixed(1), 2024, 3, 5, 14, 30, 0);
        assert_eq!(moment.month_name(Locale::en()), "March");
        assert_eq!(moment.month_abbr(Locale::en()), "Mar");
        assert_eq!(moment.day_name(Locale::en()), "Tuesday");
        assert_eq!(moment.day_abbr(Locale::en()), "Tue");

        assert_eq!(moment.month_name(Locale::it()), "Marzo");
        assert_eq!(moment.day_name(Locale::it()), "Martedì");

        // 2024-03-10 is a Sunday
        let sunday = moment_in(&fixed(1), 2024, 3, 10, 0, 0, 0);
        assert_eq!(sunday.day_name(Locale::it()), "Domenica");
        assert_eq!(sunday.day_abbr(Locale::en()), "Sun");
    }

    #[test]
    fn test_locale_serde_round_trip() {
        let json = serde_json::to_string(Locale::it()).unwrap();
        let parsed: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, Locale::it());
    }

    #[test]
    fn test_locale_serde_rejects_wrong_array_lengths() {
        // Eleven months must not deserialize
        let json = r#"{
            "months": ["a","b","c","d","e","f","g","h","i","j","k"],
            "months_short": ["a","b","c","d","e","f","g","h","i","j","k","l"],
            "days": ["a","b","c","d","e","f","g"],
            "days_short": ["a","b","c","d","e","f","g"],
            "timezones": []
        }"#;
        let result: Result<Locale, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
