/// Database timestamp pattern, millisecond precision (`2024-03-05 14:30:00.250`)
pub const DBT: &str = "Y-m-d H:i:s.u";
/// US date-time pattern with 12-hour clock (`03/05/2024 2:30:00 PM`)
pub const USA: &str = "m/d/Y G:i:s A";
/// European date-time pattern (`05/03/2024 14:30:00`)
pub const EUR: &str = "d/m/Y H:i:s";
/// Japanese date-time pattern (`2024/03/05 14:30:00`)
pub const JPN: &str = "Y/m/d H:i:s";
/// Database date pattern (`2024-03-05`)
pub const DBD: &str = "Y-m-d";
/// US date pattern (`03/05/2024`)
pub const USD: &str = "m/d/Y";
/// European date pattern (`05/03/2024`)
pub const EUD: &str = "d/m/Y";
/// Japanese date pattern (`2024/03/05`)
pub const JPD: &str = "Y/m/d";
/// Compact ordinal date pattern (`20240305`)
pub const ORD: &str = "Ymd";
/// Compact ordinal date-time pattern (`20240305143000`)
pub const ORT: &str = "YmdHis";
/// ISO 8601 pattern (`2024-03-05T14:30:00+01:00`)
pub const ISO_8601: &str = "Y-m-d\\TH:i:sP";
/// RFC 2822 pattern (`Tue, 5 Mar 2024 14:30:00 +0100`)
pub const RFC_2822: &str = "D, j M Y H:i:s O";

/// Month number for February, the only month whose length varies
pub(crate) const FEBRUARY: u32 = 2;

/// Days in February for leap years
pub(crate) const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Milliseconds per second
pub(crate) const MILLIS_PER_SECOND: i64 = 1_000;
/// Milliseconds per minute
pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
/// Milliseconds per hour
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Grid granularity for the DST changepoint search (15 minutes): every
/// real-world transition boundary falls on a 15-minute mark
pub(crate) const DST_SEARCH_STEP: i64 = 15 * MILLIS_PER_MINUTE;
