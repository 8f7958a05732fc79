//! Civil date and timezone normalization.
//!
//! A request names a calendar day and a timezone; the ephemeris needs a single
//! instant on a continuous timeline. This module bridges the two:
//!
//! 1. [`parse_civil_date`] accepts only `YYYY-MM-DD` naming a real Gregorian date.
//! 2. [`parse_timezone`] resolves an IANA identifier through `chrono-tz`.
//! 3. [`anchor_instant`] picks 06:00 local time on that date, honoring the zone's
//!    UTC offset and daylight-saving rules, and expresses it in UTC.
//! 4. [`JulianDay::from_utc`] turns the UTC instant into the Julian-day value the
//!    ephemeris consumes.
//!
//! ## Daylight-saving edge cases
//!
//! - **Fall-back overlap**: 06:00 happens twice; the earlier instant is used.
//! - **Spring-forward gap**: 06:00 never happens; [`DstGapPolicy`] decides. With
//!   `ShiftForward` the wall-clock time is read with the offset in force before the
//!   transition, which moves it forward by the length of the gap. With `Reject` the
//!   request fails with [`AstroError::NonexistentLocalTime`].

pub mod julian;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::constants::ANCHOR_HOUR;
use crate::error::AstroError;

pub use julian::JulianDay;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date pattern is a valid regex")
});

/// What to do when 06:00 local time falls inside a daylight-saving gap.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DstGapPolicy {
    /// Read the wall-clock time with the pre-transition offset.
    #[default]
    ShiftForward,
    /// Fail the request.
    Reject,
}

impl DstGapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DstGapPolicy::ShiftForward => "shift_forward",
            DstGapPolicy::Reject => "reject",
        }
    }
}

/// One civil day reduced to the instant and timeline value used for classification.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDay {
    pub date: NaiveDate,
    pub timezone: Tz,
    /// The anchor as seen on the local wall clock
    pub anchor_local: DateTime<Tz>,
    pub anchor_utc: DateTime<Utc>,
    pub julian_day: JulianDay,
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_civil_date(input: &str) -> Result<NaiveDate, AstroError> {
    let invalid = || AstroError::InvalidDateFormat {
        input: input.to_string(),
    };

    let captures = DATE_PATTERN.captures(input).ok_or_else(invalid)?;
    let year: i32 = captures[1].parse().map_err(|_| invalid())?;
    let month: u32 = captures[2].parse().map_err(|_| invalid())?;
    let day: u32 = captures[3].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Resolve an IANA timezone identifier.
pub fn parse_timezone(input: &str) -> Result<Tz, AstroError> {
    input.parse::<Tz>().map_err(|_| AstroError::UnknownTimeZone {
        input: input.to_string(),
    })
}

/// The instant that represents `date` in `tz`: 06:00 local, expressed in UTC.
pub fn anchor_instant(
    date: NaiveDate,
    tz: Tz,
    policy: DstGapPolicy,
) -> Result<DateTime<Utc>, AstroError> {
    let naive = date.and_hms_opt(0, 0, 0).ok_or(AstroError::InvalidDateFormat {
        input: date.to_string(),
    })? + Duration::hours(ANCHOR_HOUR);

    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => match policy {
            DstGapPolicy::Reject => {
                return Err(AstroError::NonexistentLocalTime {
                    date,
                    timezone: tz.name().to_string(),
                });
            }
            DstGapPolicy::ShiftForward => {
                // Zones change offset at most once a day, so a day earlier is
                // safely on the pre-transition side
                let before = tz
                    .offset_from_utc_datetime(&(naive - Duration::days(1)))
                    .fix();
                let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
                tz.from_utc_datetime(&utc)
            }
        },
    };

    Ok(local.with_timezone(&Utc))
}

/// Normalize a raw date/timezone pair into the instant used for classification.
pub fn normalize(date: &str, tz: &str, policy: DstGapPolicy) -> Result<NormalizedDay, AstroError> {
    let date = parse_civil_date(date)?;
    let timezone = parse_timezone(tz)?;
    let anchor_utc = anchor_instant(date, timezone, policy)?;

    Ok(NormalizedDay {
        date,
        timezone,
        anchor_local: anchor_utc.with_timezone(&timezone),
        anchor_utc,
        julian_day: JulianDay::from_utc(&anchor_utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_parse_civil_date_accepts_iso_dates() {
        assert_eq!(
            parse_civil_date("2026-02-06").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 6).unwrap()
        );
        assert_eq!(
            parse_civil_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_civil_date_rejects_impossible_dates() {
        for input in ["2026-02-30", "2025-02-29", "2026-13-01", "2026-00-10", "2026-04-31"] {
            assert!(
                matches!(parse_civil_date(input), Err(AstroError::InvalidDateFormat { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_civil_date_rejects_loose_formats() {
        for input in ["2026-2-6", "06-02-2026", "2026/02/06", " 2026-02-06", "2026-02-06T06:00", ""] {
            assert!(
                matches!(parse_civil_date(input), Err(AstroError::InvalidDateFormat { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Asia/Kolkata").unwrap(), chrono_tz::Asia::Kolkata);
        assert_eq!(
            parse_timezone("Mars/Phobos"),
            Err(AstroError::UnknownTimeZone {
                input: "Mars/Phobos".to_string()
            })
        );
    }

    #[test]
    fn test_anchor_kolkata() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap();
        let anchor = anchor_instant(date, chrono_tz::Asia::Kolkata, DstGapPolicy::ShiftForward).unwrap();
        assert_eq!(anchor, utc("2026-02-06T00:30:00Z"));
    }

    #[test]
    fn test_anchor_negative_offset_stays_on_same_utc_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let anchor =
            anchor_instant(date, chrono_tz::America::New_York, DstGapPolicy::ShiftForward).unwrap();
        assert_eq!(anchor, utc("2026-01-15T11:00:00Z"));
    }

    #[test]
    fn test_anchor_positive_offset_crosses_to_previous_utc_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let anchor = anchor_instant(date, chrono_tz::Pacific::Auckland, DstGapPolicy::ShiftForward).unwrap();
        // NZDT is UTC+13 in January
        assert_eq!(anchor, utc("2026-01-14T17:00:00Z"));
    }

    #[test]
    fn test_anchor_uses_daylight_offset_in_effect_on_the_date() {
        let tz = chrono_tz::America::New_York;
        // US DST starts 2026-03-08 02:00; 06:00 is already EDT
        let spring = anchor_instant(
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            tz,
            DstGapPolicy::Reject,
        )
        .unwrap();
        assert_eq!(spring, utc("2026-03-08T10:00:00Z"));

        // DST ends 2026-11-01 02:00; 06:00 is back on EST
        let autumn = anchor_instant(
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            tz,
            DstGapPolicy::Reject,
        )
        .unwrap();
        assert_eq!(autumn, utc("2026-11-01T11:00:00Z"));
    }

    #[test]
    fn test_anchor_in_dst_gap_shifts_forward() {
        // Samoa skipped 2011-12-30 when it moved from UTC-10 to UTC+14
        let date = NaiveDate::from_ymd_opt(2011, 12, 30).unwrap();
        let tz = chrono_tz::Pacific::Apia;
        let anchor = anchor_instant(date, tz, DstGapPolicy::ShiftForward).unwrap();
        assert_eq!(anchor, utc("2011-12-30T16:00:00Z"));

        let local = anchor.with_timezone(&tz);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2011, 12, 31).unwrap());
        assert_eq!(local.hour(), 6);
    }

    #[test]
    fn test_anchor_in_dst_gap_rejected_by_policy() {
        let date = NaiveDate::from_ymd_opt(2011, 12, 30).unwrap();
        let result = anchor_instant(date, chrono_tz::Pacific::Apia, DstGapPolicy::Reject);
        assert_eq!(
            result,
            Err(AstroError::NonexistentLocalTime {
                date,
                timezone: "Pacific/Apia".to_string()
            })
        );
    }

    #[test]
    fn test_normalize_end_to_end() {
        let day = normalize("2026-02-06", "Asia/Kolkata", DstGapPolicy::default()).unwrap();
        assert_eq!(day.anchor_utc, utc("2026-02-06T00:30:00Z"));
        assert_eq!(day.anchor_local.hour(), 6);
        assert!((day.julian_day.value() - 2_461_077.520_833_333).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let first = normalize("2026-02-06", "Asia/Kolkata", DstGapPolicy::default()).unwrap();
        let second = normalize("2026-02-06", "Asia/Kolkata", DstGapPolicy::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_validates_date_before_timezone() {
        let err = normalize("2026-02-30", "Mars/Phobos", DstGapPolicy::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_DATE_FORMAT");
    }
}
