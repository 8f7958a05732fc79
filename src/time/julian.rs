//! Julian day numbers on the UT timeline.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

/// Julian day of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Continuous day count (UT) consumed by the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct JulianDay(pub f64);

impl JulianDay {
    /// Gregorian calendar date plus decimal hour to Julian day.
    ///
    /// Same convention as Swiss Ephemeris `swe_julday` with the Gregorian flag:
    /// days start at noon, so midnight carries a `.5` fraction.
    pub fn from_calendar(year: i32, month: u32, day: u32, hour: f64) -> Self {
        let (y, m) = if month <= 2 {
            (year - 1, month + 12)
        } else {
            (year, month)
        };
        let y = f64::from(y);
        let m = f64::from(m);

        let a = (y / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();

        let jd = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + f64::from(day)
            + b
            - 1524.5
            + hour / 24.0;
        Self(jd)
    }

    /// Julian day of a UTC instant, using its calendar fields.
    pub fn from_utc(dt: &DateTime<Utc>) -> Self {
        let decimal_hour = decimal_hour(dt.hour(), dt.minute(), dt.second());
        Self::from_calendar(dt.year(), dt.month(), dt.day(), decimal_hour)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(self) -> f64 {
        (self.0 - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Approximate fractional calendar year, good enough for range checks and ΔT.
    pub fn decimal_year(self) -> f64 {
        2000.0 + (self.0 - J2000_JD) / 365.25
    }

    pub fn plus_seconds(self, seconds: f64) -> Self {
        Self(self.0 + seconds / 86_400.0)
    }
}

/// `hour + minute/60 + second/3600`.
fn decimal_hour(hour: u32, minute: u32, second: u32) -> f64 {
    f64::from(hour) + f64::from(minute) / 60.0 + f64::from(second) / 3600.0
}
