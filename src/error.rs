//! Error taxonomy for the astro pipeline.
//!
//! Every failure a request can hit maps to exactly one [`AstroError`] variant,
//! and every variant carries a stable machine-readable code plus the HTTP status
//! the server answers with. None of these are retried: the same input in the
//! same environment fails the same way.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::ephemeris::EphemerisError;

/// Errors returned by the time normalizer and the request pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum AstroError {
    /// The date string is not `YYYY-MM-DD` or names an impossible calendar date.
    InvalidDateFormat { input: String },
    /// The timezone identifier is not in the IANA database.
    UnknownTimeZone { input: String },
    /// 06:00 local time does not exist on this date and the gap policy rejects it.
    NonexistentLocalTime { date: NaiveDate, timezone: String },
    /// A query parameter other than date/tz is missing or malformed.
    InvalidParameter { name: &'static str, reason: String },
    /// The ephemeris could not produce a longitude.
    EphemerisUnavailable(EphemerisError),
}

impl AstroError {
    /// Stable error code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDateFormat { .. } => "INVALID_DATE_FORMAT",
            Self::UnknownTimeZone { .. } => "UNKNOWN_TIME_ZONE",
            Self::NonexistentLocalTime { .. } => "NONEXISTENT_LOCAL_TIME",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::EphemerisUnavailable(_) => "EPHEMERIS_UNAVAILABLE",
        }
    }

    /// HTTP status code: caller mistakes are 4xx, environment failures 5xx.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidDateFormat { .. }
            | Self::UnknownTimeZone { .. }
            | Self::InvalidParameter { .. } => 400,
            Self::NonexistentLocalTime { .. } => 422,
            Self::EphemerisUnavailable(_) => 503,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }
}

impl Display for AstroError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat { input } => {
                write!(f, "invalid date '{input}': expected an existing calendar date as YYYY-MM-DD")
            }
            Self::UnknownTimeZone { input } => write!(f, "unknown timezone '{input}'"),
            Self::NonexistentLocalTime { date, timezone } => write!(
                f,
                "06:00 local time does not exist on {date} in {timezone} (daylight-saving gap)"
            ),
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid query parameter '{name}': {reason}")
            }
            Self::EphemerisUnavailable(e) => write!(f, "ephemeris unavailable: {e}"),
        }
    }
}

impl Error for AstroError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EphemerisUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EphemerisError> for AstroError {
    fn from(e: EphemerisError) -> Self {
        Self::EphemerisUnavailable(e)
    }
}
