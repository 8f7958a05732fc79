//! Solar and lunar ecliptic longitudes.
//!
//! The classifier only needs two numbers per request: the apparent geocentric
//! ecliptic longitude of the Sun and of the Moon at the anchor instant. Where
//! they come from is behind the [`Ephemeris`] trait so the engine can be swapped
//! (a Swiss Ephemeris binding, a JPL kernel reader, a test double) without
//! touching the time normalizer or the classifier.
//!
//! The crate ships [`AnalyticEphemeris`], a closed-form series engine that needs
//! no data files.

pub mod analytic;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub use analytic::AnalyticEphemeris;

use crate::time::JulianDay;

/// Bodies the pipeline queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
        }
    }
}

/// Errors from an ephemeris engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EphemerisError {
    /// The instant lies outside the engine's supported span.
    OutOfRange { julian_day: f64, min: f64, max: f64 },
    /// The engine produced NaN or infinity.
    NonFinite { body: Body },
    /// Engine-specific failure (missing data files, native library errors).
    Engine(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                julian_day,
                min,
                max,
            } => write!(
                f,
                "julian day {julian_day:.5} is outside the supported range {min:.1}..{max:.1}"
            ),
            Self::NonFinite { body } => {
                write!(f, "{} longitude is not a finite number", body.name())
            }
            Self::Engine(msg) => write!(f, "{msg}"),
        }
    }
}

impl Error for EphemerisError {}

/// Source of apparent geocentric tropical ecliptic longitudes, in degrees.
///
/// Implementations are shared across worker threads and must be safe for
/// concurrent read-only queries once constructed.
pub trait Ephemeris: Send + Sync {
    /// Short engine identifier for logs.
    fn name(&self) -> &'static str;

    fn solar_longitude(&self, t: JulianDay) -> Result<f64, EphemerisError>;

    fn lunar_longitude(&self, t: JulianDay) -> Result<f64, EphemerisError>;

    fn longitude(&self, body: Body, t: JulianDay) -> Result<f64, EphemerisError> {
        match body {
            Body::Sun => self.solar_longitude(t),
            Body::Moon => self.lunar_longitude(t),
        }
    }
}

/// Reduce an angle to `[0, 360)`.
///
/// `rem_euclid` can round up to exactly 360 for tiny negative inputs; that case
/// folds back to 0.
pub fn normalize_degrees(deg: f64) -> f64 {
    let reduced = deg.rem_euclid(360.0);
    if reduced >= 360.0 { 0.0 } else { reduced }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
    }

    #[test]
    fn test_longitude_dispatches_by_body() {
        struct Fixed;
        impl Ephemeris for Fixed {
            fn name(&self) -> &'static str {
                "fixed"
            }
            fn solar_longitude(&self, _t: JulianDay) -> Result<f64, EphemerisError> {
                Ok(10.0)
            }
            fn lunar_longitude(&self, _t: JulianDay) -> Result<f64, EphemerisError> {
                Ok(20.0)
            }
        }

        let t = JulianDay(2_451_545.0);
        assert_eq!(Fixed.longitude(Body::Sun, t), Ok(10.0));
        assert_eq!(Fixed.longitude(Body::Moon, t), Ok(20.0));
    }
}
