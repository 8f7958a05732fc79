//! Closed-form solar and lunar theory.
//!
//! Series from Jean Meeus, *Astronomical Algorithms* (2nd ed.): the low-precision
//! solar theory of chapter 25 and the principal lunar longitude terms of
//! chapter 47. Accuracy is about 0.01° for the Sun and a few thousandths of a
//! degree for the Moon, comfortably below the 12° tithi and 13°20' nakshatra
//! widths. Inputs are UT; ΔT is applied internally.

use super::{Body, Ephemeris, EphemerisError, normalize_degrees};
use crate::time::JulianDay;
use crate::time::julian::{DAYS_PER_CENTURY, J2000_JD};

/// Earliest year the ΔT and lunar series are trusted for.
pub const MIN_YEAR: f64 = -1000.0;
/// Latest year the ΔT and lunar series are trusted for.
pub const MAX_YEAR: f64 = 3000.0;

/// Periodic terms for the Moon's longitude (Meeus table 47.A).
///
/// Columns: multiples of D, M, M', F and the sine coefficient in 1e-6 degrees.
const MOON_LONGITUDE_TERMS: [(i8, i8, i8, i8, i32); 59] = [
    (0, 0, 1, 0, 6_288_774),
    (2, 0, -1, 0, 1_274_027),
    (2, 0, 0, 0, 658_314),
    (0, 0, 2, 0, 213_618),
    (0, 1, 0, 0, -185_116),
    (0, 0, 0, 2, -114_332),
    (2, 0, -2, 0, 58_793),
    (2, -1, -1, 0, 57_066),
    (2, 0, 1, 0, 53_322),
    (2, -1, 0, 0, 45_758),
    (0, 1, -1, 0, -40_923),
    (1, 0, 0, 0, -34_720),
    (0, 1, 1, 0, -30_383),
    (2, 0, 0, -2, 15_327),
    (0, 0, 1, 2, -12_528),
    (0, 0, 1, -2, 10_980),
    (4, 0, -1, 0, 10_675),
    (0, 0, 3, 0, 10_034),
    (4, 0, -2, 0, 8_548),
    (2, 1, -1, 0, -7_888),
    (2, 1, 0, 0, -6_766),
    (1, 0, -1, 0, -5_163),
    (1, 1, 0, 0, 4_987),
    (2, -1, 1, 0, 4_036),
    (2, 0, 2, 0, 3_994),
    (4, 0, 0, 0, 3_861),
    (2, 0, -3, 0, 3_665),
    (0, 1, -2, 0, -2_689),
    (2, 0, -1, 2, -2_602),
    (2, -1, -2, 0, 2_390),
    (1, 0, 1, 0, -2_348),
    (2, -2, 0, 0, 2_236),
    (0, 1, 2, 0, -2_120),
    (0, 2, 0, 0, -2_069),
    (2, -2, -1, 0, 2_048),
    (2, 0, 1, -2, -1_773),
    (2, 0, 0, 2, -1_595),
    (4, -1, -1, 0, 1_215),
    (0, 0, 2, 2, -1_110),
    (3, 0, -1, 0, -892),
    (2, 1, 1, 0, -810),
    (4, -1, -2, 0, 759),
    (0, 2, -1, 0, -713),
    (2, 2, -1, 0, -700),
    (2, 1, -2, 0, 691),
    (2, -1, 0, -2, 596),
    (4, 0, 1, 0, 549),
    (0, 0, 4, 0, 537),
    (4, -1, 0, 0, 520),
    (1, 0, -2, 0, -487),
    (2, 1, 0, -2, -399),
    (0, 0, 2, -2, -381),
    (1, 1, 1, 0, 351),
    (3, 0, -2, 0, -340),
    (4, 0, -3, 0, 330),
    (2, -1, 2, 0, 327),
    (0, 2, 1, 0, -323),
    (1, 1, -1, 0, 299),
    (2, 0, 3, 0, 294),
];

/// Ephemeris engine built on closed-form series; needs no data files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn dynamical_time(&self, t: JulianDay) -> Result<JulianDay, EphemerisError> {
        let year = t.decimal_year();
        if !t.value().is_finite() || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EphemerisError::OutOfRange {
                julian_day: t.value(),
                min: year_to_jd(MIN_YEAR),
                max: year_to_jd(MAX_YEAR),
            });
        }
        Ok(t.plus_seconds(delta_t_seconds(year)))
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn solar_longitude(&self, t: JulianDay) -> Result<f64, EphemerisError> {
        let jde = self.dynamical_time(t)?;
        finite(Body::Sun, sun_apparent_longitude(jde.value()))
    }

    fn lunar_longitude(&self, t: JulianDay) -> Result<f64, EphemerisError> {
        let jde = self.dynamical_time(t)?;
        finite(Body::Moon, moon_apparent_longitude(jde.value()))
    }
}

fn finite(body: Body, lon: f64) -> Result<f64, EphemerisError> {
    if lon.is_finite() {
        Ok(normalize_degrees(lon))
    } else {
        Err(EphemerisError::NonFinite { body })
    }
}

fn year_to_jd(year: f64) -> f64 {
    J2000_JD + (year - 2000.0) * 365.25
}

fn centuries(jde: f64) -> f64 {
    (jde - J2000_JD) / DAYS_PER_CENTURY
}

fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// Apparent longitude of the Sun (degrees, unreduced) at a TT Julian day.
pub fn sun_apparent_longitude(jde: f64) -> f64 {
    let t = centuries(jde);

    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = 357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t;
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * sin_deg(m)
        + (0.019993 - 0.000101 * t) * sin_deg(2.0 * m)
        + 0.000289 * sin_deg(3.0 * m);
    let true_longitude = l0 + c;

    // Aberration plus the dominant nutation term
    let omega = 125.04 - 1_934.136 * t;
    true_longitude - 0.00569 - 0.00478 * sin_deg(omega)
}

/// Geometric longitude of the Moon (degrees, unreduced) at a TT Julian day.
pub fn moon_geometric_longitude(jde: f64) -> f64 {
    let t = centuries(jde);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l_prime =
        218.3164477 + 481_267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0 - t4 / 65_194_000.0;
    let d = 297.8501921 + 445_267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.5291092 + 35_999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0;
    let m_prime =
        134.9633964 + 477_198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0 - t4 / 14_712_000.0;
    let f = 93.2720950 + 483_202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    // Eccentricity of Earth's orbit scales the terms involving M
    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;

    let mut sigma_l: f64 = MOON_LONGITUDE_TERMS
        .iter()
        .map(|&(cd, cm, cmp, cf, coeff)| {
            let arg = f64::from(cd) * d
                + f64::from(cm) * m
                + f64::from(cmp) * m_prime
                + f64::from(cf) * f;
            let scale = match cm.unsigned_abs() {
                0 => 1.0,
                1 => e,
                _ => e * e,
            };
            f64::from(coeff) * scale * sin_deg(arg)
        })
        .sum();

    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    sigma_l += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(l_prime - f) + 318.0 * sin_deg(a2);

    l_prime + sigma_l / 1_000_000.0
}

/// Apparent longitude of the Moon: geometric longitude plus nutation.
pub fn moon_apparent_longitude(jde: f64) -> f64 {
    moon_geometric_longitude(jde) + nutation_in_longitude_deg(jde)
}

/// Nutation in longitude Δψ (degrees), four-term approximation (Meeus ch. 22).
pub fn nutation_in_longitude_deg(jde: f64) -> f64 {
    let t = centuries(jde);
    let omega = 125.04452 - 1_934.136261 * t;
    let l_sun = 280.4665 + 36_000.7698 * t;
    let l_moon = 218.3165 + 481_267.8813 * t;

    let arcsec = -17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * l_sun) - 0.23 * sin_deg(2.0 * l_moon)
        + 0.21 * sin_deg(2.0 * omega);
    arcsec / 3600.0
}

/// ΔT = TT − UT in seconds (Espenak & Meeus polynomial fits).
pub fn delta_t_seconds(year: f64) -> f64 {
    let y = year;
    if y < -500.0 {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if y < 500.0 {
        let u = y / 100.0;
        10583.6 - 1014.41 * u + 33.78311 * u.powi(2) - 5.952053 * u.powi(3)
            - 0.1798452 * u.powi(4)
            + 0.022174192 * u.powi(5)
            + 0.0090316521 * u.powi(6)
    } else if y < 1600.0 {
        let u = (y - 1000.0) / 100.0;
        1574.2 - 556.01 * u + 71.23472 * u.powi(2) + 0.319781 * u.powi(3)
            - 0.8503463 * u.powi(4)
            - 0.005050998 * u.powi(5)
            + 0.0083572073 * u.powi(6)
    } else if y < 1700.0 {
        let t = y - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t.powi(2) + t.powi(3) / 7129.0
    } else if y < 1800.0 {
        let t = y - 1700.0;
        8.83 + 0.1603 * t - 0.0059285 * t.powi(2) + 0.00013336 * t.powi(3)
            - t.powi(4) / 1_174_000.0
    } else if y < 1860.0 {
        let t = y - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if y < 1900.0 {
        let t = y - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if y < 2150.0 {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}
