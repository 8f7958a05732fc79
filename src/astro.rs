//! Request pipeline: civil day in, bilingual panchang report out.
//!
//! Normalizes the date and timezone, asks the ephemeris for the Sun and Moon,
//! applies the configured zodiac frame and classifies the result. Any failure
//! aborts the whole request; no partial report is ever produced.

use serde::Serialize;

use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE, LONGITUDE_DECIMALS};
use crate::ephemeris::{Body, Ephemeris, EphemerisError, normalize_degrees};
use crate::error::AstroError;
use crate::panchang::{DayClassification, Rashi, Zodiac, classify, tithi_of};
use crate::time::{self, DstGapPolicy, JulianDay};

/// One `/astro` request after defaults are filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct AstroQuery {
    pub date: String,
    pub tz: String,
    /// Observer latitude. Accepted and validated, not used by the classification.
    pub latitude: f64,
    /// Observer longitude. Accepted and validated, not used by the classification.
    pub longitude: f64,
}

impl AstroQuery {
    /// Query for `date` with the built-in defaults for everything else.
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            tz: DEFAULT_TIMEZONE.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

/// Knobs that change how a day is computed, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalculationSettings {
    pub dst_gap: DstGapPolicy,
    pub zodiac: Zodiac,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyReport {
    pub longitude: f64,
    pub sign_hi: &'static str,
    pub sign_en: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPair {
    pub hi: String,
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangReport {
    pub tithi: LabelPair,
    pub nakshatra: LabelPair,
}

/// JSON body of a successful `/astro` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstroReport {
    pub date: String,
    pub timezone: String,
    pub sun: BodyReport,
    pub moon: BodyReport,
    pub panchang: PanchangReport,
}

/// Run the full pipeline for one query.
pub fn compute_report(
    query: &AstroQuery,
    ephemeris: &dyn Ephemeris,
    settings: &CalculationSettings,
) -> Result<AstroReport, AstroError> {
    let day = time::normalize(&query.date, &query.tz, settings.dst_gap)?;
    let t = day.julian_day;

    let sun_tropical = query_longitude(ephemeris, Body::Sun, t)?;
    let moon_tropical = query_longitude(ephemeris, Body::Moon, t)?;

    let sun = settings.zodiac.apply(sun_tropical, t);
    let moon = settings.zodiac.apply(moon_tropical, t);

    // Elongation is frame-independent; take it from the unshifted values
    let classification = DayClassification {
        tithi: tithi_of(sun_tropical, moon_tropical),
        ..classify(sun, moon)
    };

    Ok(AstroReport {
        date: day.date.format("%Y-%m-%d").to_string(),
        timezone: day.timezone.name().to_string(),
        sun: body_report(sun, classification.sun_sign),
        moon: body_report(moon, classification.moon_sign),
        panchang: PanchangReport {
            tithi: LabelPair {
                hi: classification.tithi.hindi(),
                en: classification.tithi.english(),
            },
            nakshatra: LabelPair {
                hi: classification.nakshatra.hindi().to_string(),
                en: classification.nakshatra.english().to_string(),
            },
        },
    })
}

fn query_longitude(
    ephemeris: &dyn Ephemeris,
    body: Body,
    t: JulianDay,
) -> Result<f64, AstroError> {
    let lon = ephemeris.longitude(body, t)?;
    if !lon.is_finite() {
        return Err(EphemerisError::NonFinite { body }.into());
    }
    Ok(normalize_degrees(lon))
}

fn body_report(lon: f64, sign: Rashi) -> BodyReport {
    BodyReport {
        longitude: round_longitude(lon),
        sign_hi: sign.hindi(),
        sign_en: sign.english(),
    }
}

/// Round to the reported precision, keeping the result inside `[0, 360)`.
pub fn round_longitude(lon: f64) -> f64 {
    let scale = 10f64.powi(LONGITUDE_DECIMALS);
    normalize_degrees((lon * scale).round() / scale)
}
