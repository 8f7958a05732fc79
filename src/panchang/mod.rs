//! Calendrical classification of Sun and Moon longitudes.
//!
//! Pure functions over `f64` degrees. Label tables are `const` arrays and
//! `match` arms, so classification never allocates except for the composed
//! tithi strings.

pub mod ayanamsha;
pub mod nakshatra;
pub mod rashi;
pub mod tithi;

pub use ayanamsha::Zodiac;
pub use nakshatra::{ALL_NAKSHATRAS, Nakshatra, nakshatra_of};
pub use rashi::{ALL_RASHIS, Rashi, rashi_of};
pub use tithi::{Paksha, Tithi, TithiLabel, tithi_of};

use crate::ephemeris::normalize_degrees;

/// Everything the day's report shows, derived from two longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClassification {
    pub sun_sign: Rashi,
    pub moon_sign: Rashi,
    pub nakshatra: Nakshatra,
    pub tithi: TithiLabel,
}

/// Classify a Sun/Moon longitude pair.
pub fn classify(sun_lon: f64, moon_lon: f64) -> DayClassification {
    DayClassification {
        sun_sign: rashi_of(sun_lon),
        moon_sign: rashi_of(moon_lon),
        nakshatra: nakshatra_of(moon_lon),
        tithi: tithi_of(sun_lon, moon_lon),
    }
}

/// `floor(normalized / span) mod count`.
fn sector_index(lon: f64, span: f64, count: usize) -> usize {
    let reduced = normalize_degrees(lon);
    ((reduced / span).floor() as usize) % count
}
