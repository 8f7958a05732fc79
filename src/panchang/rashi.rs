//! Rashi (zodiac sign) classification.
//!
//! The ecliptic is cut into 12 equal signs of 30 degrees, starting from
//! Mesha (Aries) at 0 degrees.

use super::sector_index;

/// Span of one rashi in degrees.
pub const RASHI_SPAN: f64 = 30.0;

/// The 12 rashis starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Name in Devanagari.
    pub const fn hindi(self) -> &'static str {
        match self {
            Self::Mesha => "मेष",
            Self::Vrishabha => "वृषभ",
            Self::Mithuna => "मिथुन",
            Self::Karka => "कर्क",
            Self::Simha => "सिंह",
            Self::Kanya => "कन्या",
            Self::Tula => "तुला",
            Self::Vrischika => "वृश्चिक",
            Self::Dhanu => "धनु",
            Self::Makara => "मकर",
            Self::Kumbha => "कुंभ",
            Self::Meena => "मीन",
        }
    }

    /// Western (English) sign name.
    pub const fn english(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn all() -> &'static [Rashi; 12] {
        &ALL_RASHIS
    }
}

/// Rashi containing an ecliptic longitude.
///
/// `floor(lon / 30) mod 12` on the floored quotient, so negative or
/// unreduced longitudes land in the right sign too.
pub fn rashi_of(lon: f64) -> Rashi {
    ALL_RASHIS[sector_index(lon, RASHI_SPAN, ALL_RASHIS.len())]
}
