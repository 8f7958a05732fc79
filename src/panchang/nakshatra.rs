//! Nakshatra (lunar mansion) classification, 27-fold scheme.
//!
//! Each nakshatra spans 360/27 = 13 deg 20' of the ecliptic, starting from
//! Ashwini at 0 degrees.

use super::sector_index;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishta,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Name in Devanagari.
    pub const fn hindi(self) -> &'static str {
        match self {
            Self::Ashwini => "अश्विनी",
            Self::Bharani => "भरणी",
            Self::Krittika => "कृत्तिका",
            Self::Rohini => "रोहिणी",
            Self::Mrigashira => "मृगशिरा",
            Self::Ardra => "आर्द्रा",
            Self::Punarvasu => "पुनर्वसु",
            Self::Pushya => "पुष्य",
            Self::Ashlesha => "आश्लेषा",
            Self::Magha => "मघा",
            Self::PurvaPhalguni => "पूर्व फाल्गुनी",
            Self::UttaraPhalguni => "उत्तर फाल्गुनी",
            Self::Hasta => "हस्त",
            Self::Chitra => "चित्रा",
            Self::Swati => "स्वाती",
            Self::Vishakha => "विशाखा",
            Self::Anuradha => "अनुराधा",
            Self::Jyeshtha => "ज्येष्ठा",
            Self::Mula => "मूल",
            Self::PurvaAshadha => "पूर्वाषाढ़ा",
            Self::UttaraAshadha => "उत्तराषाढ़ा",
            Self::Shravana => "श्रवण",
            Self::Dhanishta => "धनिष्ठा",
            Self::Shatabhisha => "शतभिषा",
            Self::PurvaBhadrapada => "पूर्व भाद्रपद",
            Self::UttaraBhadrapada => "उत्तर भाद्रपद",
            Self::Revati => "रेवती",
        }
    }

    /// Transliterated name.
    pub const fn english(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishta => "Dhanishta",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn all() -> &'static [Nakshatra; 27] {
        &ALL_NAKSHATRAS
    }
}

/// Nakshatra containing an ecliptic longitude (normally the Moon's).
pub fn nakshatra_of(lon: f64) -> Nakshatra {
    ALL_NAKSHATRAS[sector_index(lon, NAKSHATRA_SPAN, ALL_NAKSHATRAS.len())]
}
