//! Tithi (lunar day) and paksha (fortnight).
//!
//! A tithi is each 12 degree step of the Moon's elongation from the Sun.
//! Tithis 0..=14 fall in the bright fortnight (Shukla), 15..=29 in the dark
//! fortnight (Krishna). Names repeat per fortnight from a 15-entry table.

use crate::ephemeris::normalize_degrees;

/// Elongation covered by one tithi.
pub const TITHI_SPAN: f64 = 12.0;

/// Tithis in a lunar month.
pub const TITHIS_PER_MONTH: u8 = 30;

/// Tithis per fortnight, also the size of the name table.
pub const TITHIS_PER_PAKSHA: u8 = 15;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paksha {
    /// Waxing half, new moon to full moon.
    Shukla,
    /// Waning half, full moon to new moon.
    Krishna,
}

impl Paksha {
    pub const fn hindi(self) -> &'static str {
        match self {
            Self::Shukla => "शुक्ल",
            Self::Krishna => "कृष्ण",
        }
    }

    pub const fn english(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// Base tithi names, shared by both fortnights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tithi {
    Pratipada,
    Dwitiya,
    Tritiya,
    Chaturthi,
    Panchami,
    Shashthi,
    Saptami,
    Ashtami,
    Navami,
    Dashami,
    Ekadashi,
    Dwadashi,
    Trayodashi,
    Chaturdashi,
    Purnima,
}

/// Base names in order (0 = Pratipada, 14 = Purnima).
pub const ALL_TITHIS: [Tithi; 15] = [
    Tithi::Pratipada,
    Tithi::Dwitiya,
    Tithi::Tritiya,
    Tithi::Chaturthi,
    Tithi::Panchami,
    Tithi::Shashthi,
    Tithi::Saptami,
    Tithi::Ashtami,
    Tithi::Navami,
    Tithi::Dashami,
    Tithi::Ekadashi,
    Tithi::Dwadashi,
    Tithi::Trayodashi,
    Tithi::Chaturdashi,
    Tithi::Purnima,
];

impl Tithi {
    pub const fn hindi(self) -> &'static str {
        match self {
            Self::Pratipada => "प्रतिपदा",
            Self::Dwitiya => "द्वितीया",
            Self::Tritiya => "तृतीया",
            Self::Chaturthi => "चतुर्थी",
            Self::Panchami => "पंचमी",
            Self::Shashthi => "षष्ठी",
            Self::Saptami => "सप्तमी",
            Self::Ashtami => "अष्टमी",
            Self::Navami => "नवमी",
            Self::Dashami => "दशमी",
            Self::Ekadashi => "एकादशी",
            Self::Dwadashi => "द्वादशी",
            Self::Trayodashi => "त्रयोदशी",
            Self::Chaturdashi => "चतुर्दशी",
            Self::Purnima => "पूर्णिमा",
        }
    }

    pub const fn english(self) -> &'static str {
        match self {
            Self::Pratipada => "Pratipada",
            Self::Dwitiya => "Dwitiya",
            Self::Tritiya => "Tritiya",
            Self::Chaturthi => "Chaturthi",
            Self::Panchami => "Panchami",
            Self::Shashthi => "Shashthi",
            Self::Saptami => "Saptami",
            Self::Ashtami => "Ashtami",
            Self::Navami => "Navami",
            Self::Dashami => "Dashami",
            Self::Ekadashi => "Ekadashi",
            Self::Dwadashi => "Dwadashi",
            Self::Trayodashi => "Trayodashi",
            Self::Chaturdashi => "Chaturdashi",
            Self::Purnima => "Purnima",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Tithi of the month with its fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TithiLabel {
    /// Position in the lunar month, 0..=29.
    pub index: u8,
    pub paksha: Paksha,
    pub tithi: Tithi,
}

impl TithiLabel {
    /// Build from a month index; values past 29 wrap.
    pub fn from_index(index: u8) -> Self {
        let index = index % TITHIS_PER_MONTH;
        let paksha = if index < TITHIS_PER_PAKSHA {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        };
        Self {
            index,
            paksha,
            tithi: ALL_TITHIS[usize::from(index % TITHIS_PER_PAKSHA)],
        }
    }

    /// e.g. "शुक्ल प्रतिपदा".
    pub fn hindi(&self) -> String {
        format!("{} {}", self.paksha.hindi(), self.tithi.hindi())
    }

    /// e.g. "Shukla Pratipada".
    pub fn english(&self) -> String {
        format!("{} {}", self.paksha.english(), self.tithi.english())
    }
}

/// Elongation of the Moon from the Sun in `[0, 360)`.
pub fn lunar_elongation(sun_lon: f64, moon_lon: f64) -> f64 {
    normalize_degrees(moon_lon - sun_lon)
}

/// Tithi from the Sun and Moon longitudes.
///
/// The difference is reduced after subtracting, so inputs that are
/// themselves unreduced (e.g. 370 deg) classify the same as their
/// reduced values.
pub fn tithi_of(sun_lon: f64, moon_lon: f64) -> TithiLabel {
    let diff = lunar_elongation(sun_lon, moon_lon);
    let index = ((diff / TITHI_SPAN).floor() as u8).min(TITHIS_PER_MONTH - 1);
    TithiLabel::from_index(index)
}
