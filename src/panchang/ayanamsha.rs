//! Zodiac reference frames.
//!
//! Longitudes from the ephemeris are tropical (measured from the vernal
//! equinox). Sidereal frames subtract the ayanamsha, the drift between the
//! equinox and a fixed-star anchor. The ayanamsha at any epoch is the frame's
//! J2000.0 reference value plus the IAU 2006 general precession in longitude.

use serde::Deserialize;

use crate::ephemeris::normalize_degrees;
use crate::time::JulianDay;

/// Zodiac used for signs and nakshatras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    /// Equinox-based, no correction.
    #[default]
    Tropical,
    /// Chitrapaksha: Spica at 0 Libra sidereal.
    Lahiri,
    /// B.V. Raman.
    Raman,
    /// Krishnamurti Paddhati, a hair off Lahiri.
    Krishnamurti,
}

impl Zodiac {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tropical => "tropical",
            Self::Lahiri => "lahiri",
            Self::Raman => "raman",
            Self::Krishnamurti => "krishnamurti",
        }
    }

    /// Reference ayanamsha at J2000.0 in degrees; `None` for tropical.
    pub const fn reference_j2000_deg(self) -> Option<f64> {
        match self {
            Self::Tropical => None,
            Self::Lahiri => Some(23.853),
            Self::Raman => Some(22.370),
            Self::Krishnamurti => Some(23.850),
        }
    }

    pub fn is_sidereal(self) -> bool {
        self.reference_j2000_deg().is_some()
    }

    /// Ayanamsha in degrees at `t`, zero for the tropical frame.
    pub fn ayanamsha_deg(self, t: JulianDay) -> f64 {
        match self.reference_j2000_deg() {
            Some(reference) => {
                reference + general_precession_longitude_deg(t.centuries_since_j2000())
            }
            None => 0.0,
        }
    }

    /// Convert a tropical longitude into this frame, reduced to `[0, 360)`.
    pub fn apply(self, tropical_lon: f64, t: JulianDay) -> f64 {
        normalize_degrees(tropical_lon - self.ayanamsha_deg(t))
    }
}

/// IAU 2006 general precession in longitude, degrees.
///
/// `p_A` polynomial in Julian centuries from J2000.0, arcseconds.
pub fn general_precession_longitude_deg(t_centuries: f64) -> f64 {
    let t = t_centuries;
    let arcsec = (((( -0.000_000_038_3 * t - 0.000_023_857) * t + 0.000_079_64) * t
        + 1.105_434_8)
        * t
        + 5_028.796_195)
        * t;
    arcsec / 3600.0
}
