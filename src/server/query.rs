//! `/astro` query-string parsing.

use url::form_urlencoded;

use crate::astro::AstroQuery;
use crate::error::AstroError;

/// Values used for parameters a request leaves out.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefaults {
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Default)]
struct RawParams {
    date: Option<String>,
    tz: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
}

/// Build an [`AstroQuery`] from a raw (already split off) query string.
///
/// The first occurrence of a key wins. Unknown keys are ignored.
pub fn parse_astro_query(
    query: &str,
    defaults: &RequestDefaults,
) -> Result<AstroQuery, AstroError> {
    let mut raw = RawParams::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            "date" => &mut raw.date,
            "tz" => &mut raw.tz,
            "lat" => &mut raw.lat,
            "lon" => &mut raw.lon,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    let date = raw.date.ok_or_else(|| AstroError::InvalidParameter {
        name: "date",
        reason: "is required (YYYY-MM-DD)".to_string(),
    })?;

    Ok(AstroQuery {
        date,
        tz: raw.tz.unwrap_or_else(|| defaults.timezone.clone()),
        latitude: parse_coordinate("lat", raw.lat.as_deref(), defaults.latitude, 90.0)?,
        longitude: parse_coordinate("lon", raw.lon.as_deref(), defaults.longitude, 180.0)?,
    })
}

fn parse_coordinate(
    name: &'static str,
    raw: Option<&str>,
    default: f64,
    limit: f64,
) -> Result<f64, AstroError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value: f64 = raw.trim().parse().map_err(|_| AstroError::InvalidParameter {
        name,
        reason: format!("'{raw}' is not a number"),
    })?;

    if !value.is_finite() || value.abs() > limit {
        return Err(AstroError::InvalidParameter {
            name,
            reason: format!("must be between -{limit} and {limit} (got {raw})"),
        });
    }
    Ok(value)
}
