use chrono::{TimeZone, Utc};
use mockall::mock;
use mockall::predicate::always;

use panchang::AstroError;
use panchang::astro::{AstroQuery, CalculationSettings, compute_report};
use panchang::ephemeris::{Ephemeris, EphemerisError};
use panchang::time::{DstGapPolicy, JulianDay, normalize};

mock! {
    pub Engine {}

    impl Ephemeris for Engine {
        fn name(&self) -> &'static str;
        fn solar_longitude(&self, t: JulianDay) -> Result<f64, EphemerisError>;
        fn lunar_longitude(&self, t: JulianDay) -> Result<f64, EphemerisError>;
    }
}

/// JD of 2026-02-06T00:30:00Z, the Kolkata anchor for 2026-02-06
const KOLKATA_ANCHOR_JD: f64 = 2_461_077.5 + 0.5 / 24.0;

fn near(expected: f64) -> impl Fn(&JulianDay) -> bool {
    move |t: &JulianDay| (t.value() - expected).abs() < 1e-7
}

fn query(date: &str, tz: &str) -> AstroQuery {
    AstroQuery {
        tz: tz.to_string(),
        ..AstroQuery::for_date(date)
    }
}

#[test]
fn test_kolkata_end_to_end() {
    let day = normalize("2026-02-06", "Asia/Kolkata", DstGapPolicy::ShiftForward).unwrap();
    assert_eq!(
        day.anchor_utc,
        Utc.with_ymd_and_hms(2026, 2, 6, 0, 30, 0).unwrap()
    );

    let mut engine = MockEngine::new();
    engine
        .expect_solar_longitude()
        .withf(near(KOLKATA_ANCHOR_JD))
        .times(1)
        .returning(|_| Ok(322.5));
    engine
        .expect_lunar_longitude()
        .withf(near(KOLKATA_ANCHOR_JD))
        .times(1)
        .returning(|_| Ok(200.123_456_789));

    let report = compute_report(
        &query("2026-02-06", "Asia/Kolkata"),
        &engine,
        &CalculationSettings::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "date": "2026-02-06",
            "timezone": "Asia/Kolkata",
            "sun": { "longitude": 322.5, "sign_hi": "कुंभ", "sign_en": "Aquarius" },
            "moon": { "longitude": 200.123457, "sign_hi": "तुला", "sign_en": "Libra" },
            "panchang": {
                "tithi": { "hi": "कृष्ण पंचमी", "en": "Krishna Panchami" },
                "nakshatra": { "hi": "विशाखा", "en": "Vishakha" }
            }
        })
    );
}

#[test]
fn test_repeated_requests_are_identical() {
    let mut engine = MockEngine::new();
    engine
        .expect_solar_longitude()
        .with(always())
        .times(2)
        .returning(|t| Ok((t.value() * 0.98).rem_euclid(360.0)));
    engine
        .expect_lunar_longitude()
        .times(2)
        .returning(|t| Ok((t.value() * 13.17).rem_euclid(360.0)));

    let q = query("2026-07-01", "Europe/Berlin");
    let settings = CalculationSettings::default();
    let first = compute_report(&q, &engine, &settings).unwrap();
    let second = compute_report(&q, &engine, &settings).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_inputs_never_reach_the_ephemeris() {
    // No expectations: any ephemeris call fails the test
    let engine = MockEngine::new();
    let settings = CalculationSettings::default();

    let err = compute_report(&query("2026-02-30", "Asia/Kolkata"), &engine, &settings)
        .unwrap_err();
    assert!(matches!(err, AstroError::InvalidDateFormat { .. }));
    assert_eq!(err.http_status(), 400);

    let err = compute_report(&query("2026-02-06", "Mars/Phobos"), &engine, &settings)
        .unwrap_err();
    assert!(matches!(err, AstroError::UnknownTimeZone { .. }));
    assert_eq!(err.code(), "UNKNOWN_TIME_ZONE");
}

#[test]
fn test_dst_gap_rejected() {
    let engine = MockEngine::new();
    let settings = CalculationSettings {
        dst_gap: DstGapPolicy::Reject,
        ..Default::default()
    };

    let err = compute_report(&query("2011-12-30", "Pacific/Apia"), &engine, &settings)
        .unwrap_err();
    assert!(matches!(err, AstroError::NonexistentLocalTime { .. }));
    assert_eq!(err.http_status(), 422);
}

#[test]
fn test_dst_gap_shifted_forward() {
    let expected = JulianDay::from_utc(&Utc.with_ymd_and_hms(2011, 12, 30, 16, 0, 0).unwrap());

    let mut engine = MockEngine::new();
    engine
        .expect_solar_longitude()
        .withf(near(expected.value()))
        .times(1)
        .returning(|_| Ok(278.0));
    engine
        .expect_lunar_longitude()
        .withf(near(expected.value()))
        .times(1)
        .returning(|_| Ok(285.0));

    let report = compute_report(
        &query("2011-12-30", "Pacific/Apia"),
        &engine,
        &CalculationSettings::default(),
    )
    .unwrap();
    assert_eq!(report.date, "2011-12-30");
    assert_eq!(report.panchang.tithi.en, "Shukla Pratipada");
}

#[test]
fn test_ephemeris_failure_aborts_request() {
    let mut engine = MockEngine::new();
    engine.expect_solar_longitude().times(1).returning(|t| {
        Err(EphemerisError::OutOfRange {
            julian_day: t.value(),
            min: 0.0,
            max: 1.0,
        })
    });
    engine.expect_lunar_longitude().times(0);

    let err = compute_report(
        &query("2026-02-06", "Asia/Kolkata"),
        &engine,
        &CalculationSettings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AstroError::EphemerisUnavailable(_)));
    assert_eq!(err.code(), "EPHEMERIS_UNAVAILABLE");
    assert_eq!(err.http_status(), 503);
}

#[test]
fn test_infinite_moon_is_rejected() {
    let mut engine = MockEngine::new();
    engine.expect_solar_longitude().returning(|_| Ok(10.0));
    engine
        .expect_lunar_longitude()
        .returning(|_| Ok(f64::INFINITY));

    let err = compute_report(
        &query("2026-02-06", "Asia/Kolkata"),
        &engine,
        &CalculationSettings::default(),
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 503);
}
