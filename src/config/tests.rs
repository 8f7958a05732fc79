use super::builder::default_config_content;
use super::loading::{apply_defaults, apply_port_override, parse_config};
use super::validation::validate_config;
use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

/// Run `f` with XDG_CONFIG_HOME and PORT pointed at test values, restoring both.
fn with_env<T>(xdg: &Path, port: Option<&str>, f: impl FnOnce() -> T) -> T {
    let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
    let original_port = std::env::var(PORT_ENV_VAR).ok();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", xdg);
        match port {
            Some(p) => std::env::set_var(PORT_ENV_VAR, p),
            None => std::env::remove_var(PORT_ENV_VAR),
        }
    }

    let result = f();

    unsafe {
        match original_xdg {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        match original_port {
            Some(val) => std::env::set_var(PORT_ENV_VAR, val),
            None => std::env::remove_var(PORT_ENV_VAR),
        }
    }
    result
}

#[test]
#[serial]
fn test_config_load_default_creation() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("panchang").join("panchang.toml");

    let result = with_env(temp_dir.path(), None, Config::load);

    if let Err(e) = &result {
        eprintln!("Config::load() failed: {:?}", e);
    }
    let config = result.unwrap();
    assert!(config_path.exists());
    assert_eq!(config.port(), DEFAULT_PORT);
    assert_eq!(config.timezone(), DEFAULT_TIMEZONE);
}

#[test]
#[serial]
fn test_port_env_overrides_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("panchang.toml");
    fs::write(&path, "port = 9000\n").unwrap();

    let config = with_env(temp_dir.path(), Some("10000"), || load_from_path(&path)).unwrap();
    assert_eq!(config.port, Some(10000));
}

#[test]
#[serial]
fn test_invalid_port_env_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("panchang.toml");
    fs::write(&path, "").unwrap();

    let result = with_env(temp_dir.path(), Some("http"), || load_from_path(&path));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_load_from_missing_path_fails() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("absent.toml");
    let result = with_env(temp_dir.path(), None, || load_from_path(&path));
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_default_content_parses_to_defaults() {
    let parsed = parse_config(&default_config_content()).unwrap();
    validate_config(&parsed).unwrap();

    let mut expected = Config::default();
    apply_defaults(&mut expected);
    assert_eq!(parsed, expected);
}

#[test]
fn test_empty_config_gets_defaults() {
    let mut config = parse_config("").unwrap();
    assert_eq!(config, Config::default());
    apply_defaults(&mut config);

    assert_eq!(config.bind.as_deref(), Some(DEFAULT_BIND));
    assert_eq!(config.workers, Some(DEFAULT_WORKERS));
    assert_eq!(config.dst_gap, Some(DstGapPolicy::ShiftForward));
    assert_eq!(config.zodiac, Some(Zodiac::Tropical));
}

#[test]
fn test_parse_enums() {
    let config = parse_config("dst_gap = \"reject\"\nzodiac = \"lahiri\"\n").unwrap();
    let settings = config.calculation_settings();
    assert_eq!(settings.dst_gap, DstGapPolicy::Reject);
    assert_eq!(settings.zodiac, Zodiac::Lahiri);

    assert!(parse_config("dst_gap = \"earliest\"").is_err());
}

#[test]
fn test_out_of_range_port_fails_to_parse() {
    assert!(parse_config("port = 70000").is_err());
}

#[test]
fn test_config_validation_basic() {
    let config = Config {
        bind: Some("127.0.0.1".to_string()),
        port: Some(8080),
        workers: Some(8),
        cors_origin: Some("https://example.org".to_string()),
        timezone: Some("America/New_York".to_string()),
        latitude: Some(40.7128),
        longitude: Some(-74.0060),
        dst_gap: Some(DstGapPolicy::Reject),
        zodiac: Some(Zodiac::Raman),
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_config_validation_rejects_bad_values() {
    let cases = [
        Config {
            port: Some(0),
            ..Default::default()
        },
        Config {
            workers: Some(0),
            ..Default::default()
        },
        Config {
            workers: Some(MAXIMUM_WORKERS + 1),
            ..Default::default()
        },
        Config {
            bind: Some("localhost".to_string()),
            ..Default::default()
        },
        Config {
            timezone: Some("Mars/Phobos".to_string()),
            ..Default::default()
        },
        Config {
            latitude: Some(90.5),
            ..Default::default()
        },
        Config {
            longitude: Some(-180.01),
            ..Default::default()
        },
        Config {
            cors_origin: Some("a\r\nb".to_string()),
            ..Default::default()
        },
    ];

    for config in cases {
        assert!(validate_config(&config).is_err(), "accepted {config:?}");
    }
}

#[test]
fn test_config_validation_accepts_boundaries() {
    let config = Config {
        port: Some(u16::MAX),
        workers: Some(MAXIMUM_WORKERS),
        latitude: Some(-90.0),
        longitude: Some(180.0),
        bind: Some("::".to_string()),
        ..Default::default()
    };
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_port_override_ignores_missing_and_blank() {
    let mut config = Config {
        port: Some(9000),
        ..Default::default()
    };
    apply_port_override(&mut config, None).unwrap();
    apply_port_override(&mut config, Some("  ".to_string())).unwrap();
    assert_eq!(config.port, Some(9000));

    apply_port_override(&mut config, Some(" 8081 ".to_string())).unwrap();
    assert_eq!(config.port, Some(8081));
}

#[test]
fn test_listen_address_brackets_ipv6() {
    let mut config = Config::default();
    assert_eq!(config.listen_address(), "0.0.0.0:8000");
    config.bind = Some("::1".to_string());
    config.port = Some(9000);
    assert_eq!(config.listen_address(), "[::1]:9000");
}
