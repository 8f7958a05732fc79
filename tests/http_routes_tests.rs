use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use panchang::config::Config;
use panchang::ephemeris::AnalyticEphemeris;
use panchang::server::{AppContext, AstroServer, route};
use panchang::signals::SignalState;

fn analytic_context() -> AppContext {
    AppContext::from_config(&Config::default(), Arc::new(AnalyticEphemeris::new()))
}

fn body_json(body: &str) -> Value {
    serde_json::from_str(body).expect("body should be JSON")
}

#[test]
fn test_astro_with_analytic_engine() {
    let ctx = analytic_context();
    let reply = route("GET", "/astro?date=2026-02-06&tz=Asia/Kolkata", &ctx);

    assert_eq!(reply.status, 200);
    assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));

    let json = body_json(&reply.body);
    assert_eq!(json["date"], "2026-02-06");
    assert_eq!(json["timezone"], "Asia/Kolkata");
    assert_eq!(json["sun"]["sign_en"], "Aquarius");
    assert_eq!(json["sun"]["sign_hi"], "कुंभ");

    let sun = json["sun"]["longitude"].as_f64().unwrap();
    assert!((316.5..318.0).contains(&sun), "sun at {sun}");
    let moon = json["moon"]["longitude"].as_f64().unwrap();
    assert!((0.0..360.0).contains(&moon));

    for key in ["tithi", "nakshatra"] {
        assert!(json["panchang"][key]["hi"].is_string());
        assert!(json["panchang"][key]["en"].is_string());
    }
}

#[test]
fn test_same_request_same_body() {
    let ctx = analytic_context();
    let target = "/astro?date=1999-12-31&tz=America/New_York";
    assert_eq!(route("GET", target, &ctx), route("GET", target, &ctx));
}

#[test]
fn test_error_bodies() {
    let ctx = analytic_context();

    let cases = [
        ("/astro?date=2026-13-01", 400, "INVALID_DATE_FORMAT"),
        ("/astro?date=2026-02-06&tz=Mars/Phobos", 400, "UNKNOWN_TIME_ZONE"),
        ("/astro?tz=Asia/Kolkata", 400, "INVALID_PARAMETER"),
        ("/astro?date=2026-02-06&lat=91", 400, "INVALID_PARAMETER"),
        ("/astro?date=9999-01-01", 503, "EPHEMERIS_UNAVAILABLE"),
        ("/nowhere", 404, "NOT_FOUND"),
    ];

    for (target, status, code) in cases {
        let reply = route("GET", target, &ctx);
        assert_eq!(reply.status, status, "{target}");
        let json = body_json(&reply.body);
        assert_eq!(json["error"]["code"], code, "{target}");
        assert!(json["error"]["message"].is_string());
        assert_eq!(reply.header("Access-Control-Allow-Origin"), Some("*"));
    }
}

#[test]
fn test_post_is_rejected() {
    let reply = route("POST", "/astro?date=2026-02-06", &analytic_context());
    assert_eq!(reply.status, 405);
    assert_eq!(reply.header("Allow"), Some("GET, OPTIONS"));
}

fn http_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
    )
    .unwrap();

    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                raw.extend_from_slice(&chunk[..n]);
                if String::from_utf8_lossy(&raw).contains("\r\n\r\n{") && raw.ends_with(b"}") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}

#[test]
fn test_live_server_answers_and_shuts_down() {
    let server = AstroServer::bind("127.0.0.1:0", analytic_context(), 2).unwrap();
    let addr = server.local_addr().unwrap();

    let signals = SignalState::detached();
    let worker_signals = signals.clone();
    let handle = thread::spawn(move || server.run(&worker_signals));

    let health = http_get(addr, "/healthz");
    let status_line = health.lines().next().unwrap_or_default();
    assert!(status_line.contains(" 200"), "{status_line}");
    assert!(health.contains("Access-Control-Allow-Origin: *"));
    assert!(health.contains(r#"{"ok":true,"service":"astro-api"}"#));

    let astro = http_get(addr, "/astro?date=2026-02-06&tz=Asia/Kolkata");
    assert!(astro.lines().next().unwrap_or_default().contains(" 200"));
    assert!(astro.contains("application/json"));
    assert!(astro.contains(r#""sign_en":"Aquarius""#));

    signals.request_shutdown();
    handle.join().unwrap().unwrap();
}
