//! Request routing, independent of the HTTP transport.
//!
//! [`route`] maps a method and request target to a [`Reply`]; the worker loop
//! only converts replies into `tiny_http` responses. Every reply carries the
//! CORS origin header.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use super::query::{RequestDefaults, parse_astro_query};
use crate::astro::{CalculationSettings, compute_report};
use crate::config::Config;
use crate::constants::SERVICE_NAME;
use crate::ephemeris::Ephemeris;
use crate::error::AstroError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// Everything a worker needs to answer requests. Immutable once built.
pub struct AppContext {
    pub ephemeris: Arc<dyn Ephemeris>,
    pub settings: CalculationSettings,
    pub defaults: RequestDefaults,
    pub cors_origin: String,
    /// Log every request and rejection
    pub debug_enabled: bool,
}

impl AppContext {
    pub fn from_config(config: &Config, ephemeris: Arc<dyn Ephemeris>) -> Self {
        Self {
            ephemeris,
            settings: config.calculation_settings(),
            defaults: RequestDefaults {
                timezone: config.timezone().to_string(),
                latitude: config.latitude(),
                longitude: config.longitude(),
            },
            cors_origin: config.cors_origin().to_string(),
            debug_enabled: false,
        }
    }

    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }
}

/// Transport-agnostic response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Reply {
    fn json<T: Serialize>(status: u16, value: &T, cors_origin: &str) -> Self {
        // Serializing our own report types cannot fail; fall back to a bare 500
        let (status, body) = match serde_json::to_string(value) {
            Ok(body) => (status, body),
            Err(e) => (500, error_body("INTERNAL", &e.to_string())),
        };
        Self {
            status,
            headers: vec![
                ("Content-Type", JSON_CONTENT_TYPE.to_string()),
                ("Access-Control-Allow-Origin", cors_origin.to_string()),
            ],
            body,
        }
    }

    fn error(status: u16, code: &str, message: &str, cors_origin: &str) -> Self {
        Self {
            status,
            headers: vec![
                ("Content-Type", JSON_CONTENT_TYPE.to_string()),
                ("Access-Control-Allow-Origin", cors_origin.to_string()),
            ],
            body: error_body(code, message),
        }
    }

    fn from_astro_error(err: &AstroError, cors_origin: &str) -> Self {
        Self::error(err.http_status(), err.code(), &err.to_string(), cors_origin)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn error_body(code: &str, message: &str) -> String {
    json!({ "error": { "code": code, "message": message } }).to_string()
}

/// Dispatch one request.
pub fn route(method: &str, target: &str, ctx: &AppContext) -> Reply {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let origin = ctx.cors_origin.as_str();

    if method.eq_ignore_ascii_case("OPTIONS") {
        return preflight(origin);
    }

    let known = matches!(path, "/astro" | "/healthz");
    if !known {
        return Reply::error(
            404,
            "NOT_FOUND",
            &format!("no route for {path}"),
            origin,
        );
    }

    if !method.eq_ignore_ascii_case("GET") {
        let mut reply = Reply::error(
            405,
            "METHOD_NOT_ALLOWED",
            &format!("{method} is not allowed on {path}"),
            origin,
        );
        reply.headers.push(("Allow", ALLOWED_METHODS.to_string()));
        return reply;
    }

    match path {
        "/healthz" => Reply::json(200, &json!({ "ok": true, "service": SERVICE_NAME }), origin),
        _ => astro(query, ctx),
    }
}

fn astro(query: &str, ctx: &AppContext) -> Reply {
    let result = parse_astro_query(query, &ctx.defaults)
        .and_then(|q| compute_report(&q, ctx.ephemeris.as_ref(), &ctx.settings));

    match result {
        Ok(report) => Reply::json(200, &report, &ctx.cors_origin),
        Err(e) => {
            if !e.is_client_error() {
                log_warning!("Failed /astro?{query}: {e}");
            } else if ctx.debug_enabled {
                log_debug!("Rejected /astro?{query}: {e}");
            }
            Reply::from_astro_error(&e, &ctx.cors_origin)
        }
    }
}

fn preflight(origin: &str) -> Reply {
    Reply {
        status: 204,
        headers: vec![
            ("Access-Control-Allow-Origin", origin.to_string()),
            ("Access-Control-Allow-Methods", ALLOWED_METHODS.to_string()),
            ("Access-Control-Allow-Headers", "*".to_string()),
            ("Access-Control-Max-Age", "86400".to_string()),
        ],
        body: String::new(),
    }
}
