use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::api::config::ApiConfig;
use crate::api::models::{ErrorResponse, HealthStatus, NormalizeResponse};
use crate::api::AppState;
use crate::request_parser::parse_request;
use crate::url_parser::normalize_url_detailed;

/// HTTP handler for normalize requests
///
/// Accepts GET with a base64url-encoded JSON object in the configured query
/// parameter, or POST with a JSON object body. The object must carry a
/// string `url`.
///
/// # Arguments
/// * `req` - The incoming request (method and query string)
/// * `body` - Raw request body, empty for GET
/// * `config` - API configuration
///
/// # Returns
/// * HTTP response with the normalized URL or error information
#[instrument(skip_all, fields(method = %req.method()))]
pub async fn normalize_handler(
    req: HttpRequest,
    body: web::Bytes,
    config: web::Data<ApiConfig>,
) -> impl Responder {
    let data = parse_request(&req, &body, &config.query_param);

    let input = match data.get("url") {
        Some(Value::String(url)) => url.clone(),
        Some(other) => {
            warn!("Rejected request: 'url' is not a string ({})", other);
            return HttpResponse::BadRequest().json(ErrorResponse::new("'url' must be a string"));
        }
        None => {
            warn!("Rejected request without a 'url' value");
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Request data must be a JSON object with a 'url' field",
            ));
        }
    };

    let normalized = normalize_url_detailed(&input);
    if normalized.is_canonical() {
        debug!("Normalized '{}' to '{}'", input, normalized.as_str());
    } else if !normalized.is_empty() {
        info!("URL parser rejected '{}', returning fallback", input);
    }

    HttpResponse::Ok().json(NormalizeResponse {
        input,
        canonical: normalized.is_canonical(),
        normalized: normalized.into_string(),
    })
}

/// Health check endpoint for monitoring service status
#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime = state.started_at.elapsed();
    debug!("Health check: uptime={:?}", uptime);

    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
        uptime_secs: uptime.as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Serves the web app manifest
#[instrument(skip(config))]
pub async fn manifest_handler(config: web::Data<ApiConfig>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/manifest+json")
        .json(&config.manifest)
}
