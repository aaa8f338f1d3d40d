pub mod config;
pub mod handlers;
pub mod models;

use std::time::Instant;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use tracing::{debug, error, info, instrument};

use crate::api::config::ApiConfig;
use crate::api::handlers::{health_check, manifest_handler, normalize_handler};

/// State shared by all workers
#[derive(Debug)]
pub struct AppState {
    pub started_at: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers the API routes
///
/// Used by [`start_server`] and by tests mounting the service with `actix_web::test`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/normalize")
            .route(web::get().to(normalize_handler))
            .route(web::head().to(normalize_handler))
            .route(web::post().to(normalize_handler)),
    )
    .service(web::resource("/health").route(web::get().to(health_check)))
    .service(web::resource("/manifest.webmanifest").route(web::get().to(manifest_handler)));
}

/// Starts the API server with the specified configuration
///
/// # Arguments
/// * `config` - API configuration (bind address, query parameter, manifest)
///
/// # Returns
/// * `Result<()>` - Success once the server stops, or an error
#[instrument(skip(config), fields(host = %config.host, port = config.port))]
pub async fn start_server(config: ApiConfig) -> Result<()> {
    info!("Starting feed reader API on {}:{}", config.host, config.port);

    let host = config.host.clone();
    let port = config.port;
    let request_timeout = config.request_timeout();
    debug!(
        "Query parameter: '{}', request timeout: {:?}",
        config.query_param, request_timeout
    );

    let config_data = web::Data::new(config);
    let state_data = web::Data::new(AppState::new());

    let server_result = HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(state_data.clone())
            .configure(configure)
    })
    .client_request_timeout(request_timeout)
    .bind((host.as_str(), port))
    .map_err(|e| {
        error!("Failed to bind to {}:{}: {}", host, port, e);
        e
    })?
    .run()
    .await;

    if let Err(e) = server_result {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
