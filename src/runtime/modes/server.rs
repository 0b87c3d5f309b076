//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::configure_routes;
use crate::api::middleware::RequestIdMiddleware;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// worker 数量上限
const MAX_WORKERS: usize = 32;

/// Run server mode
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_startup(config)
        .await
        .context("Failed to prepare server startup")?;

    let link_service = web::Data::from(startup.link_service.clone());
    let auth_service = web::Data::from(startup.auth_service.clone());
    let session_service = web::Data::from(startup.session_service.clone());
    let route_settings = web::Data::new(startup.route_settings.clone());
    // 所有 worker 共享同一个限流状态
    let login_limiter = Arc::new(startup.login_limiter);

    let cpu_count = config.server.cpu_count.clamp(1, MAX_WORKERS);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(link_service.clone())
            .app_data(auth_service.clone())
            .app_data(session_service.clone())
            .app_data(route_settings.clone())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(|cfg| configure_routes(cfg, &login_limiter))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    info!("Starting server at http://{} ({} workers)", bind_address, cpu_count);

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db_for_shutdown) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
