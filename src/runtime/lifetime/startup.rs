use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::services::{LoginLimiterConfig, RouteSettings, login_rate_limit_config};
use crate::config::StaticConfig;
use crate::services::{
    AuthService, LinkService, LinkSettings, SessionService, title_fetcher_from_config,
};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// Everything the server and CLI modes need, built once from config
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    pub session_service: Arc<SessionService>,
    pub route_settings: RouteSettings,
    pub login_limiter: LoginLimiterConfig,
}

/// 准备启动上下文：连接数据库、运行迁移、装配服务
pub async fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let title_fetcher = title_fetcher_from_config(&config.links);
    let link_service = Arc::new(LinkService::new(
        storage.clone(),
        title_fetcher,
        LinkSettings::from(&config.links),
    ));

    let session_service = Arc::new(SessionService::from_config(&config.auth));
    let auth_service = Arc::new(AuthService::new(storage.clone(), session_service.clone()));

    let login_limiter =
        login_rate_limit_config(config.auth.login_burst, config.auth.login_seconds_per_request)
            .context("Invalid [auth] login rate limit settings")?;

    let route_settings = RouteSettings::from_config(config);
    if route_settings.uses_request_host() {
        warn!(
            "links.base_url is not set; short URLs take the scheme and Host header of \
             whoever creates them. Set it for public deployments"
        );
    } else if let Some(base_url) = &route_settings.base_url {
        info!("Short links use base URL {}", base_url);
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        link_service,
        auth_service,
        session_service,
        route_settings,
        login_limiter,
    })
}
