pub mod auth;
pub mod helpers;
pub mod links;
pub mod pages;
pub mod redirect;

use actix_web::web;

use crate::api::middleware::RequireSession;
use crate::config::StaticConfig;

pub use auth::{LoginKeyExtractor, LoginLimiterConfig, login_rate_limit_config};
pub use helpers::CookieBuilder;
pub use links::LinkResponse;

/// Route-level settings shared by the handlers
#[derive(Debug, Clone)]
pub struct RouteSettings {
    /// Fixed prefix for short links; `None` uses the request's scheme and host
    pub base_url: Option<String>,
    pub cookies: CookieBuilder,
}

impl RouteSettings {
    pub fn from_config(config: &StaticConfig) -> Self {
        Self {
            base_url: config
                .links
                .base_url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            cookies: CookieBuilder::new(&config.auth),
        }
    }

    /// 没有固定前缀时，短链接前缀由创建者请求里的 Host 决定
    pub fn uses_request_host(&self) -> bool {
        self.base_url.is_none()
    }
}

/// Register every route
///
/// Handlers expect `LinkService`, `AuthService`, `SessionService` and
/// `RouteSettings` as app data. `/{code}` is registered last so the fixed
/// paths always win.
pub fn configure_routes(cfg: &mut web::ServiceConfig, login_limiter: &LoginLimiterConfig) {
    cfg.service(
        web::resource("/").route(web::get().to(pages::index).wrap(RequireSession)),
    )
    .service(
        web::resource("/create").route(web::get().to(pages::create).wrap(RequireSession)),
    )
    .service(
        web::resource("/links")
            .route(web::get().to(links::list_links).wrap(RequireSession))
            .route(web::post().to(links::create_link)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(pages::login))
            .route(
                web::post()
                    .to(auth::login)
                    .wrap(auth::login_rate_limiter(login_limiter)),
            ),
    )
    .service(
        web::resource("/signup")
            .route(web::get().to(pages::signup))
            .route(web::post().to(auth::signup)),
    )
    .service(web::resource("/logout").route(web::get().to(auth::logout)))
    .service(web::resource("/{code}").route(web::get().to(redirect::handle_redirect)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_unset_or_blank_uses_request_host() {
        let mut config = StaticConfig::default();
        assert!(RouteSettings::from_config(&config).uses_request_host());

        config.links.base_url = Some("/".to_string());
        assert!(RouteSettings::from_config(&config).uses_request_host());

        config.links.base_url = Some("https://s.example.com/".to_string());
        let settings = RouteSettings::from_config(&config);
        assert!(!settings.uses_request_host());
        assert_eq!(settings.base_url.as_deref(), Some("https://s.example.com"));
    }
}
