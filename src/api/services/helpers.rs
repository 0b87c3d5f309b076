//! Route 帮助函数

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::web::{Form, Json};
use actix_web::{Either, HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::error;

use crate::api::constants::SESSION_COOKIE_NAME;
use crate::config::{AuthConfig, SameSitePolicy};
use crate::errors::ShortlyError;

/// 同时接受 JSON 和表单提交的请求体
pub type JsonOrForm<T> = Either<Json<T>, Form<T>>;

pub fn body_into_inner<T>(body: JsonOrForm<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 构建 JSON 错误响应
pub fn error_response(err: &ShortlyError) -> HttpResponse {
    if err.is_user_facing() {
        HttpResponse::build(err.http_status())
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ErrorBody {
                error: err.message().to_string(),
            })
    } else {
        error!("{}", err.format_colored());
        HttpResponse::InternalServerError()
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ErrorBody {
                error: "Internal server error".to_string(),
            })
    }
}

/// 302 跳转
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}

/// 由请求推出 `{scheme}://{host}`（配置了 base_url 时不使用）
pub fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

/// Cookie 构建器
#[derive(Debug, Clone)]
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    session_minutes: u64,
}

impl CookieBuilder {
    pub fn new(config: &AuthConfig) -> Self {
        let same_site = match config.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            // 浏览器要求 SameSite=None 必须带 Secure
            secure: config.cookie_secure || same_site == SameSite::None,
            session_minutes: config.session_minutes,
        }
    }

    fn build_cookie_base(&self, value: String, max_age: CookieDuration) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE_NAME, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(token, CookieDuration::minutes(self.session_minutes as i64))
    }

    pub fn expired_session_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(String::new(), CookieDuration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let builder = CookieBuilder::new(&AuthConfig::default());
        let cookie = builder.session_cookie("token".to_string());

        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::minutes(1440)));
    }

    #[test]
    fn test_expired_cookie() {
        let builder = CookieBuilder::new(&AuthConfig::default());
        let cookie = builder.expired_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }

    #[test]
    fn test_same_site_none_forces_secure() {
        let config = AuthConfig {
            cookie_same_site: SameSitePolicy::None,
            cookie_secure: false,
            ..Default::default()
        };
        let cookie = CookieBuilder::new(&config).session_cookie("t".to_string());
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_error_response_status() {
        let resp = error_response(&ShortlyError::invalid_url("nope"));
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        let resp = error_response(&ShortlyError::database_operation("disk full"));
        assert_eq!(
            resp.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
