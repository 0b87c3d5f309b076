//! Login, signup and logout endpoints

use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError,
};
use actix_web::dev::ServiceRequest;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpResponse, web};
use governor::middleware::NoOpMiddleware;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::RouteSettings;
use super::helpers::{JsonOrForm, body_into_inner, error_response, redirect_to};
use crate::api::constants::{HOME_PATH, LOGIN_PATH, SIGNUP_PATH};
use crate::errors::{Result, ShortlyError};
use crate::services::{AuthService, Session};

/// 登录/注册表单，缺字段按空字符串处理（随后校验失败）
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// 基于连接 IP 的限流 key 提取器
///
/// 拿不到对端地址（如 Unix socket、测试请求）时所有请求共用一个桶。
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> std::result::Result<Self::Key, Self::KeyExtractionError> {
        let key = req
            .connection_info()
            .peer_addr()
            .unwrap_or("unknown")
            .to_string();
        Ok(key)
    }
}

pub type LoginLimiterConfig = GovernorConfig<LoginKeyExtractor, NoOpMiddleware>;

/// 创建登录限流配置
///
/// 每 `seconds_per_request` 秒补充一个令牌，突发最多 `burst` 次；超限返回 429。
pub fn login_rate_limit_config(burst: u32, seconds_per_request: u64) -> Result<LoginLimiterConfig> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(seconds_per_request)
        .burst_size(burst)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .ok_or_else(|| {
            ShortlyError::validation(format!(
                "Invalid login rate limit: burst={}, seconds_per_request={}",
                burst, seconds_per_request
            ))
        })?;

    debug!(
        "Login rate limiter created: 1 req/{}s, burst {}",
        seconds_per_request, burst
    );
    Ok(config)
}

pub fn login_rate_limiter(config: &LoginLimiterConfig) -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    Governor::new(config)
}

/// POST /login
pub async fn login(
    auth: web::Data<AuthService>,
    settings: web::Data<RouteSettings>,
    body: JsonOrForm<Credentials>,
) -> HttpResponse {
    let creds = body_into_inner(body);

    match auth.login(&creds.username, &creds.password).await {
        Ok(issued) => HttpResponse::Found()
            .insert_header(("Location", HOME_PATH))
            .cookie(settings.cookies.session_cookie(issued.token))
            .finish(),
        Err(e) if e.is_user_facing() => {
            info!("Login failed: {}", e);
            redirect_to(LOGIN_PATH)
        }
        Err(e) => error_response(&e),
    }
}

/// POST /signup
pub async fn signup(
    auth: web::Data<AuthService>,
    settings: web::Data<RouteSettings>,
    body: JsonOrForm<Credentials>,
) -> HttpResponse {
    let creds = body_into_inner(body);

    match auth.signup(&creds.username, &creds.password).await {
        Ok(issued) => HttpResponse::Found()
            .insert_header(("Location", HOME_PATH))
            .cookie(settings.cookies.session_cookie(issued.token))
            .finish(),
        Err(e) if e.is_user_facing() => {
            warn!("Signup rejected: {}", e);
            redirect_to(SIGNUP_PATH)
        }
        Err(e) => error_response(&e),
    }
}

/// GET /logout
pub async fn logout(
    session: Option<Session>,
    auth: web::Data<AuthService>,
    settings: web::Data<RouteSettings>,
) -> HttpResponse {
    auth.logout(session.as_ref());

    HttpResponse::Ok()
        .cookie(settings.cookies.expired_session_cookie())
        .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(super::pages::LOGOUT_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rate_limit_config_rejects_zero() {
        assert!(login_rate_limit_config(0, 1).is_err());
        assert!(login_rate_limit_config(5, 0).is_err());
        assert!(login_rate_limit_config(5, 1).is_ok());
    }
}
