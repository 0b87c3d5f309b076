//! 会话令牌
//!
//! 会话是签名 cookie 中的 HS256 JWT，服务端不保存会话状态。

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AuthConfig;
use crate::errors::{Result, ShortlyError};
use crate::storage::User;

const SESSION_TOKEN_TYPE: &str = "session";

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 用户名
    pub sub: String,
    pub uid: i32,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

/// 已认证的会话，由中间件放入请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
}

/// 签发与校验会话令牌
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_minutes: u64,
}

impl SessionService {
    pub fn new(secret: &str, session_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_minutes,
        }
    }

    /// 从配置创建；未配置密钥时随机生成，重启后旧会话全部失效
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = if config.session_secret.is_empty() {
            warn!("Session secret not configured, generating a random one; sessions will not survive restarts");
            crate::utils::generate_secure_token(48)
        } else {
            config.session_secret.clone()
        };

        Self::new(&secret, config.session_minutes)
    }

    /// 会话有效期（分钟），也用作 cookie 的 Max-Age
    pub fn session_minutes(&self) -> u64 {
        self.session_minutes
    }

    /// 为用户签发会话令牌
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.username.clone(),
            uid: user.id,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.session_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// 校验令牌，返回其中的会话
    pub fn validate(&self, token: &str) -> Result<Session> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.token_type != SESSION_TOKEN_TYPE {
            return Err(ShortlyError::session_token(format!(
                "unexpected token type: {}",
                token_data.claims.token_type
            )));
        }

        Ok(Session {
            user_id: token_data.claims.uid,
            username: token_data.claims.sub,
        })
    }
}
