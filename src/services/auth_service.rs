//! Auth service
//!
//! Signup and login against the `users` table. Successful calls hand back a
//! signed session token for the route layer to put in a cookie.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::errors::{Result, ShortlyError};
use crate::services::session::{Session, SessionService};
use crate::storage::{SeaOrmStorage, User, UserInsertOutcome};
use crate::utils::password::{hash_password, verify_password};

/// 用户名最大长度（与 users.username 列宽一致）
pub const MAX_USERNAME_LENGTH: usize = 64;
/// 密码最大长度，避免超长输入拖慢 Argon2
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// Login/signup result
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

pub struct AuthService {
    storage: Arc<SeaOrmStorage>,
    sessions: Arc<SessionService>,
}

impl AuthService {
    pub fn new(storage: Arc<SeaOrmStorage>, sessions: Arc<SessionService>) -> Self {
        Self { storage, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionService> {
        &self.sessions
    }

    /// Create a user and log them in.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, username: &str, password: &str) -> Result<IssuedSession> {
        let username = validate_credentials(username, password)?;

        if self.storage.find_user(username).await?.is_some() {
            return Err(ShortlyError::duplicate_user(format!(
                "Username already taken: {}",
                username
            )));
        }

        let password_hash = hash_blocking(password.to_string()).await?;

        let user = match self.storage.insert_user(username, &password_hash).await? {
            UserInsertOutcome::Inserted(user) => user,
            UserInsertOutcome::UsernameTaken => {
                return Err(ShortlyError::duplicate_user(format!(
                    "Username already taken: {}",
                    username
                )));
            }
        };

        info!("User signed up: {}", user.username);
        self.issue(&user)
    }

    /// Check credentials and start a session.
    ///
    /// Unknown users and wrong passwords both fail with `AuthFailed`.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ShortlyError::auth_failed("Invalid username or password"));
        }

        let Some(user) = self.storage.find_user(username).await? else {
            warn!("Login attempt for unknown user: {}", username);
            return Err(ShortlyError::auth_failed("Invalid username or password"));
        };

        if !verify_blocking(password.to_string(), user.password_hash.clone()).await? {
            warn!("Wrong password for user: {}", username);
            return Err(ShortlyError::auth_failed("Invalid username or password"));
        }

        info!("User logged in: {}", user.username);
        self.issue(&user)
    }

    /// Sessions live only in the client cookie; the route clears it.
    pub fn logout(&self, session: Option<&Session>) {
        match session {
            Some(session) => info!("User logged out: {}", session.username),
            None => info!("Logout without an active session"),
        }
    }

    fn issue(&self, user: &User) -> Result<IssuedSession> {
        let token = self.sessions.issue(user)?;
        Ok(IssuedSession {
            session: Session {
                user_id: user.id,
                username: user.username.clone(),
            },
            token,
        })
    }
}

/// 校验注册凭据，返回去掉首尾空白的用户名
fn validate_credentials<'a>(username: &'a str, password: &str) -> Result<&'a str> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ShortlyError::validation("Username cannot be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ShortlyError::validation(format!(
            "Username is longer than {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if password.is_empty() {
        return Err(ShortlyError::validation("Password cannot be empty"));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ShortlyError::validation("Password is too long"));
    }

    Ok(username)
}

// Argon2 是 CPU 密集操作，放到阻塞线程池
async fn hash_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ShortlyError::password_hash(e.to_string()))?
        .map_err(ShortlyError::from)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ShortlyError::password_hash(e.to_string()))?
        .map_err(ShortlyError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials_trims_username() {
        assert_eq!(validate_credentials("  Phillip ", "pw").unwrap(), "Phillip");
    }

    #[test]
    fn test_validate_credentials_rejects_empty() {
        assert!(matches!(
            validate_credentials("   ", "pw"),
            Err(ShortlyError::Validation(_))
        ));
        assert!(matches!(
            validate_credentials("Phillip", ""),
            Err(ShortlyError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_credentials_rejects_long_username() {
        let name = "x".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(validate_credentials(&name, "pw").is_err());
        let name = "x".repeat(MAX_USERNAME_LENGTH);
        assert!(validate_credentials(&name, "pw").is_ok());
    }
}
