use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum ShortlyError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    InvalidUrl(String),
    NotFound(String),
    DuplicateUser(String),
    AuthFailed(String),
    SessionToken(String),
    PasswordHash(String),
    Serialization(String),
}

impl ShortlyError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortlyError::DatabaseConfig(_) => "E001",
            ShortlyError::DatabaseConnection(_) => "E002",
            ShortlyError::DatabaseOperation(_) => "E003",
            ShortlyError::FileOperation(_) => "E004",
            ShortlyError::Validation(_) => "E005",
            ShortlyError::InvalidUrl(_) => "E006",
            ShortlyError::NotFound(_) => "E007",
            ShortlyError::DuplicateUser(_) => "E008",
            ShortlyError::AuthFailed(_) => "E009",
            ShortlyError::SessionToken(_) => "E010",
            ShortlyError::PasswordHash(_) => "E011",
            ShortlyError::Serialization(_) => "E012",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortlyError::DatabaseConfig(_) => "Database Configuration Error",
            ShortlyError::DatabaseConnection(_) => "Database Connection Error",
            ShortlyError::DatabaseOperation(_) => "Database Operation Error",
            ShortlyError::FileOperation(_) => "File Operation Error",
            ShortlyError::Validation(_) => "Validation Error",
            ShortlyError::InvalidUrl(_) => "Invalid URL",
            ShortlyError::NotFound(_) => "Resource Not Found",
            ShortlyError::DuplicateUser(_) => "Duplicate User",
            ShortlyError::AuthFailed(_) => "Authentication Failed",
            ShortlyError::SessionToken(_) => "Session Token Error",
            ShortlyError::PasswordHash(_) => "Password Hash Error",
            ShortlyError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortlyError::DatabaseConfig(msg)
            | ShortlyError::DatabaseConnection(msg)
            | ShortlyError::DatabaseOperation(msg)
            | ShortlyError::FileOperation(msg)
            | ShortlyError::Validation(msg)
            | ShortlyError::InvalidUrl(msg)
            | ShortlyError::NotFound(msg)
            | ShortlyError::DuplicateUser(msg)
            | ShortlyError::AuthFailed(msg)
            | ShortlyError::SessionToken(msg)
            | ShortlyError::PasswordHash(msg)
            | ShortlyError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    ///
    /// 非法 URL 与未知短码一样返回 404。
    pub fn http_status(&self) -> StatusCode {
        match self {
            ShortlyError::InvalidUrl(_) | ShortlyError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortlyError::Validation(_) => StatusCode::BAD_REQUEST,
            ShortlyError::DuplicateUser(_) => StatusCode::CONFLICT,
            ShortlyError::AuthFailed(_) | ShortlyError::SessionToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            ShortlyError::DatabaseConfig(_)
            | ShortlyError::DatabaseConnection(_)
            | ShortlyError::DatabaseOperation(_)
            | ShortlyError::FileOperation(_)
            | ShortlyError::PasswordHash(_)
            | ShortlyError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否是可以直接展示给用户的错误
    pub fn is_user_facing(&self) -> bool {
        !self.http_status().is_server_error()
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortlyError {}

// 便捷的构造函数
impl ShortlyError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Validation(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        ShortlyError::InvalidUrl(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortlyError::NotFound(msg.into())
    }

    pub fn duplicate_user<T: Into<String>>(msg: T) -> Self {
        ShortlyError::DuplicateUser(msg.into())
    }

    pub fn auth_failed<T: Into<String>>(msg: T) -> Self {
        ShortlyError::AuthFailed(msg.into())
    }

    pub fn session_token<T: Into<String>>(msg: T) -> Self {
        ShortlyError::SessionToken(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        ShortlyError::PasswordHash(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortlyError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ShortlyError {
    fn from(err: sea_orm::DbErr) -> Self {
        ShortlyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ShortlyError {
    fn from(err: std::io::Error) -> Self {
        ShortlyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShortlyError {
    fn from(err: serde_json::Error) -> Self {
        ShortlyError::Serialization(err.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for ShortlyError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        ShortlyError::PasswordHash(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ShortlyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ShortlyError::SessionToken(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_maps_to_404() {
        let err = ShortlyError::invalid_url("definitely not a valid url");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_database_errors_are_not_user_facing() {
        let err = ShortlyError::database_operation("disk I/O error");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            ShortlyError::database_config(""),
            ShortlyError::database_connection(""),
            ShortlyError::database_operation(""),
            ShortlyError::file_operation(""),
            ShortlyError::validation(""),
            ShortlyError::invalid_url(""),
            ShortlyError::not_found(""),
            ShortlyError::duplicate_user(""),
            ShortlyError::auth_failed(""),
            ShortlyError::session_token(""),
            ShortlyError::password_hash(""),
            ShortlyError::serialization(""),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_format_simple() {
        let err = ShortlyError::duplicate_user("Phillip");
        assert_eq!(err.format_simple(), "Duplicate User: Phillip");
        assert_eq!(err.to_string(), "Duplicate User: Phillip");
    }

    #[test]
    fn test_from_db_err() {
        let err: ShortlyError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, ShortlyError::DatabaseOperation(ref m) if m.contains("boom")));
    }
}
