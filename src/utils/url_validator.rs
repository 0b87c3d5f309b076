//! URL 验证模块
//!
//! 只接受带 host 的绝对 http(s) URL，阻止危险协议

use url::Url;

/// 允许缩短的 URL 最大长度
pub const MAX_URL_LENGTH: usize = 2048;

/// URL 验证错误
#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    TooLong(usize),
    InvalidProtocol(String),
    DangerousProtocol(String),
    MissingHost,
    ControlCharacter,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::TooLong(len) => write!(
                f,
                "URL is {} characters long, maximum is {}",
                len, MAX_URL_LENGTH
            ),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::MissingHost => write!(f, "URL has no host"),
            Self::ControlCharacter => write!(f, "URL contains control characters"),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// 验证 URL 是否可以缩短
///
/// 检查项目：
/// 1. URL 不为空且不超长
/// 2. 不是危险协议（javascript:, data:, file: 等）
/// 3. 必须是 http:// 或 https://
/// 4. 首尾空白之外不含控制字符
/// 5. URL 格式有效且包含 host
///
/// 返回解析后的 `Url`，存储和跳转都使用它的规范化形式（纯 ASCII）。
pub fn validate_url(url: &str) -> Result<Url, UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    if url.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong(url.len()));
    }

    // Url::parse 会静默丢掉 tab/换行，这里直接拒绝
    if url.chars().any(|c| c.is_control()) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url_lower = url.to_lowercase();

    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    if !url_lower.starts_with("http://") && !url_lower.starts_with("https://") {
        let proto = url_lower
            .split(':')
            .next()
            .filter(|s| !s.contains(' '))
            .map(|s| format!("{}:", s))
            .unwrap_or_default();
        return Err(UrlValidationError::InvalidProtocol(proto));
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// 获取 URL 验证错误的用户友好消息
pub fn validation_error_message(error: &UrlValidationError) -> &'static str {
    match error {
        UrlValidationError::EmptyUrl => "URL cannot be empty",
        UrlValidationError::TooLong(_) => "URL is too long",
        UrlValidationError::InvalidProtocol(_) => "URL must start with http:// or https://",
        UrlValidationError::DangerousProtocol(_) => "This URL protocol is not allowed",
        UrlValidationError::MissingHost => "URL must contain a host",
        UrlValidationError::ControlCharacter => "URL must not contain control characters",
        UrlValidationError::InvalidFormat(_) => "Invalid URL format",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_url("http://www.roflzoo.com/").is_ok());
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("https://example.com/path?query=1#frag").is_ok());
        assert!(validate_url("http://localhost:8080").is_ok());
        assert!(validate_url("  https://example.com  ").is_ok());
    }

    #[test]
    fn test_not_a_url() {
        assert!(matches!(
            validate_url("definitely not a valid url"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
    }

    #[test]
    fn test_dangerous_protocols() {
        assert!(matches!(
            validate_url("javascript:alert(1)"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
        assert!(matches!(
            validate_url("data:text/html,<script>alert(1)</script>"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
        assert!(matches!(
            validate_url("file:///etc/passwd"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
    }

    #[test]
    fn test_invalid_protocols() {
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
        assert!(matches!(
            validate_url("mailto:test@example.com"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
    }

    #[test]
    fn test_missing_host() {
        assert!(validate_url("http://").is_err());
    }

    #[test]
    fn test_empty_and_too_long() {
        assert!(matches!(validate_url(""), Err(UrlValidationError::EmptyUrl)));
        assert!(matches!(
            validate_url("   "),
            Err(UrlValidationError::EmptyUrl)
        ));
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate_url(&long),
            Err(UrlValidationError::TooLong(_))
        ));
    }

    #[test]
    fn test_control_characters_rejected() {
        for url in [
            "http://www.roflzoo.com/a\nb",
            "http://www.roflzoo.com/a\tb",
            "http://www.roflzoo.com/a\rb",
            "http://www.roflzoo.com/\u{7f}",
        ] {
            assert!(
                matches!(validate_url(url), Err(UrlValidationError::ControlCharacter)),
                "{:?}",
                url
            );
        }
        // 首尾空白照常去掉
        assert!(validate_url("\thttp://www.roflzoo.com/\n").is_ok());
    }

    #[test]
    fn test_returns_normalized_url() {
        let parsed = validate_url("HTTP://WWW.Roflzoo.com").unwrap();
        assert_eq!(parsed.as_str(), "http://www.roflzoo.com/");

        let parsed = validate_url("https://example.com/caf\u{e9} bar").unwrap();
        assert_eq!(parsed.as_str(), "https://example.com/caf%C3%A9%20bar");
        assert!(parsed.as_str().is_ascii());
    }

    #[test]
    fn test_case_insensitive_scheme() {
        assert!(validate_url("HTTP://example.com").is_ok());
        assert!(matches!(
            validate_url("JAVASCRIPT:alert(1)"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
    }
}
