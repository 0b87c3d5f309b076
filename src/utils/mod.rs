pub mod password;
pub mod url_validator;

/// 短码字符集
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 短码最大长度
pub const MAX_CODE_LENGTH: usize = 64;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_CHARSET[rand::random_range(0..CODE_CHARSET.len())] as char)
        .take(length)
        .collect()
}

/// 与固定路由同名的路径段，`/{code}` 永远匹配不到它们
const RESERVED_CODES: &[&str] = &["create", "links", "login", "logout", "signup"];

/// 短码是否会被固定路由遮住（区分大小写，和路由匹配一致）
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// 生成 URL 安全的随机 token（用于未配置会话密钥时）
pub fn generate_secure_token(length: usize) -> String {
    generate_random_code(length)
}

/// 检查短码格式：1..=64 个 ASCII 字母或数字
///
/// 路由层在查库之前先用它过滤掉明显不可能存在的路径。
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code_length() {
        assert_eq!(generate_random_code(6).len(), 6);
        assert_eq!(generate_random_code(0).len(), 0);
    }

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..100 {
            assert!(is_valid_short_code(&generate_random_code(6)));
        }
    }

    #[test]
    fn test_reserved_codes() {
        for code in ["create", "links", "login", "logout", "signup"] {
            assert!(is_reserved_code(code), "{}", code);
        }
        assert!(!is_reserved_code("Login"));
        assert!(!is_reserved_code("abc123"));
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("abc123"));
        assert!(is_valid_short_code("Z"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("with-dash"));
        assert!(!is_valid_short_code("favicon.ico"));
        assert!(!is_valid_short_code(&"a".repeat(65)));
    }
}
