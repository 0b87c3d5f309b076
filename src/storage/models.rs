use serde::{Deserialize, Serialize};

/// 短链接
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub id: i32,
    pub url: String,
    pub code: String,
    /// 创建时抓取的页面标题，抓取失败为空字符串
    #[serde(default)]
    pub title: String,
    pub base_url: String,
    #[serde(default)]
    pub visits: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Link {
    /// 可分享的完整短链接 `{base_url}/{code}`
    pub fn short_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.code)
    }
}

/// 待插入的链接，visits 固定从 0 开始
#[derive(Debug, Clone)]
pub struct NewLink {
    pub url: String,
    pub code: String,
    pub title: String,
    pub base_url: String,
}

/// 用户
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 插入链接的结果
///
/// 唯一索引冲突不是错误，由服务层决定重读还是换码重试
#[derive(Debug)]
pub enum LinkInsertOutcome {
    Inserted(Link),
    UrlTaken,
    CodeTaken,
}

/// 插入用户的结果
#[derive(Debug)]
pub enum UserInsertOutcome {
    Inserted(User),
    UsernameTaken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_joins_base_and_code() {
        let link = Link {
            id: 1,
            url: "http://www.roflzoo.com/".to_string(),
            code: "aB3dE9".to_string(),
            title: String::new(),
            base_url: "http://127.0.0.1:4568/".to_string(),
            visits: 0,
            created_at: chrono::Utc::now(),
        };
        assert_eq!(link.short_url(), "http://127.0.0.1:4568/aB3dE9");
    }

    #[test]
    fn test_link_serializes_expected_fields() {
        let link = Link {
            id: 7,
            url: "https://example.com".to_string(),
            code: "xyz".to_string(),
            title: "Example".to_string(),
            base_url: "http://short.ly".to_string(),
            visits: 3,
            created_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["code"], "xyz");
        assert_eq!(value["visits"], 3);
    }
}
