use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::{Link, NewLink, User};
use migration::entities::{link, user};

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        url: model.url,
        code: model.code,
        title: model.title,
        base_url: model.base_url,
        visits: model.visits.max(0) as u64,
        created_at: model.created_at,
    }
}

/// 将 NewLink 转换为 ActiveModel（id 由数据库分配，visits 从 0 开始）
pub fn new_link_to_active_model(
    link: &NewLink,
    created_at: chrono::DateTime<chrono::Utc>,
) -> link::ActiveModel {
    link::ActiveModel {
        id: NotSet,
        url: Set(link.url.clone()),
        code: Set(link.code.clone()),
        title: Set(link.title.clone()),
        base_url: Set(link.base_url.clone()),
        visits: Set(0),
        created_at: Set(created_at),
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password,
        created_at: model.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    fn create_test_model() -> link::Model {
        link::Model {
            id: 3,
            url: "http://www.roflzoo.com/".to_string(),
            code: "abc123".to_string(),
            title: "Funny animals".to_string(),
            base_url: "http://127.0.0.1:4568".to_string(),
            visits: 42,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_link_basic() {
        let model = create_test_model();
        let link = model_to_link(model.clone());

        assert_eq!(link.id, model.id);
        assert_eq!(link.url, model.url);
        assert_eq!(link.code, model.code);
        assert_eq!(link.title, model.title);
        assert_eq!(link.visits, 42);
        assert_eq!(link.created_at, model.created_at);
    }

    #[test]
    fn test_model_to_link_negative_visits_clamped() {
        let mut model = create_test_model();
        model.visits = -5;
        assert_eq!(model_to_link(model).visits, 0);
    }

    #[test]
    fn test_new_link_to_active_model() {
        let new_link = NewLink {
            url: "https://example.com".to_string(),
            code: "xyz789".to_string(),
            title: String::new(),
            base_url: "http://short.ly".to_string(),
        };
        let now = Utc::now();
        let active = new_link_to_active_model(&new_link, now);

        assert!(matches!(active.id, ActiveValue::NotSet));
        assert!(matches!(active.visits, ActiveValue::Set(0)));
        if let ActiveValue::Set(url) = active.url {
            assert_eq!(url, "https://example.com");
        }
        if let ActiveValue::Set(code) = active.code {
            assert_eq!(code, "xyz789");
        }
        if let ActiveValue::Set(title) = active.title {
            assert!(title.is_empty());
        }
        if let ActiveValue::Set(created_at) = active.created_at {
            assert_eq!(created_at, now);
        }
    }

    #[test]
    fn test_model_to_user_keeps_hash() {
        let model = user::Model {
            id: 1,
            username: "Phillip".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$salt$hash".to_string(),
            created_at: Utc::now(),
        };
        let user = model_to_user(model);
        assert_eq!(user.username, "Phillip");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }
}
