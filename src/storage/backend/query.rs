//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::converters::{model_to_link, model_to_user};
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, ShortlyError};
use crate::storage::{Link, User};

use migration::entities::{link, user};

impl SeaOrmStorage {
    /// 按短码查询链接
    pub async fn get_link(&self, code: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_link({})", code), self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Code.eq(code))
                .one(db)
                .await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("查询短链接失败: {}", e)))?;

        Ok(model.map(model_to_link))
    }

    /// 按原始 URL 精确查询链接
    pub async fn find_link_by_url(&self, url: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = retry::with_retry("find_link_by_url", self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Url.eq(url))
                .one(db)
                .await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("按 URL 查询链接失败: {}", e)))?;

        Ok(model.map(model_to_link))
    }

    /// 短码是否已被占用
    pub async fn code_exists(&self, code: &str) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry(&format!("code_exists({})", code), self.retry_config, || async {
            link::Entity::find()
                .filter(link::Column::Code.eq(code))
                .count(db)
                .await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("检查短码失败: {}", e)))?;

        Ok(count > 0)
    }

    /// 全部链接，最新的在前
    pub async fn list_links(&self) -> Result<Vec<Link>> {
        let db = &self.db;

        let models = retry::with_retry("list_links", self.retry_config, || async {
            link::Entity::find()
                .order_by_desc(link::Column::CreatedAt)
                .order_by_desc(link::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("加载链接列表失败: {}", e)))?;

        debug!("Loaded {} links", models.len());
        Ok(models.into_iter().map(model_to_link).collect())
    }

    pub async fn count_links(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count_links", self.retry_config, || async {
            link::Entity::find().count(db).await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("统计链接失败: {}", e)))
    }

    /// 按用户名查询用户
    pub async fn find_user(&self, username: &str) -> Result<Option<User>> {
        let db = &self.db;

        let model = retry::with_retry("find_user", self.retry_config, || async {
            user::Entity::find()
                .filter(user::Column::Username.eq(username))
                .one(db)
                .await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("查询用户失败: {}", e)))?;

        Ok(model.map(model_to_user))
    }

    pub async fn count_users(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count_users", self.retry_config, || async {
            user::Entity::find().count(db).await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("统计用户失败: {}", e)))
    }
}
