//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ExprTrait, QueryFilter, SqlErr,
    sea_query::Expr,
};
use tracing::{debug, info};

use super::converters::{model_to_link, model_to_user, new_link_to_active_model};
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, ShortlyError};
use crate::storage::{LinkInsertOutcome, NewLink, UserInsertOutcome};

use migration::entities::{link, user};

/// 提取唯一约束冲突的数据库消息
///
/// SQLite 报 `links.code`，MySQL/PostgreSQL 报索引名 `idx_links_code`
fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => Some(msg),
        _ => None,
    }
}

impl SeaOrmStorage {
    /// 插入新链接
    ///
    /// `url` 或 `code` 撞上唯一索引时返回对应的冲突结果而不是错误
    pub async fn insert_link(&self, new_link: &NewLink) -> Result<LinkInsertOutcome> {
        let db = &self.db;
        let created_at = Utc::now();

        let result = retry::with_retry(
            &format!("insert_link({})", new_link.code),
            self.retry_config,
            || async { new_link_to_active_model(new_link, created_at).insert(db).await },
        )
        .await;

        match result {
            Ok(model) => {
                info!("Short link created: {} -> {}", model.code, model.url);
                Ok(LinkInsertOutcome::Inserted(model_to_link(model)))
            }
            Err(e) => match unique_violation(&e) {
                Some(msg) if msg.contains("code") => {
                    debug!("Code collision on insert: {}", new_link.code);
                    Ok(LinkInsertOutcome::CodeTaken)
                }
                Some(_) => {
                    debug!("URL already stored by a concurrent insert: {}", new_link.url);
                    Ok(LinkInsertOutcome::UrlTaken)
                }
                None => Err(ShortlyError::database_operation(format!(
                    "创建短链接失败: {}",
                    e
                ))),
            },
        }
    }

    /// 原子地将访问次数加一，返回是否命中了记录
    pub async fn increment_visits(&self, code: &str) -> Result<bool> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("increment_visits({})", code),
            self.retry_config,
            || async {
                link::Entity::update_many()
                    .col_expr(link::Column::Visits, Expr::col(link::Column::Visits).add(1i64))
                    .filter(link::Column::Code.eq(code))
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| ShortlyError::database_operation(format!("更新访问次数失败: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove_link(&self, code: &str) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("remove_link({})", code), self.retry_config, || async {
            link::Entity::delete_many()
                .filter(link::Column::Code.eq(code))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("删除短链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(ShortlyError::not_found(format!("短链接不存在: {}", code)));
        }

        info!("Short link deleted: {}", code);
        Ok(())
    }

    /// 插入新用户，用户名已存在时返回 `UsernameTaken`
    pub async fn insert_user(&self, username: &str, password_hash: &str) -> Result<UserInsertOutcome> {
        use sea_orm::ActiveValue::{NotSet, Set};

        let db = &self.db;
        let created_at = Utc::now();

        let result = retry::with_retry("insert_user", self.retry_config, || async {
            user::ActiveModel {
                id: NotSet,
                username: Set(username.to_string()),
                password: Set(password_hash.to_string()),
                created_at: Set(created_at),
            }
            .insert(db)
            .await
        })
        .await;

        match result {
            Ok(model) => {
                info!("User created: {}", model.username);
                Ok(UserInsertOutcome::Inserted(model_to_user(model)))
            }
            Err(e) if unique_violation(&e).is_some() => Ok(UserInsertOutcome::UsernameTaken),
            Err(e) => Err(ShortlyError::database_operation(format!(
                "创建用户失败: {}",
                e
            ))),
        }
    }

    pub async fn remove_user(&self, username: &str) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry("remove_user", self.retry_config, || async {
            user::Entity::delete_many()
                .filter(user::Column::Username.eq(username))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| ShortlyError::database_operation(format!("删除用户失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(ShortlyError::not_found(format!("用户不存在: {}", username)));
        }

        info!("User deleted: {}", username);
        Ok(())
    }
}
