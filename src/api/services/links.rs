//! `/links` endpoints

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use super::RouteSettings;
use super::helpers::{JsonOrForm, body_into_inner, error_response, request_base_url};
use crate::services::{LinkService, Session};
use crate::storage::Link;

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// 缺失或不是字符串时为 `None`，按无效 URL 处理
    #[serde(default, deserialize_with = "url_or_none")]
    pub url: Option<String>,
}

fn url_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(url) => Some(url),
        _ => None,
    })
}

/// Link as returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub url: String,
    pub code: String,
    pub title: String,
    pub short_url: String,
    pub visits: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            short_url: link.short_url(),
            url: link.url,
            code: link.code,
            title: link.title,
            visits: link.visits,
            created_at: link.created_at,
        }
    }
}

/// POST /links
///
/// 不要求登录。同一个 URL 重复提交返回已有短码。
pub async fn create_link(
    req: HttpRequest,
    links: web::Data<LinkService>,
    settings: web::Data<RouteSettings>,
    body: JsonOrForm<CreateLinkRequest>,
) -> HttpResponse {
    let body = body_into_inner(body);
    let base_url = settings
        .base_url
        .clone()
        .unwrap_or_else(|| request_base_url(&req));
    let url = body.url.unwrap_or_default();

    match links.create_or_get_link(&url, &base_url).await {
        Ok(result) => {
            if result.created {
                info!("Link created: {} -> {}", result.link.code, result.link.url);
            } else {
                debug!("Existing link returned: {}", result.link.code);
            }
            HttpResponse::Ok().json(LinkResponse::from(result.link))
        }
        Err(e) => error_response(&e),
    }
}

/// GET /links（需要登录）
pub async fn list_links(session: Session, links: web::Data<LinkService>) -> HttpResponse {
    match links.list_links().await {
        Ok(all) => {
            debug!("Listing {} links for {}", all.len(), session.username);
            let body: Vec<LinkResponse> = all.into_iter().map(LinkResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(e) => error_response(&e),
    }
}
