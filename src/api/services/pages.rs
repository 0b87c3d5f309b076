//! Static HTML shells
//!
//! The pages carry no server-side state; `/` and `/create` fetch data from
//! `/links` in the browser.

use actix_web::HttpResponse;
use actix_web::http::header::CONTENT_TYPE;

use crate::services::Session;

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const CREATE_HTML: &str = include_str!("../../../static/create.html");
const LOGIN_HTML: &str = include_str!("../../../static/login.html");
const SIGNUP_HTML: &str = include_str!("../../../static/signup.html");
pub(super) const LOGOUT_HTML: &str = include_str!("../../../static/logout.html");

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(body)
}

/// GET /（需要登录）
pub async fn index(_session: Session) -> HttpResponse {
    html(INDEX_HTML)
}

/// GET /create（需要登录）
pub async fn create(_session: Session) -> HttpResponse {
    html(CREATE_HTML)
}

pub async fn login() -> HttpResponse {
    html(LOGIN_HTML)
}

pub async fn signup() -> HttpResponse {
    html(SIGNUP_HTML)
}
