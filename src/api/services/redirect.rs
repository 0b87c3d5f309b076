//! Short code redirects

use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::{HttpResponse, web};
use tracing::{debug, error, instrument};

use crate::errors::ShortlyError;
use crate::services::LinkService;

/// GET /{code}
#[instrument(skip_all, fields(code = %code))]
pub async fn handle_redirect(code: web::Path<String>, links: web::Data<LinkService>) -> HttpResponse {
    let code = code.into_inner();

    match links.resolve_code(&code).await {
        Ok(url) => {
            debug!("Redirecting {} -> {}", code, url);
            HttpResponse::Found()
                .insert_header((LOCATION, url))
                .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                .finish()
        }
        Err(ShortlyError::NotFound(_)) => not_found_response(),
        Err(e) => {
            error!("Redirect lookup failed for {}: {}", code, e);
            HttpResponse::InternalServerError()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body("Internal Server Error")
        }
    }
}

pub fn not_found_response() -> HttpResponse {
    HttpResponse::NotFound()
        .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
        .insert_header(("Cache-Control", "public, max-age=60"))
        .body("Not Found")
}
