//! Session guard
//!
//! `RequireSession` wraps routes that need a logged-in user. A valid session
//! cookie puts the `Session` into request extensions; anything else is
//! redirected to the login page.

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::ErrorUnauthorized,
    http::header::LOCATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error, trace};

use crate::api::constants::{LOGIN_PATH, SESSION_COOKIE_NAME};
use crate::services::{Session, SessionService};

/// Session guard middleware factory
#[derive(Clone, Copy, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn redirect_to_login(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        debug!("No valid session for {}, redirecting to login", req.path());
        req.into_response(
            HttpResponse::Found()
                .insert_header((LOCATION, LOGIN_PATH))
                .finish()
                .map_into_right_body(),
        )
    }

    fn missing_session_service(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        error!("SessionService not registered as app data");
        req.into_response(
            HttpResponse::InternalServerError()
                .finish()
                .map_into_right_body(),
        )
    }
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let Some(sessions) = req.app_data::<web::Data<SessionService>>().cloned() else {
                return Ok(Self::missing_session_service(req));
            };

            let session = req
                .cookie(SESSION_COOKIE_NAME)
                .and_then(|cookie| match sessions.validate(cookie.value()) {
                    Ok(session) => Some(session),
                    Err(e) => {
                        debug!("Session cookie rejected: {}", e);
                        None
                    }
                });

            match session {
                Some(session) => {
                    trace!("Session accepted for {}", session.username);
                    req.extensions_mut().insert(session);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                None => Ok(Self::redirect_to_login(req)),
            }
        })
    }
}

/// 读取当前请求的会话：优先取中间件放入的扩展，否则直接校验 cookie
pub fn session_from_request(req: &HttpRequest) -> Option<Session> {
    if let Some(session) = req.extensions().get::<Session>() {
        return Some(session.clone());
    }

    let sessions = req.app_data::<web::Data<SessionService>>()?;
    let cookie = req.cookie(SESSION_COOKIE_NAME)?;
    sessions.validate(cookie.value()).ok()
}

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(session_from_request(req).ok_or_else(|| ErrorUnauthorized("Not logged in")))
    }
}
