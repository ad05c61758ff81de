/// HTTP middleware for posts-service
///
/// `JwtAuthMiddleware` resolves the acting user from a bearer token. It never
/// rejects a request: a missing, malformed or expired token leaves the request
/// anonymous. Handlers decide whether identity is required by extracting
/// `UserId` (401 when absent) or `Option<UserId>`.
use crate::error::AppError;
use crate::security::TokenKeys;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Authenticated user identifier stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates `Authorization: Bearer <token>` against the shared `TokenKeys`.
///
/// - valid token: `UserId` inserted into extensions
/// - no header, wrong scheme, bad signature, expired: request continues without identity
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_string);

            let Some(token) = token else {
                return service.call(req).await;
            };

            let keys = req
                .app_data::<web::Data<TokenKeys>>()
                .ok_or_else(|| AppError::Internal("token keys not configured".into()))?;

            match keys.validate(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(UserId(claims.sub));
                }
                Err(e) => {
                    // stale tokens still read public routes; `UserId` extraction fails later
                    tracing::debug!(error = %e, "bearer token rejected, continuing anonymously");
                }
            }

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .cloned()
                .ok_or_else(|| AppError::Unauthorized("Unauthenticated".into())),
        )
    }
}
