/// HTTP middleware utilities for forum-service
///
/// Provides the `Actor` extractor that authenticates mutating requests and a
/// request-timing middleware feeding Prometheus.
pub mod permissions;

pub use permissions::*;

use crate::auth_client::{Credentials, SharedAuthenticator};
use crate::error::AppError;
use crate::metrics::REQUEST_DURATION_SECONDS;
use crate::models::Actor;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

// =====================================================================
// Authentication
// =====================================================================

/// Resolve the actor for `req`, or `None` when unauthenticated.
pub async fn resolve_actor(
    authenticator: &SharedAuthenticator,
    req: &HttpRequest,
) -> Result<Option<Actor>, AppError> {
    let credentials = Credentials::from_request(req);
    authenticator.authenticate(&credentials).await
}

/// Handlers taking an `Actor` argument require authentication; a request the
/// authenticator rejects never reaches the handler body.
impl FromRequest for Actor {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let authenticator = req.app_data::<web::Data<SharedAuthenticator>>().cloned();
        let credentials = Credentials::from_request(req);

        Box::pin(async move {
            let authenticator = authenticator
                .ok_or_else(|| AppError::Internal("authenticator not configured".to_string()))?;

            match authenticator.authenticate(&credentials).await? {
                Some(actor) => Ok(actor),
                None => Err(AppError::Unauthorized("authentication required".to_string()).into()),
            }
        })
    }
}

// =====================================================================
// Metrics middleware
// =====================================================================

pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
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
        let path = req.path().to_string();
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let res = service.call(req).await;
            let elapsed = start.elapsed();
            REQUEST_DURATION_SECONDS
                .with_label_values(&[method.as_str()])
                .observe(elapsed.as_secs_f64());
            tracing::debug!(%method, %path, elapsed_ms = elapsed.as_millis() as u64, "request completed");
            res
        })
    }
}
