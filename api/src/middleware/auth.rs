//! Request gate: resolves the bearer token of every request to an identity.
//!
//! The gate never rejects a request. When the token is missing or fails any
//! check the request continues without an identity, and the access guard
//! further down decides whether that is acceptable for the route.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::{debug, trace};

use tg_core::{
    domain::entities::identity::Identity,
    errors::TokenError,
    repositories::RevocationStore,
    services::token::TokenService,
};

use crate::handlers::error::ApiError;

/// Trait for wrapping TokenService to allow dynamic dispatch
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Resolves an `Authorization` header value to an identity
    async fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, TokenError>;
}

#[async_trait]
impl<S: RevocationStore> SessionVerifier for TokenService<S> {
    async fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, TokenError> {
        TokenService::authenticate(self, authorization).await
    }
}

/// Request gate middleware factory
#[derive(Clone)]
pub struct RequestGate {
    verifier: Arc<dyn SessionVerifier>,
}

impl RequestGate {
    pub fn new(verifier: Arc<dyn SessionVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestGateMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Request gate middleware service
pub struct RequestGateMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn SessionVerifier>,
}

impl<S, B> Service<ServiceRequest> for RequestGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let authorization = authorization_header(&req);

            match verifier.authenticate(authorization.as_deref()).await {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                }
                Err(TokenError::NoCredential) => {
                    trace!(path = %req.path(), "No bearer credential");
                }
                Err(e) => {
                    debug!(path = %req.path(), reason = e.kind(), "Continuing unauthenticated");
                }
            }

            service.call(req).await
        })
    }
}

/// Raw `Authorization` header value; a non-UTF-8 value counts as absent
fn authorization_header(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .map(str::to_owned)
}

/// Request-scoped authentication context
///
/// Always extracts; holds the identity when the gate resolved one.
#[derive(Debug, Clone, Default)]
pub struct AuthContext(pub Option<Identity>);

impl AuthContext {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(AuthContext(req.extensions().get::<Identity>().cloned())))
    }
}

/// Extractor for required authentication
///
/// Fails with a 401 envelope when the request carries no identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<Identity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(ApiError::authentication_required);

        ready(result)
    }
}
