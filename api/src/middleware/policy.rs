//! Route access policy and the middleware that enforces it.
//!
//! Runs after the request gate. Decides from the path and the resolved
//! identity whether the request may proceed, needs authentication, or is
//! forbidden.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::info;

use tg_core::domain::entities::identity::Identity;

use crate::handlers::error::ApiError;

/// Outcome of an access decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Permit,
    /// Authentication is required (401)
    Challenge,
    /// Authenticated but not allowed (403)
    Forbid,
}

/// Downstream authorization decision
pub trait AccessPolicy: Send + Sync {
    fn decide(&self, path: &str, identity: Option<&Identity>) -> AccessDecision;
}

/// What a route requires of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    PermitAll,
    Authenticated,
    /// Authenticated and holding at least one of the roles
    AnyRole(Vec<String>),
}

impl Requirement {
    fn evaluate(&self, identity: Option<&Identity>) -> AccessDecision {
        match (self, identity) {
            (Requirement::PermitAll, _) => AccessDecision::Permit,
            (_, None) => AccessDecision::Challenge,
            (Requirement::Authenticated, Some(_)) => AccessDecision::Permit,
            (Requirement::AnyRole(roles), Some(identity)) => {
                if identity.has_any_role(roles.as_slice()) {
                    AccessDecision::Permit
                } else {
                    AccessDecision::Forbid
                }
            }
        }
    }
}

/// Path pattern: an exact path, or a prefix written as `/prefix/**`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Prefix(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(prefix) => PathPattern::Prefix(prefix.to_string()),
            None => PathPattern::Exact(pattern.to_string()),
        }
    }

    /// `/api/auth/**` matches `/api/auth` and everything below it
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(exact) => path == exact,
            PathPattern::Prefix(prefix) => match path.strip_prefix(prefix.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}

/// Ordered rule table; the first matching rule wins
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    rules: Vec<(PathPattern, Requirement)>,
    default: Requirement,
}

impl Default for RoutePolicy {
    /// Auth endpoints and the health probe are open, everything else needs a login
    fn default() -> Self {
        Self::new(Requirement::Authenticated)
            .permit_all("/api/auth/**")
            .permit_all("/health")
    }
}

impl RoutePolicy {
    /// Empty table falling back to `default`
    pub fn new(default: Requirement) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    pub fn rule(mut self, pattern: &str, requirement: Requirement) -> Self {
        self.rules.push((PathPattern::parse(pattern), requirement));
        self
    }

    pub fn permit_all(self, pattern: &str) -> Self {
        self.rule(pattern, Requirement::PermitAll)
    }

    pub fn authenticated(self, pattern: &str) -> Self {
        self.rule(pattern, Requirement::Authenticated)
    }

    pub fn any_role(self, pattern: &str, roles: &[&str]) -> Self {
        let roles = roles.iter().map(|role| role.to_string()).collect();
        self.rule(pattern, Requirement::AnyRole(roles))
    }

    /// Requirement applying to `path`
    pub fn requirement_for(&self, path: &str) -> &Requirement {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map(|(_, requirement)| requirement)
            .unwrap_or(&self.default)
    }
}

impl AccessPolicy for RoutePolicy {
    fn decide(&self, path: &str, identity: Option<&Identity>) -> AccessDecision {
        self.requirement_for(path).evaluate(identity)
    }
}

/// Access guard middleware factory
#[derive(Clone)]
pub struct AccessGuard {
    policy: Arc<dyn AccessPolicy>,
}

impl AccessGuard {
    pub fn new(policy: Arc<dyn AccessPolicy>) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardMiddleware {
            service: Rc::new(service),
            policy: Arc::clone(&self.policy),
        }))
    }
}

/// Access guard middleware service
pub struct AccessGuardMiddleware<S> {
    service: Rc<S>,
    policy: Arc<dyn AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AccessGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let decision = {
            let extensions = req.extensions();
            self.policy.decide(req.path(), extensions.get::<Identity>())
        };

        let rejection = match decision {
            AccessDecision::Permit => {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
            }
            AccessDecision::Challenge => {
                info!(path = %req.path(), "Challenged unauthenticated request");
                ApiError::authentication_required().error_response()
            }
            AccessDecision::Forbid => {
                info!(path = %req.path(), "Denied request lacking role");
                ApiError::access_denied().error_response()
            }
        };

        let response = req.into_response(rejection).map_into_right_body();
        Box::pin(ready(Ok(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> Identity {
        Identity::new("alice", roles.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn test_prefix_pattern_matching() {
        let pattern = PathPattern::parse("/api/auth/**");

        assert!(pattern.matches("/api/auth"));
        assert!(pattern.matches("/api/auth/login"));
        assert!(pattern.matches("/api/auth/a/b"));
        assert!(!pattern.matches("/api/authx"));
        assert!(!pattern.matches("/api/test/hello"));
    }

    #[test]
    fn test_default_table() {
        let policy = RoutePolicy::default();

        assert_eq!(policy.decide("/api/auth/login", None), AccessDecision::Permit);
        assert_eq!(policy.decide("/health", None), AccessDecision::Permit);
        assert_eq!(policy.decide("/api/test/hello", None), AccessDecision::Challenge);
        assert_eq!(
            policy.decide("/api/test/hello", Some(&user(&[]))),
            AccessDecision::Permit
        );
    }

    #[test]
    fn test_role_rule_and_first_match_wins() {
        let policy = RoutePolicy::new(Requirement::Authenticated)
            .permit_all("/api/admin/status")
            .any_role("/api/admin/**", &["admin"]);

        assert_eq!(policy.decide("/api/admin/status", None), AccessDecision::Permit);
        assert_eq!(policy.decide("/api/admin/users", None), AccessDecision::Challenge);
        assert_eq!(
            policy.decide("/api/admin/users", Some(&user(&["user"]))),
            AccessDecision::Forbid
        );
        assert_eq!(
            policy.decide("/api/admin/users", Some(&user(&["user", "admin"]))),
            AccessDecision::Permit
        );
    }

    #[test]
    fn test_permit_all_default() {
        let policy = RoutePolicy::new(Requirement::PermitAll).authenticated("/private");

        assert_eq!(policy.decide("/anything", None), AccessDecision::Permit);
        assert_eq!(policy.decide("/private", None), AccessDecision::Challenge);
    }
}
