//! Application state and factory
//!
//! This module holds the shared services and builds the Actix-web
//! application: tracing, request gate and access guard around the routes.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use tg_core::repositories::{AccountRepository, RevocationStore};
use tg_core::services::auth::{LoginService, PasswordEncoder};
use tg_core::services::token::TokenService;
use tg_shared::types::RestResponse;

use crate::middleware::auth::{RequestGate, SessionVerifier};
use crate::middleware::policy::{AccessGuard, AccessPolicy, RoutePolicy};
use crate::routes;

/// Revocation store chosen at startup
pub type SharedRevocationStore = Arc<dyn RevocationStore>;

/// Token service over the startup-selected store
pub type AppTokenService = TokenService<SharedRevocationStore>;

/// Login service over the startup-selected backends
pub type AppLoginService =
    LoginService<dyn AccountRepository, dyn PasswordEncoder, SharedRevocationStore>;

/// Application state that holds shared services
pub struct AppState {
    pub token_service: Arc<AppTokenService>,
    pub login_service: Arc<AppLoginService>,
    pub policy: Arc<dyn AccessPolicy>,
}

impl AppState {
    /// Wires the login service onto `token_service` with the default route policy
    pub fn new(
        token_service: Arc<AppTokenService>,
        accounts: Arc<dyn AccountRepository>,
        encoder: Arc<dyn PasswordEncoder>,
    ) -> Self {
        let login_service = Arc::new(LoginService::new(
            accounts,
            encoder,
            Arc::clone(&token_service),
        ));

        Self {
            token_service,
            login_service,
            policy: Arc::new(RoutePolicy::default()),
        }
    }

    /// Replaces the route policy
    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.policy = policy;
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let verifier: Arc<dyn SessionVerifier> = app_state.token_service.clone();
    let policy = Arc::clone(&app_state.policy);

    App::new()
        .app_data(app_state)
        // The last wrap runs first: tracing, then the gate, then the guard.
        .wrap(AccessGuard::new(policy))
        .wrap(RequestGate::new(verifier))
        .wrap(TracingLogger::default())
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(RestResponse::<()>::failure(404, "Not Found"))
}
