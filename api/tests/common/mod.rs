//! Shared fixtures for the HTTP tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header::AUTHORIZATION, test, web};
use async_trait::async_trait;
use serde_json::Value;

use tg_api::app::AppState;
use tg_api::bootstrap::{seed_accounts, AccountSeed};
use tg_core::errors::DomainError;
use tg_core::repositories::RevocationStore;
use tg_core::services::{Clock, ManualClock, TokenService, TokenServiceConfig};
use tg_infra::cache::MemoryRevocationStore;
use tg_infra::database::MemoryAccountRepository;
use tg_infra::security::BcryptPasswordEncoder;

pub const SECRET: &str = "http-test-secret";

/// In-memory revocation store that can be taken offline
pub struct SwitchableStore {
    inner: MemoryRevocationStore,
    available: AtomicBool,
}

impl SwitchableStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: MemoryRevocationStore::with_clock(clock),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::Internal {
                message: "store offline".to_string(),
            })
        }
    }
}

#[async_trait]
impl RevocationStore for SwitchableStore {
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), DomainError> {
        self.check()?;
        self.inner.revoke(token_id, ttl).await
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        self.check()?;
        self.inner.is_revoked(token_id).await
    }
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub clock: ManualClock,
    pub store: Arc<SwitchableStore>,
}

/// Builds state with two accounts: `lions` (admin) and `bob` (user)
pub async fn context() -> TestContext {
    context_with(|state| state).await
}

/// Like [`context`], letting the caller adjust the state before it is shared
pub async fn context_with(customize: impl FnOnce(AppState) -> AppState) -> TestContext {
    let clock = ManualClock::starting_now();
    let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());
    let store = Arc::new(SwitchableStore::new(Arc::clone(&shared_clock)));

    let token_service = Arc::new(
        TokenService::with_clock(
            store.clone() as Arc<dyn RevocationStore>,
            TokenServiceConfig::new(SECRET, chrono::Duration::hours(72)),
            shared_clock,
        )
        .expect("token service"),
    );

    let encoder = Arc::new(BcryptPasswordEncoder::new(4));
    let seeds = AccountSeed::parse_list(
        "lions:lions@example.com:123456:admin,bob:bob@example.com:hunter2:user",
    )
    .expect("seeds");
    let accounts = seed_accounts(&seeds, encoder.as_ref()).await.expect("hashing");

    let state = AppState::new(
        token_service,
        Arc::new(MemoryAccountRepository::new(accounts)),
        encoder,
    );

    TestContext {
        state: web::Data::new(customize(state)),
        clock,
        store,
    }
}

pub fn login_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/login")
        .set_form([("username", username), ("password", password)])
}

pub fn hello_request(authorization: Option<&str>) -> test::TestRequest {
    let request = test::TestRequest::get().uri("/api/test/hello");
    match authorization {
        Some(value) => request.insert_header((AUTHORIZATION, value.to_string())),
        None => request,
    }
}

pub fn logout_request(authorization: Option<&str>) -> test::TestRequest {
    let request = test::TestRequest::post().uri("/api/auth/logout");
    match authorization {
        Some(value) => request.insert_header((AUTHORIZATION, value.to_string())),
        None => request,
    }
}

pub async fn json_body<B: MessageBody>(response: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn text_body<B: MessageBody>(response: ServiceResponse<B>) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Logs in through the service and returns the bearer header value
pub async fn bearer_for(context: &TestContext, username: &str, password: &str) -> String {
    let outcome = context
        .state
        .login_service
        .login(username, password)
        .await
        .expect("login");
    format!("Bearer {}", outcome.token.token)
}
