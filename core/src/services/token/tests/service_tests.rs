//! Unit tests for token service

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::domain::entities::identity::Identity;
use crate::errors::TokenError;
use crate::repositories::MockRevocationStore;
use crate::services::clock::ManualClock;
use crate::services::token::{TokenService, TokenServiceConfig};

const SECRET: &str = "service-test-secret";

struct Fixture {
    service: TokenService<Arc<MockRevocationStore>>,
    store: Arc<MockRevocationStore>,
    clock: ManualClock,
}

fn fixture(ttl: Duration) -> Fixture {
    let clock = ManualClock::starting_now();
    let store = Arc::new(MockRevocationStore::new(Arc::new(clock.clone())));
    let service = TokenService::with_clock(
        Arc::clone(&store),
        TokenServiceConfig::new(SECRET, ttl),
        Arc::new(clock.clone()),
    )
    .unwrap();

    Fixture {
        service,
        store,
        clock,
    }
}

fn alice() -> Identity {
    Identity::new("alice", vec!["ADMIN".to_string()])
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_login_token_authenticates_until_revoked_then_expires() {
    let f = fixture(Duration::hours(1));

    let issued = f.service.issue_for_login(&alice()).unwrap();
    let header = bearer(&issued.token);
    let identity = f.service.authenticate(Some(&header)).await.unwrap();
    assert_eq!(identity, alice());
    assert_eq!(identity.credential, "****");

    f.service.revoke_session(Some(&header)).await.unwrap();
    assert_eq!(
        f.service.authenticate(Some(&header)).await,
        Err(TokenError::Revoked)
    );

    let fresh = f.service.issue_for_login(&alice()).unwrap();
    let fresh_header = bearer(&fresh.token);
    assert!(f.service.authenticate(Some(&fresh_header)).await.is_ok());

    f.clock.advance(Duration::hours(1));
    assert_eq!(
        f.service.authenticate(Some(&fresh_header)).await,
        Err(TokenError::Expired)
    );
}

#[tokio::test]
async fn test_authenticate_requires_bearer_envelope() {
    let f = fixture(Duration::hours(1));
    let issued = f.service.issue_for_login(&alice()).unwrap();

    assert_eq!(f.service.authenticate(None).await, Err(TokenError::NoCredential));
    assert_eq!(
        f.service.authenticate(Some("Token abc")).await,
        Err(TokenError::NoCredential)
    );
    assert_eq!(
        f.service.authenticate(Some(&format!("bearer {}", issued.token))).await,
        Err(TokenError::NoCredential)
    );
    assert_eq!(
        f.service.authenticate(Some("Bearer ")).await,
        Err(TokenError::NoCredential)
    );
}

#[tokio::test]
async fn test_authenticate_reports_malformed_and_tampered_tokens() {
    let f = fixture(Duration::hours(1));
    let issued = f.service.issue_for_login(&alice()).unwrap();

    assert_eq!(
        f.service.authenticate(Some("Bearer abc")).await,
        Err(TokenError::MalformedToken)
    );

    let (message, signature) = issued.token.rsplit_once('.').unwrap();
    let replacement = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", message, replacement, &signature[1..]);
    assert_eq!(
        f.service.authenticate(Some(&bearer(&tampered))).await,
        Err(TokenError::InvalidSignature)
    );
}

#[tokio::test]
async fn test_token_is_valid_until_the_last_second() {
    let f = fixture(Duration::hours(1));
    let header = bearer(&f.service.issue_for_login(&alice()).unwrap().token);

    f.clock.advance(Duration::seconds(3599));
    assert!(f.service.authenticate(Some(&header)).await.is_ok());

    f.clock.advance(Duration::seconds(1));
    assert_eq!(
        f.service.authenticate(Some(&header)).await,
        Err(TokenError::Expired)
    );
}

#[tokio::test]
async fn test_revocation_lasts_for_the_remaining_lifetime() {
    let f = fixture(Duration::hours(1));
    let issued = f.service.issue_for_login(&alice()).unwrap();
    let header = bearer(&issued.token);

    f.clock.advance(Duration::minutes(20));
    f.service.revoke_session(Some(&header)).await.unwrap();

    let revocations = f.store.revocations();
    assert_eq!(revocations.len(), 1);
    assert_eq!(revocations[0].0, issued.claims.jti);
    assert_eq!(revocations[0].1, StdDuration::from_secs(40 * 60));

    f.clock.advance(Duration::minutes(39));
    assert_eq!(
        f.service.authenticate(Some(&header)).await,
        Err(TokenError::Revoked)
    );
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let f = fixture(Duration::hours(1));
    let header = bearer(&f.service.issue_for_login(&alice()).unwrap().token);

    f.service.revoke_session(Some(&header)).await.unwrap();
    f.service.revoke_session(Some(&header)).await.unwrap();

    assert_eq!(
        f.service.authenticate(Some(&header)).await,
        Err(TokenError::Revoked)
    );
}

#[tokio::test]
async fn test_revoke_only_affects_that_token() {
    let f = fixture(Duration::hours(1));
    let first = bearer(&f.service.issue_for_login(&alice()).unwrap().token);
    let second = bearer(&f.service.issue_for_login(&alice()).unwrap().token);

    f.service.revoke_session(Some(&first)).await.unwrap();

    assert!(f.service.authenticate(Some(&first)).await.is_err());
    assert!(f.service.authenticate(Some(&second)).await.is_ok());
}

#[tokio::test]
async fn test_revoke_of_expired_token_records_zero_ttl() {
    let f = fixture(Duration::hours(1));
    let header = bearer(&f.service.issue_for_login(&alice()).unwrap().token);

    f.clock.advance(Duration::hours(2));
    f.service.revoke_session(Some(&header)).await.unwrap();

    assert_eq!(f.store.revocations()[0].1, StdDuration::ZERO);
    assert_eq!(
        f.service.authenticate(Some(&header)).await,
        Err(TokenError::Expired)
    );
}

#[tokio::test]
async fn test_revoke_rejects_unverifiable_input() {
    let f = fixture(Duration::hours(1));
    let other = fixture(Duration::hours(1));
    let foreign = TokenService::with_clock(
        Arc::clone(&other.store),
        TokenServiceConfig::new("some-other-secret", Duration::hours(1)),
        Arc::new(other.clock.clone()),
    )
    .unwrap();
    let foreign_header = bearer(&foreign.issue_for_login(&alice()).unwrap().token);

    assert_eq!(f.service.revoke_session(None).await, Err(TokenError::InvalidToken));
    assert_eq!(
        f.service.revoke_session(Some("Token abc")).await,
        Err(TokenError::InvalidToken)
    );
    assert_eq!(
        f.service.revoke_session(Some("Bearer abc")).await,
        Err(TokenError::InvalidToken)
    );
    assert_eq!(
        f.service.revoke_session(Some(&foreign_header)).await,
        Err(TokenError::InvalidToken)
    );
    assert!(f.store.revocations().is_empty());
}

#[tokio::test]
async fn test_store_outage_fails_closed() {
    let f = fixture(Duration::hours(1));
    let header = bearer(&f.service.issue_for_login(&alice()).unwrap().token);

    f.store.set_available(false);

    assert_eq!(
        f.service.authenticate(Some(&header)).await,
        Err(TokenError::StoreUnavailable)
    );
    assert_eq!(
        f.service.revoke_session(Some(&header)).await,
        Err(TokenError::StoreUnavailable)
    );

    f.store.set_available(true);
    assert!(f.service.authenticate(Some(&header)).await.is_ok());
}

#[tokio::test]
async fn test_expiry_is_checked_before_the_store() {
    let f = fixture(Duration::hours(1));
    let header = bearer(&f.service.issue_for_login(&alice()).unwrap().token);

    f.clock.advance(Duration::hours(1));
    f.store.set_available(false);

    assert_eq!(
        f.service.authenticate(Some(&header)).await,
        Err(TokenError::Expired)
    );
}

#[tokio::test]
async fn test_issue_for_login_uses_configured_ttl_and_account() {
    let f = fixture(Duration::hours(72));
    let identity = alice().with_account_id(7);

    let issued = f.service.issue_for_login(&identity).unwrap();

    assert_eq!(f.service.token_ttl(), Duration::hours(72));
    assert_eq!(issued.claims.exp - issued.claims.iat, 72 * 3600);
    assert_eq!(f.service.expiry_for(&issued.claims), issued.expires_at());

    let resolved = f
        .service
        .authenticate(Some(&bearer(&issued.token)))
        .await
        .unwrap();
    assert_eq!(resolved.account_id, Some(7));
}
