mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test};

use common::{bearer_for, context_with, hello_request, json_body, text_body};
use tg_api::app::create_app;
use tg_api::middleware::policy::RoutePolicy;

fn admin_only_hello() -> RoutePolicy {
    RoutePolicy::default().any_role("/api/test/**", &["admin"])
}

#[actix_web::test]
async fn test_role_rule_forbids_other_roles() {
    let ctx = context_with(|state| state.with_policy(Arc::new(admin_only_hello()))).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let bearer = bearer_for(&ctx, "bob", "hunter2").await;

    let response = test::call_service(&app, hello_request(Some(&bearer)).to_request()).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["code"], 403);
    assert_eq!(body["message"], "Access Denied");
}

#[actix_web::test]
async fn test_role_rule_permits_matching_role() {
    let ctx = context_with(|state| state.with_policy(Arc::new(admin_only_hello()))).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let bearer = bearer_for(&ctx, "lions", "123456").await;

    let response = test::call_service(&app, hello_request(Some(&bearer)).to_request()).await;

    assert_eq!(text_body(response).await, "hello world");
}

#[actix_web::test]
async fn test_role_rule_challenges_anonymous() {
    let ctx = context_with(|state| state.with_policy(Arc::new(admin_only_hello()))).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let response = test::call_service(&app, hello_request(None).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_health_is_public() {
    let ctx = context_with(|state| state).await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "token-gate");
}
