use actix_web::{web, HttpResponse};
use tracing::{debug, error};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{AuthorizeResponse, LoginRequest};

use tg_core::errors::{AuthError, DomainError};
use tg_shared::errors::messages;
use tg_shared::types::RestResponse;

/// Handler for POST /api/auth/login
///
/// Form login by username or email. The outcome is carried in the envelope
/// `code`; the HTTP status is 200 either way.
///
/// # Request Body (application/x-www-form-urlencoded)
///
/// ```text
/// username=lions&password=123456
/// ```
///
/// # Response
///
/// ## Success
/// ```json
/// {
///     "code": 200,
///     "data": {
///         "username": "lions",
///         "role": "admin",
///         "token": "eyJhbGciOiJIUzI1NiJ9...",
///         "expire": "2026-10-22T09:30:00Z"
///     },
///     "message": "Login successful"
/// }
/// ```
///
/// ## Failure
/// ```json
/// { "code": 401, "data": null, "message": "Bad credentials" }
/// ```
///
/// A failing account lookup answers the same way with the message
/// "Authentication service unavailable".
pub async fn login(
    state: web::Data<AppState>,
    form: Option<web::Form<LoginRequest>>,
) -> HttpResponse {
    // A missing or non-form body reads as empty fields.
    let request = form.map(web::Form::into_inner).unwrap_or_default();

    if let Err(errors) = request.validate() {
        debug!(fields = ?errors.field_errors().keys().collect::<Vec<_>>(), "Login form rejected");
        return login_failure(AuthError::BadCredentials.to_string());
    }

    match state
        .login_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(RestResponse::success(
            Some(AuthorizeResponse::from(&outcome)),
            messages::LOGIN_SUCCESS,
        )),
        Err(DomainError::Auth(error)) => login_failure(error.to_string()),
        Err(error) => {
            error!(error = %error, "Login could not be completed");
            login_failure(messages::LOGIN_UNAVAILABLE.to_string())
        }
    }
}

fn login_failure(message: String) -> HttpResponse {
    HttpResponse::Ok().json(RestResponse::<()>::unauthorized(message))
}
