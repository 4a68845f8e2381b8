use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::app::AppState;

use tg_shared::errors::{codes, messages};
use tg_shared::types::RestResponse;

/// Handler for POST /api/auth/logout
///
/// Revokes the token in the Authorization header until it would have expired.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {token}
/// ```
///
/// # Response
///
/// ## Success
/// ```json
/// { "code": 200, "data": null, "message": "Logged out successfully" }
/// ```
///
/// ## Failure (missing or unverifiable token, store unavailable)
/// ```json
/// { "code": 400, "data": null, "message": "Logout failed" }
/// ```
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.token_service.revoke_session(authorization).await {
        Ok(()) => HttpResponse::Ok().json(RestResponse::<()>::success(None, messages::LOGOUT_SUCCESS)),
        Err(error) => {
            info!(reason = error.kind(), "Logout failed");
            HttpResponse::Ok().json(RestResponse::<()>::failure(
                codes::BAD_REQUEST,
                messages::LOGOUT_FAILURE,
            ))
        }
    }
}
