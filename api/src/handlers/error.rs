//! Rejections rendered as the REST envelope

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use tg_shared::errors::messages;
use tg_shared::types::RestResponse;

/// Errors returned straight from extractors and the access guard
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),
}

impl ApiError {
    pub fn authentication_required() -> Self {
        ApiError::Unauthorized(messages::AUTHENTICATION_REQUIRED.to_string())
    }

    pub fn access_denied() -> Self {
        ApiError::Forbidden(messages::ACCESS_DENIED.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Unauthorized(message) => RestResponse::<()>::unauthorized(message.clone()),
            ApiError::Forbidden(message) => RestResponse::<()>::forbidden(message.clone()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
