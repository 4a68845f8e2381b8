//! API response envelope

use serde::{Deserialize, Serialize};

use crate::errors::codes;

/// Uniform REST envelope: `{ "code": int, "data": T | null, "message": string }`
///
/// `data` is always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestResponse<T> {
    /// Result code (200 on success, otherwise an HTTP-style failure code)
    pub code: u16,

    /// Payload, present on success
    pub data: Option<T>,

    /// Human-readable message
    pub message: String,
}

impl<T> RestResponse<T> {
    /// Create a successful response
    pub fn success(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: codes::SUCCESS,
            data,
            message: message.into(),
        }
    }

    /// Create a failure response with a caller-supplied code
    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            data: None,
            message: message.into(),
        }
    }

    /// 401 envelope
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::failure(codes::UNAUTHORIZED, message)
    }

    /// 403 envelope
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::failure(codes::FORBIDDEN, message)
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.code == codes::SUCCESS
    }
}
