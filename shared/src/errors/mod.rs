//! Response codes and fixed user-facing messages

/// Codes carried in the `code` field of the REST envelope
pub mod codes {
    pub const SUCCESS: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
}

/// Messages returned by the authentication endpoints and guards
pub mod messages {
    pub const LOGIN_SUCCESS: &str = "Login successful";
    pub const LOGIN_UNAVAILABLE: &str = "Authentication service unavailable";
    pub const LOGOUT_SUCCESS: &str = "Logged out successfully";
    pub const LOGOUT_FAILURE: &str = "Logout failed";
    pub const AUTHENTICATION_REQUIRED: &str =
        "Full authentication is required to access this resource";
    pub const ACCESS_DENIED: &str = "Access Denied";
}
