pub mod auth;

pub use auth::{AuthorizeResponse, LoginRequest};
