//! Authentication route handlers
//!
//! - Form login
//! - Logout (token revocation)

pub mod login;
pub mod logout;

pub use login::login;
pub use logout::logout;
