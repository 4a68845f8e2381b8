//! Login service module
//!
//! Form login against stored accounts: look the account up by username or
//! email, check the password hash, then mint a session token.

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::PasswordEncoder;
pub use service::{LoginOutcome, LoginService};
