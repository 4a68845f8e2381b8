//! Domain entities.

pub mod account;
pub mod identity;
pub mod token;

pub use account::Account;
pub use identity::{Identity, CREDENTIAL_MASK};
pub use token::{strip_bearer, Claims, IssuedToken, BEARER_PREFIX};
