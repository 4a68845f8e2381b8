//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod token;

// Re-export commonly used types
pub use auth::{LoginOutcome, LoginService, PasswordEncoder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{TokenCodec, TokenService, TokenServiceConfig};
