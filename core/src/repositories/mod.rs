pub mod account;
pub mod revocation;

pub use account::AccountRepository;
pub use revocation::{revocation_key, RevocationStore, REVOCATION_KEY_SEGMENT};

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use revocation::MockRevocationStore;
