pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::{revocation_key, RevocationStore, REVOCATION_KEY_SEGMENT};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockRevocationStore;
