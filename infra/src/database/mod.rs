//! Database module - account lookup implementations
//!
//! - Connection pool management (MySQL via SQLx)
//! - `tbl_account` lookup by username or email
//! - An in-memory account list for single-node setups

pub mod connection;
pub mod memory_account_repository;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use memory_account_repository::MemoryAccountRepository;
pub use mysql::MySqlAccountRepository;
