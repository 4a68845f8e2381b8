//! Cache module for Redis-based revocation
//!
//! This module provides the Redis client with retry logic and the two
//! revocation store adapters: Redis for shared deployments and an in-process
//! map for a single node.

pub mod memory_revocation_store;
pub mod redis_client;
pub mod revocation_store;

pub use memory_revocation_store::MemoryRevocationStore;
pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use tg_shared::config::cache::CacheConfig;
