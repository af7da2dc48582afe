//! Passcode store adapters.
//!
//! `RedisOtpStore` keeps codes in Redis with a native expiry. When no Redis
//! URL is configured the server falls back to `InMemoryOtpStore`, which is
//! only suitable for a single process.

mod memory_otp_store;
mod redis_otp_store;

pub use memory_otp_store::InMemoryOtpStore;
pub use redis_otp_store::RedisOtpStore;
