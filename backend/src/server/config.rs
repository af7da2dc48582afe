//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use voting::domain::{OTP_TTL, OtpPolicy};
use voting::outbound::cache::RedisOtpStore;
use voting::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis: Option<RedisOtpStore>,
    pub(crate) otp_policy: OtpPolicy,
    pub(crate) otp_ttl: Duration,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory adapters.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            redis: None,
            otp_policy: OtpPolicy::strict(),
            otp_ttl: OTP_TTL,
        }
    }

    /// Persist voters, elections and votes in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Keep issued passcodes in Redis.
    #[must_use]
    pub fn with_redis(mut self, store: RedisOtpStore) -> Self {
        self.redis = Some(store);
        self
    }

    /// Override the passcode policy and lifetime.
    #[must_use]
    pub fn with_otp(mut self, policy: OtpPolicy, ttl: Duration) -> Self {
        self.otp_policy = policy;
        self.otp_ttl = ttl;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
