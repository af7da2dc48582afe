//! Redis-backed passcode store.
//!
//! Codes live under `otp:<phone>` with `SETEX`, so Redis drops them when the
//! TTL elapses.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis::{AsyncCommands, RedisError};
use tracing::debug;

use crate::domain::ports::{OtpStore, OtpStoreError, otp_key};
use crate::domain::{OtpCode, PhoneNumber};

/// Passcode store using a pooled Redis connection.
#[derive(Clone)]
pub struct RedisOtpStore {
    pool: Pool<RedisConnectionManager>,
}

fn map_redis_error(error: RedisError) -> OtpStoreError {
    OtpStoreError::backend(error.to_string())
}

/// Whole seconds for `SETEX`; Redis rejects a zero expiry.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

impl RedisOtpStore {
    /// Connect a pool to `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self, OtpStoreError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(map_redis_error)?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, OtpStoreError> {
        self.pool
            .get()
            .await
            .map_err(|err| OtpStoreError::backend(err.to_string()))
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
        ttl: Duration,
    ) -> Result<(), OtpStoreError> {
        let mut conn = self.connection().await?;
        let seconds = expiry_seconds(ttl);
        conn.set_ex::<_, _, ()>(otp_key(phone), code.as_ref(), seconds)
            .await
            .map_err(map_redis_error)?;
        debug!(ttl_secs = seconds, "stored passcode");
        Ok(())
    }

    async fn get(&self, phone: &PhoneNumber) -> Result<Option<OtpCode>, OtpStoreError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(otp_key(phone)).await.map_err(map_redis_error)?;
        raw.map(|value| {
            OtpCode::parse(&value).map_err(|err| OtpStoreError::corrupt(err.to_string()))
        })
        .transpose()
    }

    async fn remove(&self, phone: &PhoneNumber) -> Result<(), OtpStoreError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(otp_key(phone))
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}
