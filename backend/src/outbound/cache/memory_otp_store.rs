//! Process-local passcode store with clock-driven expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{OtpStore, OtpStoreError, otp_key};
use crate::domain::{OtpCode, PhoneNumber};

struct Entry {
    code: OtpCode,
    expires_at: DateTime<Utc>,
}

/// Passcode store backed by a mutex-guarded map.
///
/// Expired entries are dropped lazily when read.
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOtpStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
        ttl: Duration,
    ) -> Result<(), OtpStoreError> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|err| OtpStoreError::backend(format!("invalid ttl: {err}")))?;
        let expires_at = self.clock.utc() + ttl;
        self.entries().insert(
            otp_key(phone),
            Entry {
                code: code.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, phone: &PhoneNumber) -> Result<Option<OtpCode>, OtpStoreError> {
        let key = otp_key(phone);
        let now = self.clock.utc();
        let mut entries = self.entries();
        match entries.get(&key) {
            Some(entry) if now < entry.expires_at => Ok(Some(entry.code.clone())),
            Some(_) => {
                entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, phone: &PhoneNumber) -> Result<(), OtpStoreError> {
        self.entries().remove(&otp_key(phone));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MutableClock;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 5, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn phone() -> PhoneNumber {
        PhoneNumber::new("9876543210").expect("valid phone")
    }

    fn code(raw: &str) -> OtpCode {
        OtpCode::parse(raw).expect("valid code")
    }

    #[rstest]
    #[tokio::test]
    async fn code_is_readable_until_ttl_elapses(clock: Arc<MutableClock>) {
        let store = InMemoryOtpStore::new(clock.clone());
        store
            .put(&phone(), &code("123456"), Duration::from_secs(300))
            .await
            .expect("put");

        clock.advance(Duration::from_secs(299));
        assert_eq!(store.get(&phone()).await.expect("get"), Some(code("123456")));

        clock.advance(Duration::from_secs(1));
        assert_eq!(store.get(&phone()).await.expect("get"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn later_put_replaces_code(clock: Arc<MutableClock>) {
        let store = InMemoryOtpStore::new(clock);
        let ttl = Duration::from_secs(60);
        store.put(&phone(), &code("111111"), ttl).await.expect("put");
        store.put(&phone(), &code("222222"), ttl).await.expect("put");
        assert_eq!(store.get(&phone()).await.expect("get"), Some(code("222222")));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_is_idempotent(clock: Arc<MutableClock>) {
        let store = InMemoryOtpStore::new(clock);
        store
            .put(&phone(), &code("654321"), Duration::from_secs(60))
            .await
            .expect("put");
        store.remove(&phone()).await.expect("remove");
        store.remove(&phone()).await.expect("second remove");
        assert_eq!(store.get(&phone()).await.expect("get"), None);
    }
}
