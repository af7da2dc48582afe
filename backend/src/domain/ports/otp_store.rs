//! Port for the expiring passcode store.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{OtpCode, PhoneNumber};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by passcode store adapters.
    pub enum OtpStoreError {
        /// Store backend is unavailable or timing out.
        Backend { message: String } => "otp store backend failure: {message}",
        /// A stored value could not be read back as a passcode.
        Corrupt { message: String } => "otp store returned an unreadable value: {message}",
    }
}

/// Key under which the passcode for `phone` is stored.
///
/// # Examples
/// ```
/// use voting::domain::PhoneNumber;
/// use voting::domain::ports::otp_key;
///
/// let phone = PhoneNumber::new("9876543210").expect("valid phone");
/// assert_eq!(otp_key(&phone), "otp:9876543210");
/// ```
pub fn otp_key(phone: &PhoneNumber) -> String {
    format!("otp:{phone}")
}

/// Port for storing passcodes with a time-to-live.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Store `code` for `phone`, replacing any earlier code.
    async fn put(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
        ttl: Duration,
    ) -> Result<(), OtpStoreError>;

    /// Live code for `phone`; `None` once expired or removed.
    async fn get(&self, phone: &PhoneNumber) -> Result<Option<OtpCode>, OtpStoreError>;

    /// Drop the code for `phone`. Removing a missing entry succeeds.
    async fn remove(&self, phone: &PhoneNumber) -> Result<(), OtpStoreError>;
}
