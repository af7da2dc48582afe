//! Port for delivering passcodes to voters.
use async_trait::async_trait;

use crate::domain::{OtpCode, PhoneNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised while delivering a passcode.
    pub enum OtpNotifierError {
        /// Delivery channel rejected or dropped the message.
        Delivery { message: String } => "otp delivery failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    /// Send `code` to `phone`.
    async fn notify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<(), OtpNotifierError>;
}
