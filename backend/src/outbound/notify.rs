//! Passcode delivery adapters.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{OtpNotifier, OtpNotifierError};
use crate::domain::{OtpCode, PhoneNumber};

/// Tracing target used for passcode delivery events.
pub const OTP_LOG_TARGET: &str = "voting::otp";

/// Notifier that writes the passcode to the `voting::otp` log target.
///
/// Stands in for an SMS gateway in development and tests. Operators filter
/// this target out of shipped logs.
#[derive(Debug, Clone, Default)]
pub struct TracingOtpNotifier;

impl TracingOtpNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OtpNotifier for TracingOtpNotifier {
    async fn notify(&self, phone: &PhoneNumber, code: &OtpCode) -> Result<(), OtpNotifierError> {
        info!(target: OTP_LOG_TARGET, phone = %phone, otp = code.as_ref(), "passcode issued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn delivery_always_succeeds() {
        let phone = PhoneNumber::new("9876543210").expect("valid phone");
        let code = OtpCode::parse("000042").expect("valid code");
        TracingOtpNotifier::new()
            .notify(&phone, &code)
            .await
            .expect("log delivery");
    }
}
