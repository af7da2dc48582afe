//! Driving port for the two-step login.
//!
//! Inbound adapters call this port to check voter credentials, issue a
//! passcode and later confirm it. The pending state lives in the caller's
//! session, so the port itself stays stateless.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, OtpCode, UserId, VoterId, VoterPk};

/// Login awaiting passcode confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLogin {
    pub voter_pk: VoterPk,
    pub voter_id: VoterId,
    /// Copy of the issued passcode held by the session.
    pub otp: OtpCode,
}

/// Domain use-case port for voter authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Match credentials against a registered voter and issue a passcode.
    async fn begin_login(&self, credentials: &LoginCredentials) -> Result<PendingLogin, Error>;

    /// Confirm `submitted` for `pending` and return the voter's account.
    async fn confirm_otp(&self, pending: &PendingLogin, submitted: &OtpCode)
    -> Result<UserId, Error>;
}
