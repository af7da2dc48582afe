//! Credential check and passcode confirmation.
//!
//! `begin_login` issues a fresh passcode for a matching voter and returns the
//! pending state for the caller's session. `confirm_otp` accepts a submitted
//! code only while it matches both the session copy and the live store entry,
//! then consumes the entry and marks the voter verified.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{LoginService, OtpNotifier, OtpStore, PendingLogin, VoterRepository};
use crate::domain::voting_service_support::{
    OTP_VERIFY, map_otp_notifier_error, map_otp_store_error, map_voter_repository_error,
};
use crate::domain::{Error, LoginCredentials, OTP_TTL, OtpCode, OtpPolicy, UserId};

/// Message returned when credentials do not match a voter.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials or voter not registered";

/// Login service implementing [`LoginService`].
#[derive(Clone)]
pub struct OtpLoginService<V: ?Sized, S: ?Sized> {
    voters: Arc<V>,
    otp_store: Arc<S>,
    notifier: Arc<dyn OtpNotifier>,
    policy: OtpPolicy,
    ttl: Duration,
}

impl<V: ?Sized, S: ?Sized> OtpLoginService<V, S> {
    /// Create a login service with the strict policy and default TTL.
    pub fn new(voters: Arc<V>, otp_store: Arc<S>, notifier: Arc<dyn OtpNotifier>) -> Self {
        Self {
            voters,
            otp_store,
            notifier,
            policy: OtpPolicy::strict(),
            ttl: OTP_TTL,
        }
    }

    /// Override the verification policy.
    pub fn with_policy(mut self, policy: OtpPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override how long issued passcodes stay valid.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[async_trait]
impl<V: ?Sized, S: ?Sized> LoginService for OtpLoginService<V, S>
where
    V: VoterRepository,
    S: OtpStore,
{
    async fn begin_login(&self, credentials: &LoginCredentials) -> Result<PendingLogin, Error> {
        let voter = self
            .voters
            .find_by_credentials(credentials)
            .await
            .map_err(map_voter_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let code = OtpCode::generate(&mut rand::thread_rng());
        self.otp_store
            .put(voter.phone_number(), &code, self.ttl)
            .await
            .map_err(map_otp_store_error)?;
        self.notifier
            .notify(voter.phone_number(), &code)
            .await
            .map_err(map_otp_notifier_error)?;

        info!(voter_pk = %voter.pk(), "passcode issued");
        Ok(PendingLogin {
            voter_pk: voter.pk(),
            voter_id: voter.voter_id().clone(),
            otp: code,
        })
    }

    async fn confirm_otp(
        &self,
        pending: &PendingLogin,
        submitted: &OtpCode,
    ) -> Result<UserId, Error> {
        let voter = self
            .voters
            .find_by_pk(pending.voter_pk)
            .await
            .map_err(map_voter_repository_error)?
            .ok_or_else(|| Error::not_found("Voter not found"))?;

        let live = self
            .otp_store
            .get(voter.phone_number())
            .await
            .map_err(map_otp_store_error)?;
        if !self.policy.accepts(Some(&pending.otp), live.as_ref(), submitted) {
            info!(voter_pk = %voter.pk(), "passcode rejected");
            return Err(Error::unauthorized("Invalid OTP").with_redirect(OTP_VERIFY));
        }
        if self.policy.is_bypass() {
            warn!(voter_pk = %voter.pk(), "passcode check bypassed");
        }

        self.voters
            .mark_verified(voter.pk())
            .await
            .map_err(map_voter_repository_error)?;
        if let Err(error) = self.otp_store.remove(voter.phone_number()).await {
            warn!(voter_pk = %voter.pk(), %error, "failed to consume passcode");
        }

        info!(voter_pk = %voter.pk(), "voter verified");
        Ok(*voter.user_id())
    }
}

#[cfg(test)]
#[path = "otp_login_service_tests.rs"]
mod tests;
