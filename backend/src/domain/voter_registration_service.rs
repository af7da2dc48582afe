//! Voter registration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, VoterRegistrationCommand, VoterRepository};
use crate::domain::voting_service_support::{
    DUPLICATE_AADHAR_NUMBER, DUPLICATE_VOTER_ID, map_password_hasher_error,
    map_voter_repository_error,
};
use crate::domain::{Error, NewAccount, NewVoter, UserId, Voter, VoterRegistration};

/// Registration service implementing [`VoterRegistrationCommand`].
#[derive(Clone)]
pub struct VoterRegistrationService<V: ?Sized> {
    voters: Arc<V>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<V: ?Sized> VoterRegistrationService<V> {
    /// Create a registration service over the identity store.
    pub fn new(voters: Arc<V>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { voters, hasher }
    }
}

#[async_trait]
impl<V: ?Sized> VoterRegistrationCommand for VoterRegistrationService<V>
where
    V: VoterRepository,
{
    async fn register(&self, registration: VoterRegistration) -> Result<Voter, Error> {
        if self
            .voters
            .voter_id_taken(registration.voter_id())
            .await
            .map_err(map_voter_repository_error)?
        {
            return Err(Error::conflict(DUPLICATE_VOTER_ID).with_field("voter_id"));
        }
        if self
            .voters
            .aadhar_number_taken(registration.aadhar_number())
            .await
            .map_err(map_voter_repository_error)?
        {
            return Err(Error::conflict(DUPLICATE_AADHAR_NUMBER).with_field("aadhar_number"));
        }

        // Argon2 is memory-hard; keep it off the async workers.
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(registration.password().to_owned());
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing aborted: {err}")))?
            .map_err(map_password_hasher_error)?;
        let account = NewAccount {
            id: UserId::random(),
            username: registration.voter_id().to_string(),
            password_hash,
        };
        let new_voter = NewVoter {
            user_id: account.id,
            voter_id: registration.voter_id().clone(),
            aadhar_number: registration.aadhar_number().clone(),
            phone_number: registration.phone_number().clone(),
        };

        // The store re-checks uniqueness, so a concurrent duplicate still
        // surfaces as the field error.
        let voter = self
            .voters
            .register(account, new_voter)
            .await
            .map_err(map_voter_repository_error)?;
        info!(voter_pk = %voter.pk(), voter_id = %voter.voter_id(), "voter registered");
        Ok(voter)
    }
}

#[cfg(test)]
#[path = "voter_registration_service_tests.rs"]
mod tests;
