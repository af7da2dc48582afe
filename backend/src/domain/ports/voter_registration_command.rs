//! Driving port for voter registration.

use async_trait::async_trait;

use crate::domain::{Error, Voter, VoterRegistration};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoterRegistrationCommand: Send + Sync {
    /// Create an account and voter record from a validated form.
    async fn register(&self, registration: VoterRegistration) -> Result<Voter, Error>;
}
