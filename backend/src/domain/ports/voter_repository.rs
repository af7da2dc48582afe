//! Port for the identity store: accounts and their voter records.

use async_trait::async_trait;

use crate::domain::{
    AadharNumber, LoginCredentials, NewAccount, NewVoter, UserId, Voter, VoterId, VoterPk,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by voter repository adapters.
    pub enum VoterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "voter repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "voter repository query failed: {message}",
        /// Another voter already holds this voter ID.
        DuplicateVoterId => "voter id already registered",
        /// Another voter already holds this Aadhar number.
        DuplicateAadharNumber => "aadhar number already registered",
        /// The voter row to update does not exist.
        MissingVoter { pk: i64 } => "voter {pk} does not exist",
    }
}

/// Port for reading and writing voter identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoterRepository: Send + Sync {
    /// Create the account and its voter record in one unit.
    ///
    /// Adapters must reject a taken voter ID before a taken Aadhar number and
    /// must leave no partial rows behind.
    async fn register(
        &self,
        account: NewAccount,
        voter: NewVoter,
    ) -> Result<Voter, VoterRepositoryError>;

    /// Whether a voter already uses `voter_id`.
    async fn voter_id_taken(&self, voter_id: &VoterId) -> Result<bool, VoterRepositoryError>;

    /// Whether a voter already uses `aadhar_number`.
    async fn aadhar_number_taken(
        &self,
        aadhar_number: &AadharNumber,
    ) -> Result<bool, VoterRepositoryError>;

    /// Exact match on voter ID, Aadhar number and phone number.
    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<Voter>, VoterRepositoryError>;

    /// Voter owned by an authenticated account.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Voter>, VoterRepositoryError>;

    /// Voter by storage key.
    async fn find_by_pk(&self, pk: VoterPk) -> Result<Option<Voter>, VoterRepositoryError>;

    /// Set the verified flag.
    async fn mark_verified(&self, pk: VoterPk) -> Result<(), VoterRepositoryError>;
}
