//! Driving port for the profile page.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, UserId, Voter, VotingHistoryEntry};

/// Voter fields plus voting history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoterProfile {
    pub voter_id: String,
    pub aadhar_number: String,
    pub phone_number: String,
    pub is_verified: bool,
    pub has_voted: bool,
    pub voting_history: Vec<VotingHistoryEntry>,
}

impl VoterProfile {
    /// Project `voter` together with its `history`.
    pub fn new(voter: &Voter, voting_history: Vec<VotingHistoryEntry>) -> Self {
        Self {
            voter_id: voter.voter_id().to_string(),
            aadhar_number: voter.aadhar_number().to_string(),
            phone_number: voter.phone_number().to_string(),
            is_verified: voter.is_verified(),
            has_voted: voter.has_voted(),
            voting_history,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoterProfileQuery: Send + Sync {
    /// Profile of the voter owning `user`.
    async fn profile(&self, user: &UserId) -> Result<VoterProfile, Error>;
}
