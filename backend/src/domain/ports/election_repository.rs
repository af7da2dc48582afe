//! Port for the election catalogue.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    BallotEntry, Candidate, CandidateId, Election, ElectionId, NewCandidate, NewElection,
    NewParty, Party,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by election repository adapters.
    pub enum ElectionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "election repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "election repository query failed: {message}",
        /// A referenced election or party does not exist.
        MissingReference { message: String } => "missing reference: {message}",
    }
}

/// Port for elections, parties and candidates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ElectionRepository: Send + Sync {
    /// Election whose window contains `now`.
    ///
    /// When several overlap, the earliest start wins, then the lowest id.
    async fn current_election(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Election>, ElectionRepositoryError>;

    /// Candidates standing in `election`, with party details, by candidate id.
    async fn ballot_entries(
        &self,
        election: ElectionId,
    ) -> Result<Vec<BallotEntry>, ElectionRepositoryError>;

    /// Candidate `candidate` if it stands in `election`.
    async fn find_candidate(
        &self,
        election: ElectionId,
        candidate: CandidateId,
    ) -> Result<Option<Candidate>, ElectionRepositoryError>;

    /// All elections ordered by start time.
    async fn list_elections(&self) -> Result<Vec<Election>, ElectionRepositoryError>;

    /// Persist a new election.
    async fn create_election(
        &self,
        election: NewElection,
    ) -> Result<Election, ElectionRepositoryError>;

    /// Persist a new party.
    async fn create_party(&self, party: NewParty) -> Result<Party, ElectionRepositoryError>;

    /// Persist a new candidate.
    async fn create_candidate(
        &self,
        candidate: NewCandidate,
    ) -> Result<Candidate, ElectionRepositoryError>;
}
