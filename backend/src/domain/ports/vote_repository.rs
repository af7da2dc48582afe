//! Port for the ballot box.

use async_trait::async_trait;

use crate::domain::{CandidateTally, ElectionId, NewVote, Vote, VoterPk, VotingHistoryEntry};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
        /// A vote already exists for this voter and election.
        AlreadyVoted => "voter already voted in this election",
    }
}

/// Port for recording and aggregating votes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Write the vote and set the voter's has-voted flag atomically.
    ///
    /// Returns [`VoteRepositoryError::AlreadyVoted`] when the
    /// `(voter, election)` pair already holds a vote. Nothing is written in
    /// that case.
    async fn cast_vote(&self, vote: NewVote) -> Result<Vote, VoteRepositoryError>;

    /// Per-candidate vote counts for `election`. Order is unspecified.
    async fn tally(&self, election: ElectionId) -> Result<Vec<CandidateTally>, VoteRepositoryError>;

    /// Every vote cast by `voter`, newest first.
    async fn history_for(
        &self,
        voter: VoterPk,
    ) -> Result<Vec<VotingHistoryEntry>, VoteRepositoryError>;
}
