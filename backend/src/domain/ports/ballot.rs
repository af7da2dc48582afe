//! Driving ports for the ballot page and vote submission.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{BallotEntry, CandidateId, Election, Error, UserId, Vote};

/// Active election and the candidates standing in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    pub election: Election,
    pub candidates: Vec<BallotEntry>,
}

/// Query side of the ballot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BallotQuery: Send + Sync {
    /// Ballot for the voter owning `user`, after eligibility checks.
    async fn ballot(&self, user: &UserId) -> Result<Ballot, Error>;
}

/// Command side of the ballot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BallotCommand: Send + Sync {
    /// Record the voter's choice. `candidate` is `None` when the form omitted
    /// it or sent something other than an id.
    async fn cast_vote(&self, user: &UserId, candidate: Option<CandidateId>)
    -> Result<Vote, Error>;
}
