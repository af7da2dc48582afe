//! Recorded votes and the history projection shown on the profile page.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{CandidateId, ElectionId, VoterPk};

/// Ballot submitted by a verified voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVote {
    pub voter_pk: VoterPk,
    pub candidate_id: CandidateId,
    pub election_id: ElectionId,
}

/// Immutable stored vote.
///
/// ## Invariants
/// - At most one vote exists per `(voter_pk, election_id)`.
/// - `cast_at` is set by the store when the row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: i64,
    pub voter_pk: VoterPk,
    pub candidate_id: CandidateId,
    pub election_id: ElectionId,
    pub cast_at: DateTime<Utc>,
}

/// One line of a voter's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VotingHistoryEntry {
    pub election_id: ElectionId,
    pub election_name: String,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub party_name: String,
    pub cast_at: DateTime<Utc>,
}

/// Order history newest first, breaking ties by election id.
pub fn sort_history(entries: &mut [VotingHistoryEntry]) {
    entries.sort_by(|a, b| {
        b.cast_at
            .cmp(&a.cast_at)
            .then_with(|| b.election_id.cmp(&a.election_id))
    });
}
