//! Result aggregation for an election.
//!
//! Adapters return raw per-candidate counts; [`Tally::from_counts`] ranks them
//! and derives the leader's share of the vote.

use serde::Serialize;
use utoipa::ToSchema;

use super::{CandidateId, Election};

/// Message reported when an election has no votes.
pub const NO_VOTES_MESSAGE: &str = "No votes have been cast yet";

/// Vote count for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTally {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub party_name: String,
    pub votes: u64,
}

/// Ranked result for an election with at least one vote.
///
/// ## Invariants
/// - `standings` is sorted by votes descending, then candidate id ascending.
/// - `standings` is non-empty and `total_votes > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    election: Election,
    standings: Vec<CandidateTally>,
    total_votes: u64,
}

/// Outcome of tallying an election.
#[derive(Debug, Clone, PartialEq)]
pub enum TallyOutcome {
    /// No vote has been recorded yet.
    NoVotes { election: Election },
    /// At least one vote exists.
    Counted(Tally),
}

impl Tally {
    /// Rank `counts` for `election`.
    ///
    /// Zero-count rows are dropped. Returns [`TallyOutcome::NoVotes`] when
    /// nothing remains.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use voting::domain::{
    ///     CandidateId, CandidateTally, Election, ElectionId, NewElection, Tally, TallyOutcome,
    /// };
    ///
    /// let now = Utc::now();
    /// let election = Election::new(
    ///     ElectionId::new(1),
    ///     NewElection::try_new("General", "", now, now + Duration::hours(1)).expect("valid"),
    /// );
    /// let row = |id: i64, votes: u64| CandidateTally {
    ///     candidate_id: CandidateId::new(id),
    ///     candidate_name: format!("C{id}"),
    ///     party_name: "P".into(),
    ///     votes,
    /// };
    /// let TallyOutcome::Counted(tally) =
    ///     Tally::from_counts(election, vec![row(1, 3), row(2, 5), row(3, 2)])
    /// else {
    ///     panic!("votes were cast");
    /// };
    /// assert_eq!(tally.leader().map(|c| c.candidate_id), Some(CandidateId::new(2)));
    /// assert_eq!(tally.leader_percentage(), Some(50.0));
    /// ```
    pub fn from_counts(election: Election, counts: Vec<CandidateTally>) -> TallyOutcome {
        let mut standings: Vec<CandidateTally> =
            counts.into_iter().filter(|row| row.votes > 0).collect();
        if standings.is_empty() {
            return TallyOutcome::NoVotes { election };
        }
        standings.sort_by(|a, b| {
            b.votes
                .cmp(&a.votes)
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });
        let total_votes = standings.iter().map(|row| row.votes).sum();
        TallyOutcome::Counted(Self {
            election,
            standings,
            total_votes,
        })
    }

    pub fn election(&self) -> &Election {
        &self.election
    }

    pub fn standings(&self) -> &[CandidateTally] {
        &self.standings
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    /// Candidate with the most votes.
    pub fn leader(&self) -> Option<&CandidateTally> {
        self.standings.first()
    }

    /// Leader's share of all votes, in percent.
    pub fn leader_percentage(&self) -> Option<f64> {
        self.leader()
            .map(|leader| leader.votes as f64 / self.total_votes as f64 * 100.0)
    }
}
