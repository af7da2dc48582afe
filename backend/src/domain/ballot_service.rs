//! Ballot recording and result tallying.
//!
//! Eligibility is checked in a fixed order: voter profile, active election,
//! verification, has-voted. The vote repository remains the final guard; a
//! unique-constraint hit from a concurrent submission maps to the same
//! already-voted error as the pre-check.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    Ballot, BallotCommand, BallotQuery, ElectionRepository, ResultsQuery, VoteRepository,
    VoterRepository,
};
use crate::domain::voting_service_support::{
    ALREADY_VOTED, LOGIN, RESULTS, map_election_repository_error, map_vote_repository_error,
    require_current_election, require_voter,
};
use crate::domain::{
    CandidateId, Election, Error, NewVote, Tally, TallyOutcome, UserId, Vote, Voter,
};

/// Message returned when the submitted candidate is missing or foreign.
pub const INVALID_CANDIDATE: &str = "Invalid candidate selected";

/// Ballot service implementing [`BallotQuery`], [`BallotCommand`] and
/// [`ResultsQuery`].
#[derive(Clone)]
pub struct BallotService<V: ?Sized, E: ?Sized, B: ?Sized> {
    voters: Arc<V>,
    elections: Arc<E>,
    votes: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<V: ?Sized, E: ?Sized, B: ?Sized> BallotService<V, E, B> {
    /// Create a ballot service over the identity, catalogue and vote stores.
    pub fn new(voters: Arc<V>, elections: Arc<E>, votes: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            voters,
            elections,
            votes,
            clock,
        }
    }
}

impl<V: ?Sized, E: ?Sized, B: ?Sized> BallotService<V, E, B>
where
    V: VoterRepository,
    E: ElectionRepository,
    B: VoteRepository,
{
    async fn eligible_voter(&self, user: &UserId) -> Result<(Voter, Election), Error> {
        let voter = require_voter(self.voters.as_ref(), user).await?;
        let election = require_current_election(
            self.elections.as_ref(),
            self.clock.utc(),
            "No active election at this time",
        )
        .await?;
        if !voter.is_verified() {
            return Err(Error::forbidden("Please verify your identity first").with_redirect(LOGIN));
        }
        if voter.has_voted() {
            return Err(Error::conflict(ALREADY_VOTED).with_redirect(RESULTS));
        }
        Ok((voter, election))
    }
}

#[async_trait]
impl<V: ?Sized, E: ?Sized, B: ?Sized> BallotQuery for BallotService<V, E, B>
where
    V: VoterRepository,
    E: ElectionRepository,
    B: VoteRepository,
{
    async fn ballot(&self, user: &UserId) -> Result<Ballot, Error> {
        let (_, election) = self.eligible_voter(user).await?;
        let candidates = self
            .elections
            .ballot_entries(election.id())
            .await
            .map_err(map_election_repository_error)?;
        Ok(Ballot {
            election,
            candidates,
        })
    }
}

#[async_trait]
impl<V: ?Sized, E: ?Sized, B: ?Sized> BallotCommand for BallotService<V, E, B>
where
    V: VoterRepository,
    E: ElectionRepository,
    B: VoteRepository,
{
    async fn cast_vote(
        &self,
        user: &UserId,
        candidate: Option<CandidateId>,
    ) -> Result<Vote, Error> {
        let (voter, election) = self.eligible_voter(user).await?;
        let invalid = || Error::invalid_request(INVALID_CANDIDATE).with_field("candidate");
        let candidate_id = candidate.ok_or_else(invalid)?;
        let candidate = self
            .elections
            .find_candidate(election.id(), candidate_id)
            .await
            .map_err(map_election_repository_error)?
            .ok_or_else(invalid)?;

        let vote = self
            .votes
            .cast_vote(NewVote {
                voter_pk: voter.pk(),
                candidate_id: candidate.id,
                election_id: election.id(),
            })
            .await
            .map_err(map_vote_repository_error)?;
        info!(
            voter_pk = %voter.pk(),
            election_id = %election.id(),
            "vote recorded"
        );
        Ok(vote)
    }
}

#[async_trait]
impl<V: ?Sized, E: ?Sized, B: ?Sized> ResultsQuery for BallotService<V, E, B>
where
    V: VoterRepository,
    E: ElectionRepository,
    B: VoteRepository,
{
    async fn results(&self, user: &UserId) -> Result<TallyOutcome, Error> {
        require_voter(self.voters.as_ref(), user).await?;
        let election =
            require_current_election(self.elections.as_ref(), self.clock.utc(), "No active election")
                .await?;
        let counts = self
            .votes
            .tally(election.id())
            .await
            .map_err(map_vote_repository_error)?;
        Ok(Tally::from_counts(election, counts))
    }
}

#[cfg(test)]
#[path = "ballot_service_tests.rs"]
mod tests;
