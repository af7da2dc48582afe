//! Read models for the profile and landing pages.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    ElectionQuery, ElectionRepository, VoteRepository, VoterProfile, VoterProfileQuery,
    VoterRepository,
};
use crate::domain::voting_service_support::{
    map_election_repository_error, map_vote_repository_error, require_voter,
};
use crate::domain::{Election, Error, UserId, sort_history};

/// Profile service implementing [`VoterProfileQuery`].
#[derive(Clone)]
pub struct VoterProfileService<V: ?Sized, B: ?Sized> {
    voters: Arc<V>,
    votes: Arc<B>,
}

impl<V: ?Sized, B: ?Sized> VoterProfileService<V, B> {
    /// Create a profile service over the identity and vote stores.
    pub fn new(voters: Arc<V>, votes: Arc<B>) -> Self {
        Self { voters, votes }
    }
}

#[async_trait]
impl<V: ?Sized, B: ?Sized> VoterProfileQuery for VoterProfileService<V, B>
where
    V: VoterRepository,
    B: VoteRepository,
{
    async fn profile(&self, user: &UserId) -> Result<VoterProfile, Error> {
        let voter = require_voter(self.voters.as_ref(), user).await?;
        let mut history = self
            .votes
            .history_for(voter.pk())
            .await
            .map_err(map_vote_repository_error)?;
        sort_history(&mut history);
        Ok(VoterProfile::new(&voter, history))
    }
}

/// Landing-page query implementing [`ElectionQuery`].
#[derive(Clone)]
pub struct ElectionQueryService<E: ?Sized> {
    elections: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<E: ?Sized> ElectionQueryService<E> {
    pub fn new(elections: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self { elections, clock }
    }
}

#[async_trait]
impl<E: ?Sized> ElectionQuery for ElectionQueryService<E>
where
    E: ElectionRepository,
{
    async fn current_election(&self) -> Result<Option<Election>, Error> {
        self.elections
            .current_election(self.clock.utc())
            .await
            .map_err(map_election_repository_error)
    }
}
