//! Process-local voting store used when no database is configured.
//!
//! One mutex guards every table, so each port call is a single critical
//! section. Uniqueness rules mirror the PostgreSQL constraints: one account
//! per voter ID, one voter per Aadhar number and one vote per voter and
//! election.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{
    ElectionRepository, ElectionRepositoryError, VoteRepository, VoteRepositoryError,
    VoterRepository, VoterRepositoryError,
};
use crate::domain::{
    AadharNumber, BallotEntry, Candidate, CandidateId, CandidateTally, Election, ElectionId,
    LoginCredentials, NewAccount, NewCandidate, NewElection, NewParty, NewVote, NewVoter, Party,
    PartyId, UserId, Vote, Voter, VoterId, VoterPk, VotingHistoryEntry, sort_history,
};

#[derive(Default)]
struct Tables {
    accounts: Vec<NewAccount>,
    voters: Vec<Voter>,
    elections: Vec<Election>,
    parties: Vec<Party>,
    candidates: Vec<Candidate>,
    votes: Vec<Vote>,
}

impl Tables {
    fn voter_mut(&mut self, pk: VoterPk) -> Option<&mut Voter> {
        self.voters.iter_mut().find(|voter| voter.pk() == pk)
    }

    fn party(&self, id: PartyId) -> Option<&Party> {
        self.parties.iter().find(|party| party.id == id)
    }

    fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    fn election(&self, id: ElectionId) -> Option<&Election> {
        self.elections.iter().find(|election| election.id() == id)
    }

    fn party_name(&self, id: PartyId) -> String {
        self.party(id).map(|party| party.name.clone()).unwrap_or_default()
    }
}

/// Next key for a table holding `len` rows. Keys start at 1.
fn next_key(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |len| len + 1)
}

/// In-memory implementation of the voter, election and vote repositories.
///
/// Clones share the same tables.
#[derive(Clone)]
pub struct InMemoryVotingStore {
    tables: Arc<Mutex<Tables>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryVotingStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            clock,
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl VoterRepository for InMemoryVotingStore {
    async fn register(
        &self,
        account: NewAccount,
        voter: NewVoter,
    ) -> Result<Voter, VoterRepositoryError> {
        let mut tables = self.tables();
        let voter_id_taken = tables
            .accounts
            .iter()
            .any(|existing| existing.username == account.username)
            || tables
                .voters
                .iter()
                .any(|existing| existing.voter_id() == &voter.voter_id);
        if voter_id_taken {
            return Err(VoterRepositoryError::duplicate_voter_id());
        }
        if tables
            .voters
            .iter()
            .any(|existing| existing.aadhar_number() == &voter.aadhar_number)
        {
            return Err(VoterRepositoryError::duplicate_aadhar_number());
        }

        let pk = VoterPk::new(next_key(tables.voters.len()));
        let stored = Voter::registered(pk, voter);
        tables.accounts.push(account);
        tables.voters.push(stored.clone());
        Ok(stored)
    }

    async fn voter_id_taken(&self, voter_id: &VoterId) -> Result<bool, VoterRepositoryError> {
        Ok(self
            .tables()
            .voters
            .iter()
            .any(|voter| voter.voter_id() == voter_id))
    }

    async fn aadhar_number_taken(
        &self,
        aadhar_number: &AadharNumber,
    ) -> Result<bool, VoterRepositoryError> {
        Ok(self
            .tables()
            .voters
            .iter()
            .any(|voter| voter.aadhar_number() == aadhar_number))
    }

    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<Voter>, VoterRepositoryError> {
        Ok(self
            .tables()
            .voters
            .iter()
            .find(|voter| {
                voter.voter_id() == credentials.voter_id()
                    && voter.aadhar_number() == credentials.aadhar_number()
                    && voter.phone_number() == credentials.phone_number()
            })
            .cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Voter>, VoterRepositoryError> {
        Ok(self
            .tables()
            .voters
            .iter()
            .find(|voter| voter.user_id() == user_id)
            .cloned())
    }

    async fn find_by_pk(&self, pk: VoterPk) -> Result<Option<Voter>, VoterRepositoryError> {
        Ok(self
            .tables()
            .voters
            .iter()
            .find(|voter| voter.pk() == pk)
            .cloned())
    }

    async fn mark_verified(&self, pk: VoterPk) -> Result<(), VoterRepositoryError> {
        let mut tables = self.tables();
        let voter = tables
            .voter_mut(pk)
            .ok_or_else(|| VoterRepositoryError::missing_voter(pk.get()))?;
        voter.verify();
        Ok(())
    }
}

#[async_trait]
impl ElectionRepository for InMemoryVotingStore {
    async fn current_election(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Election>, ElectionRepositoryError> {
        Ok(self
            .tables()
            .elections
            .iter()
            .filter(|election| election.is_active_at(now))
            .min_by_key(|election| (election.starts_at(), election.id()))
            .cloned())
    }

    async fn ballot_entries(
        &self,
        election: ElectionId,
    ) -> Result<Vec<BallotEntry>, ElectionRepositoryError> {
        let tables = self.tables();
        let mut entries: Vec<BallotEntry> = tables
            .candidates
            .iter()
            .filter(|candidate| candidate.election_id == election)
            .filter_map(|candidate| {
                tables.party(candidate.party_id).map(|party| BallotEntry {
                    candidate: candidate.clone(),
                    party_name: party.name.clone(),
                    party_symbol: party.symbol.clone(),
                })
            })
            .collect();
        entries.sort_by_key(|entry| entry.candidate.id);
        Ok(entries)
    }

    async fn find_candidate(
        &self,
        election: ElectionId,
        candidate: CandidateId,
    ) -> Result<Option<Candidate>, ElectionRepositoryError> {
        Ok(self
            .tables()
            .candidate(candidate)
            .filter(|found| found.election_id == election)
            .cloned())
    }

    async fn list_elections(&self) -> Result<Vec<Election>, ElectionRepositoryError> {
        let mut elections = self.tables().elections.clone();
        elections.sort_by_key(|election| (election.starts_at(), election.id()));
        Ok(elections)
    }

    async fn create_election(
        &self,
        election: NewElection,
    ) -> Result<Election, ElectionRepositoryError> {
        let mut tables = self.tables();
        let id = ElectionId::new(next_key(tables.elections.len()));
        let stored = Election::new(id, election);
        tables.elections.push(stored.clone());
        Ok(stored)
    }

    async fn create_party(&self, party: NewParty) -> Result<Party, ElectionRepositoryError> {
        let mut tables = self.tables();
        let stored = Party {
            id: PartyId::new(next_key(tables.parties.len())),
            name: party.name().to_owned(),
            symbol: party.symbol().to_owned(),
        };
        tables.parties.push(stored.clone());
        Ok(stored)
    }

    async fn create_candidate(
        &self,
        candidate: NewCandidate,
    ) -> Result<Candidate, ElectionRepositoryError> {
        let mut tables = self.tables();
        if tables.party(candidate.party_id()).is_none() {
            return Err(ElectionRepositoryError::missing_reference(format!(
                "party {} does not exist",
                candidate.party_id()
            )));
        }
        if tables.election(candidate.election_id()).is_none() {
            return Err(ElectionRepositoryError::missing_reference(format!(
                "election {} does not exist",
                candidate.election_id()
            )));
        }
        let stored = Candidate {
            id: CandidateId::new(next_key(tables.candidates.len())),
            name: candidate.name().to_owned(),
            photo: candidate.photo().to_owned(),
            bio: candidate.bio().to_owned(),
            party_id: candidate.party_id(),
            election_id: candidate.election_id(),
        };
        tables.candidates.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl VoteRepository for InMemoryVotingStore {
    async fn cast_vote(&self, vote: NewVote) -> Result<Vote, VoteRepositoryError> {
        let cast_at = self.clock.utc();
        let mut tables = self.tables();
        if tables
            .votes
            .iter()
            .any(|v| v.voter_pk == vote.voter_pk && v.election_id == vote.election_id)
        {
            return Err(VoteRepositoryError::already_voted());
        }
        let voter = tables.voter_mut(vote.voter_pk).ok_or_else(|| {
            VoteRepositoryError::query(format!("voter {} does not exist", vote.voter_pk))
        })?;
        voter.record_vote();

        let stored = Vote {
            id: next_key(tables.votes.len()),
            voter_pk: vote.voter_pk,
            candidate_id: vote.candidate_id,
            election_id: vote.election_id,
            cast_at,
        };
        tables.votes.push(stored.clone());
        Ok(stored)
    }

    async fn tally(&self, election: ElectionId) -> Result<Vec<CandidateTally>, VoteRepositoryError> {
        let tables = self.tables();
        let mut counts: BTreeMap<CandidateId, u64> = BTreeMap::new();
        for vote in tables.votes.iter().filter(|v| v.election_id == election) {
            *counts.entry(vote.candidate_id).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .filter_map(|(candidate_id, votes)| {
                tables.candidate(candidate_id).map(|candidate| CandidateTally {
                    candidate_id,
                    candidate_name: candidate.name.clone(),
                    party_name: tables.party_name(candidate.party_id),
                    votes,
                })
            })
            .collect())
    }

    async fn history_for(
        &self,
        voter: VoterPk,
    ) -> Result<Vec<VotingHistoryEntry>, VoteRepositoryError> {
        let tables = self.tables();
        let mut history: Vec<VotingHistoryEntry> = tables
            .votes
            .iter()
            .filter(|vote| vote.voter_pk == voter)
            .filter_map(|vote| {
                let election = tables.election(vote.election_id)?;
                let candidate = tables.candidate(vote.candidate_id)?;
                Some(VotingHistoryEntry {
                    election_id: vote.election_id,
                    election_name: election.name().to_owned(),
                    candidate_id: vote.candidate_id,
                    candidate_name: candidate.name.clone(),
                    party_name: tables.party_name(candidate.party_id),
                    cast_at: vote.cast_at,
                })
            })
            .collect();
        sort_history(&mut history);
        Ok(history)
    }
}
