//! PostgreSQL-backed `ElectionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ElectionRepository, ElectionRepositoryError};
use crate::domain::{
    BallotEntry, Candidate, CandidateId, Election, ElectionId, NewCandidate, NewElection,
    NewParty, Party, PartyId,
};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{
    CandidateRow, ElectionRow, NewCandidateRow, NewElectionRow, NewPartyRow, PartyRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{candidates, elections, parties};

/// Diesel-backed implementation of the election repository port.
#[derive(Clone)]
pub struct DieselElectionRepository {
    pool: DbPool,
}

impl DieselElectionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ElectionRepositoryError {
    map_basic_pool_error(error, ElectionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ElectionRepositoryError {
    if is_foreign_key_violation(&error) {
        return ElectionRepositoryError::missing_reference(
            "candidate references an unknown party or election",
        );
    }
    map_basic_diesel_error(
        error,
        ElectionRepositoryError::query,
        ElectionRepositoryError::connection,
    )
}

fn row_to_election(row: ElectionRow) -> Result<Election, ElectionRepositoryError> {
    let details = NewElection::try_new(row.name, row.description, row.starts_at, row.ends_at)
        .map_err(|err| {
            ElectionRepositoryError::query(format!("invalid election row {}: {err}", row.id))
        })?;
    Ok(Election::new(ElectionId::new(row.id), details))
}

fn row_to_candidate(row: CandidateRow) -> Candidate {
    Candidate {
        id: CandidateId::new(row.id),
        name: row.name,
        photo: row.photo,
        bio: row.bio,
        party_id: PartyId::new(row.party_id),
        election_id: ElectionId::new(row.election_id),
    }
}

#[async_trait]
impl ElectionRepository for DieselElectionRepository {
    async fn current_election(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Election>, ElectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = elections::table
            .filter(elections::starts_at.le(now))
            .filter(elections::ends_at.ge(now))
            .order((elections::starts_at.asc(), elections::id.asc()))
            .select(ElectionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_election).transpose()
    }

    async fn ballot_entries(
        &self,
        election: ElectionId,
    ) -> Result<Vec<BallotEntry>, ElectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CandidateRow, String, String)> = candidates::table
            .inner_join(parties::table)
            .filter(candidates::election_id.eq(election.get()))
            .order(candidates::id.asc())
            .select((CandidateRow::as_select(), parties::name, parties::symbol))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(candidate, party_name, party_symbol)| BallotEntry {
                candidate: row_to_candidate(candidate),
                party_name,
                party_symbol,
            })
            .collect())
    }

    async fn find_candidate(
        &self,
        election: ElectionId,
        candidate: CandidateId,
    ) -> Result<Option<Candidate>, ElectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = candidates::table
            .filter(candidates::id.eq(candidate.get()))
            .filter(candidates::election_id.eq(election.get()))
            .select(CandidateRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_candidate))
    }

    async fn list_elections(&self) -> Result<Vec<Election>, ElectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ElectionRow> = elections::table
            .order((elections::starts_at.asc(), elections::id.asc()))
            .select(ElectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_election).collect()
    }

    async fn create_election(
        &self,
        election: NewElection,
    ) -> Result<Election, ElectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(elections::table)
            .values(&NewElectionRow {
                name: election.name(),
                description: election.description(),
                starts_at: election.starts_at(),
                ends_at: election.ends_at(),
            })
            .returning(ElectionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Election::new(ElectionId::new(row.id), election))
    }

    async fn create_party(&self, party: NewParty) -> Result<Party, ElectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(parties::table)
            .values(&NewPartyRow {
                name: party.name(),
                symbol: party.symbol(),
            })
            .returning(PartyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Party {
            id: PartyId::new(row.id),
            name: row.name,
            symbol: row.symbol,
        })
    }

    async fn create_candidate(
        &self,
        candidate: NewCandidate,
    ) -> Result<Candidate, ElectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(candidates::table)
            .values(&NewCandidateRow {
                name: candidate.name(),
                photo: candidate.photo(),
                bio: candidate.bio(),
                party_id: candidate.party_id().get(),
                election_id: candidate.election_id().get(),
            })
            .returning(CandidateRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row_to_candidate(row))
    }
}
