//! PostgreSQL-backed `VoteRepository` implementation using Diesel ORM.
//!
//! A vote and the voter's `has_voted` flag are written in one transaction.
//! The `votes_voter_election_key` constraint settles concurrent submissions
//! for the same voter and election.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{
    CandidateId, CandidateTally, ElectionId, NewVote, Vote, VoterPk, VotingHistoryEntry,
    sort_history,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewVoteRow, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{candidates, elections, parties, voters, votes};

const ONE_VOTE_PER_ELECTION: &str = "votes_voter_election_key";

/// Vote counts per candidate in one election, with the party name.
macro_rules! tally_query {
    ($election:expr) => {
        votes::table
            .inner_join(candidates::table.inner_join(parties::table))
            .filter(votes::election_id.eq($election))
            .group_by((candidates::id, candidates::name, parties::name))
            .select((
                candidates::id,
                candidates::name,
                parties::name,
                diesel::dsl::count(votes::id),
            ))
    };
}

/// Every vote a voter cast, joined with election, candidate and party names.
macro_rules! history_query {
    ($voter:expr) => {
        votes::table
            .inner_join(elections::table)
            .inner_join(candidates::table.inner_join(parties::table))
            .filter(votes::voter_id.eq($voter))
            .select((
                VoteRow::as_select(),
                elections::name,
                candidates::name,
                parties::name,
            ))
    };
}

/// Diesel-backed implementation of the vote repository port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoteRepositoryError {
    map_basic_pool_error(error, VoteRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VoteRepositoryError {
    if unique_violation(&error) == Some(ONE_VOTE_PER_ELECTION) {
        return VoteRepositoryError::already_voted();
    }
    map_basic_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
    )
}

fn row_to_vote(row: VoteRow) -> Vote {
    Vote {
        id: row.id,
        voter_pk: VoterPk::new(row.voter_id),
        candidate_id: CandidateId::new(row.candidate_id),
        election_id: ElectionId::new(row.election_id),
        cast_at: row.cast_at,
    }
}

/// Clamp a database count into the domain's unsigned tally.
fn to_votes(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn cast_vote(&self, vote: NewVote) -> Result<Vote, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewVoteRow {
            voter_id: vote.voter_pk.get(),
            candidate_id: vote.candidate_id.get(),
            election_id: vote.election_id.get(),
        };

        let row = conn
            .transaction(|conn| {
                async move {
                    let row = diesel::insert_into(votes::table)
                        .values(&new_row)
                        .returning(VoteRow::as_returning())
                        .get_result(conn)
                        .await?;
                    diesel::update(voters::table.find(new_row.voter_id))
                        .set(voters::has_voted.eq(true))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_vote(row))
    }

    async fn tally(&self, election: ElectionId) -> Result<Vec<CandidateTally>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i64, String, String, i64)> = tally_query!(election.get())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, candidate_name, party_name, count)| CandidateTally {
                candidate_id: CandidateId::new(id),
                candidate_name,
                party_name,
                votes: to_votes(count),
            })
            .collect())
    }

    async fn history_for(
        &self,
        voter: VoterPk,
    ) -> Result<Vec<VotingHistoryEntry>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(VoteRow, String, String, String)> = history_query!(voter.get())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut history: Vec<VotingHistoryEntry> = rows
            .into_iter()
            .map(
                |(vote, election_name, candidate_name, party_name)| VotingHistoryEntry {
                    election_id: ElectionId::new(vote.election_id),
                    election_name,
                    candidate_id: CandidateId::new(vote.candidate_id),
                    candidate_name,
                    party_name,
                    cast_at: vote.cast_at,
                },
            )
            .collect();
        sort_history(&mut history);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;
    use diesel::pg::Pg;
    use rstest::rstest;

    #[rstest]
    fn tally_groups_by_candidate_and_party() {
        let sql = debug_query::<Pg, _>(&tally_query!(7_i64)).to_string();
        assert!(
            sql.contains(r#"GROUP BY "candidates"."id", "candidates"."name", "parties"."name""#),
            "unexpected SQL: {sql}"
        );
        assert!(sql.contains(r#""votes"."election_id" = $1"#), "unexpected SQL: {sql}");
        assert!(sql.ends_with("binds: [7]"), "unexpected SQL: {sql}");
    }

    #[rstest]
    fn history_joins_names_for_one_voter() {
        let sql = debug_query::<Pg, _>(&history_query!(5_i64)).to_string();
        assert!(sql.contains(r#"INNER JOIN "elections""#), "unexpected SQL: {sql}");
        assert!(sql.contains(r#"INNER JOIN "parties""#), "unexpected SQL: {sql}");
        assert!(sql.contains(r#""votes"."voter_id" = $1"#), "unexpected SQL: {sql}");
        assert!(!sql.contains("GROUP BY"), "unexpected SQL: {sql}");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(12, 12)]
    #[case(-1, 0)]
    fn counts_clamp_to_unsigned(#[case] count: i64, #[case] expected: u64) {
        assert_eq!(to_votes(count), expected);
    }

    #[rstest]
    fn vote_row_maps_keys() {
        let cast_at = chrono::Utc::now();
        let vote = row_to_vote(VoteRow {
            id: 1,
            voter_id: 2,
            candidate_id: 3,
            election_id: 4,
            cast_at,
        });
        assert_eq!(vote.voter_pk, VoterPk::new(2));
        assert_eq!(vote.candidate_id, CandidateId::new(3));
        assert_eq!(vote.election_id, ElectionId::new(4));
        assert_eq!(vote.cast_at, cast_at);
    }
}
