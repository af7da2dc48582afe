//! PostgreSQL-backed `VoterRepository` implementation using Diesel ORM.
//!
//! Registration writes the account and voter rows in one transaction.
//! Unique constraints are the final word on duplicates; their names tell the
//! voter-ID clash apart from the Aadhar clash.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{VoterRepository, VoterRepositoryError};
use crate::domain::{
    AadharNumber, LoginCredentials, NewAccount, NewVoter, PhoneNumber, UserId, Voter, VoterDraft,
    VoterId, VoterPk,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation,
};
use super::models::{NewAccountRow, NewVoterRow, VoterRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, voters};

/// Diesel-backed implementation of the voter repository port.
#[derive(Clone)]
pub struct DieselVoterRepository {
    pool: DbPool,
}

impl DieselVoterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VoterRepositoryError {
    map_basic_pool_error(error, VoterRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VoterRepositoryError {
    match unique_violation(&error) {
        Some("accounts_username_key" | "voters_voter_id_key") => {
            VoterRepositoryError::duplicate_voter_id()
        }
        Some("voters_aadhar_number_key") => VoterRepositoryError::duplicate_aadhar_number(),
        _ => map_basic_diesel_error(
            error,
            VoterRepositoryError::query,
            VoterRepositoryError::connection,
        ),
    }
}

/// Convert a row into a domain voter, re-validating identifiers.
fn row_to_voter(row: VoterRow) -> Result<Voter, VoterRepositoryError> {
    let corrupt = |err: crate::domain::VoterValidationError| {
        VoterRepositoryError::query(format!("invalid voter row {}: {err}", row.id))
    };
    Ok(Voter::from_draft(VoterDraft {
        pk: VoterPk::new(row.id),
        user_id: UserId::from_uuid(row.user_id),
        voter_id: VoterId::new(&row.voter_id).map_err(corrupt)?,
        aadhar_number: AadharNumber::new(&row.aadhar_number).map_err(corrupt)?,
        phone_number: PhoneNumber::new(&row.phone_number).map_err(corrupt)?,
        is_verified: row.is_verified,
        has_voted: row.has_voted,
    }))
}

#[async_trait]
impl VoterRepository for DieselVoterRepository {
    async fn register(
        &self,
        account: NewAccount,
        voter: NewVoter,
    ) -> Result<Voter, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let account_row = NewAccountRow {
            id: *account.id.as_uuid(),
            username: &account.username,
            password_hash: account.password_hash.as_ref(),
        };
        let voter_row = NewVoterRow {
            user_id: *voter.user_id.as_uuid(),
            voter_id: voter.voter_id.as_ref(),
            aadhar_number: voter.aadhar_number.as_ref(),
            phone_number: voter.phone_number.as_ref(),
        };

        let row = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(accounts::table)
                        .values(&account_row)
                        .execute(conn)
                        .await?;
                    diesel::insert_into(voters::table)
                        .values(&voter_row)
                        .returning(VoterRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row_to_voter(row)
    }

    async fn voter_id_taken(&self, voter_id: &VoterId) -> Result<bool, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            voters::table.filter(voters::voter_id.eq(voter_id.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn aadhar_number_taken(
        &self,
        aadhar_number: &AadharNumber,
    ) -> Result<bool, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            voters::table.filter(voters::aadhar_number.eq(aadhar_number.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<Voter>, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = voters::table
            .filter(
                voters::voter_id
                    .eq(credentials.voter_id().as_ref())
                    .and(voters::aadhar_number.eq(credentials.aadhar_number().as_ref()))
                    .and(voters::phone_number.eq(credentials.phone_number().as_ref())),
            )
            .select(VoterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_voter).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Voter>, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = voters::table
            .filter(voters::user_id.eq(user_id.as_uuid()))
            .select(VoterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_voter).transpose()
    }

    async fn find_by_pk(&self, pk: VoterPk) -> Result<Option<Voter>, VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = voters::table
            .find(pk.get())
            .select(VoterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_voter).transpose()
    }

    async fn mark_verified(&self, pk: VoterPk) -> Result<(), VoterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(voters::table.find(pk.get()))
            .set(voters::is_verified.eq(true))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(VoterRepositoryError::missing_voter(pk.get()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row() -> VoterRow {
        VoterRow {
            id: 3,
            user_id: uuid::Uuid::new_v4(),
            voter_id: "ABC1234567".to_owned(),
            aadhar_number: "123412341234".to_owned(),
            phone_number: "9876543210".to_owned(),
            is_verified: true,
            has_voted: false,
        }
    }

    #[rstest]
    fn row_maps_flags_and_keys() {
        let voter = row_to_voter(row()).expect("valid row");
        assert_eq!(voter.pk(), VoterPk::new(3));
        assert!(voter.is_verified());
        assert!(!voter.has_voted());
    }

    #[rstest]
    fn corrupt_row_is_a_query_error() {
        let mut bad = row();
        bad.phone_number = "12".to_owned();
        let err = row_to_voter(bad).expect_err("invalid phone");
        assert!(matches!(err, VoterRepositoryError::Query { .. }));
    }
}
