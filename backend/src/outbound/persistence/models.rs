//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Conversions into domain types re-run domain validation.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, candidates, elections, parties, voters, votes};

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = voters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoterRow {
    pub id: i64,
    pub user_id: Uuid,
    pub voter_id: String,
    pub aadhar_number: String,
    pub phone_number: String,
    pub is_verified: bool,
    pub has_voted: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = voters)]
pub(crate) struct NewVoterRow<'a> {
    pub user_id: Uuid,
    pub voter_id: &'a str,
    pub aadhar_number: &'a str,
    pub phone_number: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = elections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ElectionRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = elections)]
pub(crate) struct NewElectionRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PartyRow {
    pub id: i64,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parties)]
pub(crate) struct NewPartyRow<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = candidates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub photo: String,
    pub bio: String,
    pub party_id: i64,
    pub election_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = candidates)]
pub(crate) struct NewCandidateRow<'a> {
    pub name: &'a str,
    pub photo: &'a str,
    pub bio: &'a str,
    pub party_id: i64,
    pub election_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub id: i64,
    pub voter_id: i64,
    pub candidate_id: i64,
    pub election_id: i64,
    pub cast_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow {
    pub voter_id: i64,
    pub candidate_id: i64,
    pub election_id: i64,
}
