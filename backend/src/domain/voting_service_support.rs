//! Shared helpers for the voting services: port error mapping and the
//! lookups every authenticated page starts with.

use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ElectionRepository, ElectionRepositoryError, OtpNotifierError, OtpStoreError,
    PasswordHasherError, VoteRepositoryError, VoterRepository, VoterRepositoryError,
};
use crate::domain::{Election, Error, UserId, Voter};

pub(crate) const HOME: &str = "/";
pub(crate) const LOGIN: &str = "/login/";
pub(crate) const OTP_VERIFY: &str = "/otp-verify/";
pub(crate) const RESULTS: &str = "/results/";

pub(crate) const VOTER_PROFILE_NOT_FOUND: &str = "Voter profile not found";
pub(crate) const ALREADY_VOTED: &str = "You have already voted in this election!";
pub(crate) const DUPLICATE_VOTER_ID: &str = "This Voter ID is already registered";
pub(crate) const DUPLICATE_AADHAR_NUMBER: &str = "This Aadhar number is already registered";

pub(crate) fn map_voter_repository_error(error: VoterRepositoryError) -> Error {
    match error {
        VoterRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("voter repository unavailable: {message}"))
        }
        VoterRepositoryError::Query { message } => {
            Error::internal(format!("voter repository error: {message}"))
        }
        VoterRepositoryError::DuplicateVoterId => {
            Error::conflict(DUPLICATE_VOTER_ID).with_field("voter_id")
        }
        VoterRepositoryError::DuplicateAadharNumber => {
            Error::conflict(DUPLICATE_AADHAR_NUMBER).with_field("aadhar_number")
        }
        VoterRepositoryError::MissingVoter { .. } => Error::not_found("Voter not found"),
    }
}

pub(crate) fn map_election_repository_error(error: ElectionRepositoryError) -> Error {
    match error {
        ElectionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("election repository unavailable: {message}"))
        }
        ElectionRepositoryError::Query { message } => {
            Error::internal(format!("election repository error: {message}"))
        }
        ElectionRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

pub(crate) fn map_vote_repository_error(error: VoteRepositoryError) -> Error {
    match error {
        VoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vote repository unavailable: {message}"))
        }
        VoteRepositoryError::Query { message } => {
            Error::internal(format!("vote repository error: {message}"))
        }
        VoteRepositoryError::AlreadyVoted => Error::conflict(ALREADY_VOTED).with_redirect(RESULTS),
    }
}

pub(crate) fn map_otp_store_error(error: OtpStoreError) -> Error {
    match error {
        OtpStoreError::Backend { message } => {
            Error::service_unavailable(format!("otp store unavailable: {message}"))
        }
        OtpStoreError::Corrupt { message } => {
            Error::internal(format!("otp store error: {message}"))
        }
    }
}

pub(crate) fn map_otp_notifier_error(error: OtpNotifierError) -> Error {
    match error {
        OtpNotifierError::Delivery { message } => {
            Error::service_unavailable(format!("otp delivery unavailable: {message}"))
        }
    }
}

pub(crate) fn map_password_hasher_error(error: PasswordHasherError) -> Error {
    match error {
        PasswordHasherError::Hashing { message } => {
            Error::internal(format!("password hashing failed: {message}"))
        }
    }
}

/// Voter owned by `user`, or the "profile not found" error.
pub(crate) async fn require_voter<V>(voters: &V, user: &UserId) -> Result<Voter, Error>
where
    V: VoterRepository + ?Sized,
{
    voters
        .find_by_user(user)
        .await
        .map_err(map_voter_repository_error)?
        .ok_or_else(|| Error::not_found(VOTER_PROFILE_NOT_FOUND).with_redirect(HOME))
}

/// Election open at `now`, or a not-found error carrying `message`.
pub(crate) async fn require_current_election<E>(
    elections: &E,
    now: DateTime<Utc>,
    message: &str,
) -> Result<Election, Error>
where
    E: ElectionRepository + ?Sized,
{
    elections
        .current_election(now)
        .await
        .map_err(map_election_repository_error)?
        .ok_or_else(|| Error::not_found(message).with_redirect(HOME))
}
