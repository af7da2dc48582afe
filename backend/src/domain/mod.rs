//! Domain primitives, services and ports.
//!
//! Purpose: define the voting rules independently of HTTP, SQL and caches.
//! Entities validate on construction; services implement the driving ports
//! in [`ports`] on top of the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Voter identifiers (`VoterId`, `AadharNumber`, `PhoneNumber`) and `Voter`.
//! - Catalogue records (`Election`, `Party`, `Candidate`) and `Vote`.
//! - `OtpCode` / `OtpPolicy` for the second login factor.
//! - `Tally` for ranked results.
//! - Services: `VoterRegistrationService`, `OtpLoginService`,
//!   `BallotService`, `VoterProfileService`, `ElectionQueryService`.

pub mod account;
pub mod auth;
pub mod ballot_service;
pub mod election;
pub mod error;
pub mod otp;
pub mod otp_login_service;
pub mod ports;
pub mod tally;
pub mod trace_id;
pub mod vote;
pub mod voter;
pub mod voter_profile_service;
pub mod voter_registration_service;
mod voting_service_support;

pub use self::account::{NewAccount, PasswordHash, UserId, UserIdValidationError};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, RegistrationInput,
    RegistrationValidationError, VoterRegistration,
};
pub use self::ballot_service::{BallotService, INVALID_CANDIDATE};
pub use self::election::{
    BallotEntry, Candidate, CandidateId, Election, ElectionId, ElectionValidationError,
    NewCandidate, NewElection, NewParty, Party, PartyId,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::otp::{OTP_DIGITS, OTP_TTL, OtpCode, OtpFormatError, OtpPolicy};
pub use self::otp_login_service::{INVALID_CREDENTIALS, OtpLoginService};
pub use self::tally::{CandidateTally, NO_VOTES_MESSAGE, Tally, TallyOutcome};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vote::{NewVote, Vote, VotingHistoryEntry, sort_history};
pub use self::voter::{
    AadharNumber, NewVoter, PhoneNumber, VOTER_ID_MAX, Voter, VoterDraft, VoterId, VoterPk,
    VoterValidationError,
};
pub use self::voter_profile_service::{ElectionQueryService, VoterProfileService};
pub use self::voter_registration_service::VoterRegistrationService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use voting::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Please verify your identity first"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
