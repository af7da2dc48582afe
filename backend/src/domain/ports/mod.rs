//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the passcode store, the notifier and the
//! hasher) describe what the domain needs from infrastructure. Driving ports
//! (`LoginService`, `BallotCommand` and friends) are what inbound adapters
//! call. Each driven port exposes a typed error generated by
//! `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod ballot;
mod election_query;
mod election_repository;
mod login_service;
mod otp_notifier;
mod otp_store;
mod password_hasher;
mod results_query;
mod vote_repository;
mod voter_profile_query;
mod voter_registration_command;
mod voter_repository;

#[cfg(test)]
pub use ballot::{MockBallotCommand, MockBallotQuery};
pub use ballot::{Ballot, BallotCommand, BallotQuery};
#[cfg(test)]
pub use election_query::MockElectionQuery;
pub use election_query::ElectionQuery;
#[cfg(test)]
pub use election_repository::MockElectionRepository;
pub use election_repository::{ElectionRepository, ElectionRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, PendingLogin};
#[cfg(test)]
pub use otp_notifier::MockOtpNotifier;
pub use otp_notifier::{OtpNotifier, OtpNotifierError};
#[cfg(test)]
pub use otp_store::MockOtpStore;
pub use otp_store::{OtpStore, OtpStoreError, otp_key};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use results_query::MockResultsQuery;
pub use results_query::ResultsQuery;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{VoteRepository, VoteRepositoryError};
#[cfg(test)]
pub use voter_profile_query::MockVoterProfileQuery;
pub use voter_profile_query::{VoterProfile, VoterProfileQuery};
#[cfg(test)]
pub use voter_registration_command::MockVoterRegistrationCommand;
pub use voter_registration_command::VoterRegistrationCommand;
#[cfg(test)]
pub use voter_repository::MockVoterRepository;
pub use voter_repository::{VoterRepository, VoterRepositoryError};
