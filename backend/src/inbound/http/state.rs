//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BallotCommand, BallotQuery, ElectionQuery, LoginService, ResultsQuery, VoterProfileQuery,
    VoterRegistrationCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub elections: Arc<dyn ElectionQuery>,
    pub registration: Arc<dyn VoterRegistrationCommand>,
    pub login: Arc<dyn LoginService>,
    pub ballot: Arc<dyn BallotQuery>,
    pub ballot_command: Arc<dyn BallotCommand>,
    pub results: Arc<dyn ResultsQuery>,
    pub profile: Arc<dyn VoterProfileQuery>,
}
