//! Builders that pick adapters for the configured backing services and wire
//! them into the domain services behind [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use voting::domain::ports::{
    ElectionRepository, OtpNotifier, OtpStore, PasswordHasher, VoteRepository, VoterRepository,
};
use voting::domain::{
    BallotService, ElectionQueryService, OtpLoginService, VoterProfileService,
    VoterRegistrationService,
};
use voting::inbound::http::state::HttpState;
use voting::outbound::cache::InMemoryOtpStore;
use voting::outbound::hashing::Argon2PasswordHasher;
use voting::outbound::memory::InMemoryVotingStore;
use voting::outbound::notify::TracingOtpNotifier;
use voting::outbound::persistence::{
    DieselElectionRepository, DieselVoteRepository, DieselVoterRepository,
};

use super::ServerConfig;

/// Driven adapters chosen for this process.
struct Adapters {
    voters: Arc<dyn VoterRepository>,
    elections: Arc<dyn ElectionRepository>,
    votes: Arc<dyn VoteRepository>,
    otp_store: Arc<dyn OtpStore>,
}

fn build_adapters(config: &ServerConfig, clock: &Arc<dyn Clock>) -> Adapters {
    let (voters, elections, votes): (
        Arc<dyn VoterRepository>,
        Arc<dyn ElectionRepository>,
        Arc<dyn VoteRepository>,
    ) = match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselVoterRepository::new(pool.clone())) as Arc<dyn VoterRepository>,
            Arc::new(DieselElectionRepository::new(pool.clone())) as Arc<dyn ElectionRepository>,
            Arc::new(DieselVoteRepository::new(pool.clone())) as Arc<dyn VoteRepository>,
        ),
        None => {
            info!("no database configured; voting data is kept in memory");
            let store = Arc::new(InMemoryVotingStore::new(clock.clone()));
            (
                store.clone() as Arc<dyn VoterRepository>,
                store.clone() as Arc<dyn ElectionRepository>,
                store as Arc<dyn VoteRepository>,
            )
        }
    };

    let otp_store: Arc<dyn OtpStore> = match &config.redis {
        Some(redis) => Arc::new(redis.clone()),
        None => {
            info!("no redis configured; passcodes are kept in process");
            Arc::new(InMemoryOtpStore::new(clock.clone()))
        }
    };

    Adapters {
        voters,
        elections,
        votes,
        otp_store,
    }
}

/// Build handler state from the configured adapters.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let Adapters {
        voters,
        elections,
        votes,
        otp_store,
    } = build_adapters(config, &clock);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let notifier: Arc<dyn OtpNotifier> = Arc::new(TracingOtpNotifier::new());

    let login = OtpLoginService::new(voters.clone(), otp_store, notifier)
        .with_policy(config.otp_policy)
        .with_ttl(config.otp_ttl);
    let ballot = Arc::new(BallotService::new(
        voters.clone(),
        elections.clone(),
        votes.clone(),
        clock.clone(),
    ));

    HttpState {
        elections: Arc::new(ElectionQueryService::new(elections, clock)),
        registration: Arc::new(VoterRegistrationService::new(voters.clone(), hasher)),
        login: Arc::new(login),
        ballot: ballot.clone(),
        ballot_command: ballot.clone(),
        results: ballot,
        profile: Arc::new(VoterProfileService::new(voters, votes)),
    }
}
