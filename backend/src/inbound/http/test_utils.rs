//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{
    MockBallotCommand, MockBallotQuery, MockElectionQuery, MockLoginService, MockResultsQuery,
    MockVoterProfileQuery, MockVoterRegistrationCommand, PendingLogin,
};
use crate::domain::{Error, OtpCode, UserId, VoterId, VoterPk};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Account id planted by [`sign_in`].
pub const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
/// Passcode planted by [`begin_pending`].
pub const FIXTURE_OTP: &str = "012345";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

pub fn fixture_user() -> UserId {
    UserId::new(FIXTURE_USER_ID).expect("fixture user id")
}

pub fn fixture_pending() -> PendingLogin {
    PendingLogin {
        voter_pk: VoterPk::new(7),
        voter_id: VoterId::new("ABC1234567").expect("fixture voter id"),
        otp: OtpCode::parse(FIXTURE_OTP).expect("fixture otp"),
    }
}

/// Route body that authenticates the caller as [`fixture_user`].
pub async fn sign_in(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_user(&fixture_user())?;
    Ok(HttpResponse::Ok().finish())
}

/// Route body that leaves the caller with [`fixture_pending`].
pub async fn begin_pending(session: SessionContext) -> Result<HttpResponse, Error> {
    session.store_pending(&fixture_pending())?;
    Ok(HttpResponse::Ok().finish())
}

/// Driving-port doubles; a test sets expectations on the ones it exercises.
#[derive(Default)]
pub struct MockPorts {
    pub elections: MockElectionQuery,
    pub registration: MockVoterRegistrationCommand,
    pub login: MockLoginService,
    pub ballot: MockBallotQuery,
    pub ballot_command: MockBallotCommand,
    pub results: MockResultsQuery,
    pub profile: MockVoterProfileQuery,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            elections: Arc::new(self.elections),
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            ballot: Arc::new(self.ballot),
            ballot_command: Arc::new(self.ballot_command),
            results: Arc::new(self.results),
            profile: Arc::new(self.profile),
        })
    }
}

/// App with the voting routes, a test session and the sign-in shortcuts.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(state)
        .route("/test/sign-in", web::get().to(sign_in))
        .route("/test/pending", web::get().to(begin_pending))
        .configure(super::configure)
}

/// Call the `uri` shortcut on `app` and return the session cookie it set.
pub async fn cookie_for(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
) -> Cookie<'static> {
    let res = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
    assert!(res.status().is_success(), "{uri} failed: {}", res.status());
    session_cookie(&res)
}
