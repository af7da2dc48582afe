//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal with two domain-level states:
//! a login awaiting its passcode, and an authenticated account.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::PendingLogin;
use crate::domain::{Error, OtpCode, UserId, VoterId, VoterPk};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const VOTER_ID_KEY: &str = "voter_id";
pub(crate) const VOTER_PK_KEY: &str = "voter_pk";
pub(crate) const OTP_KEY: &str = "otp";

const LOGIN_PATH: &str = "/login/";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated account id, rotating the session key.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(write_error)
    }

    /// Fetch the current account id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self.0.get::<String>(USER_ID_KEY).map_err(read_error)?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated account or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?.ok_or_else(|| {
            Error::unauthorized("Please login first").with_redirect(LOGIN_PATH)
        })
    }

    /// Remember a login that still needs its passcode.
    pub fn store_pending(&self, pending: &PendingLogin) -> Result<(), Error> {
        self.0
            .insert(VOTER_PK_KEY, pending.voter_pk.get())
            .map_err(write_error)?;
        self.0
            .insert(VOTER_ID_KEY, pending.voter_id.to_string())
            .map_err(write_error)?;
        self.0
            .insert(OTP_KEY, pending.otp.as_ref())
            .map_err(write_error)
    }

    /// Login awaiting its passcode, if the session holds a complete one.
    pub fn pending(&self) -> Result<Option<PendingLogin>, Error> {
        let voter_pk = self.0.get::<i64>(VOTER_PK_KEY).map_err(read_error)?;
        let voter_id = self.0.get::<String>(VOTER_ID_KEY).map_err(read_error)?;
        let otp = self.0.get::<String>(OTP_KEY).map_err(read_error)?;
        let (Some(voter_pk), Some(voter_id), Some(otp)) = (voter_pk, voter_id, otp) else {
            return Ok(None);
        };
        match (VoterId::new(voter_id), OtpCode::parse(otp)) {
            (Ok(voter_id), Ok(otp)) => Ok(Some(PendingLogin {
                voter_pk: VoterPk::new(voter_pk),
                voter_id,
                otp,
            })),
            _ => {
                tracing::warn!("invalid pending login in session cookie");
                Ok(None)
            }
        }
    }

    /// Drop the pending-login keys.
    pub fn clear_pending(&self) {
        for key in [VOTER_ID_KEY, VOTER_PK_KEY, OTP_KEY] {
            self.0.remove(key);
        }
    }

    /// Forget everything, including the authenticated account.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
