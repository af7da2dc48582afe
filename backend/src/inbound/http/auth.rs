//! Two-step login and logout handlers.
//!
//! ```text
//! POST /login/       voter_id=..&aadhar_number=..&phone_number=..
//! POST /otp-verify/  otp=123456
//! POST /logout/
//! ```
//!
//! The login step leaves a pending login in the session; the passcode step
//! swaps it for the authenticated account id.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, INVALID_CREDENTIALS, LoginCredentials, LoginValidationError, OtpCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::transition::{FormPage, Transition};

const LOGIN_PATH: &str = "/login/";
const OTP_VERIFY_PATH: &str = "/otp-verify/";
const VOTE_PATH: &str = "/vote/";
const HOME_PATH: &str = "/";

const LOGIN_FORM: FormPage = FormPage {
    action: LOGIN_PATH,
    fields: &["voter_id", "aadhar_number", "phone_number"],
};
const OTP_FORM: FormPage = FormPage {
    action: OTP_VERIFY_PATH,
    fields: &["otp"],
};

/// Login form body.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginForm {
    pub voter_id: String,
    pub aadhar_number: String,
    pub phone_number: String,
}

impl TryFrom<&LoginForm> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.voter_id, &value.aadhar_number, &value.phone_number)
    }
}

/// Passcode form body.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct OtpForm {
    pub otp: String,
}

/// `GET /login/` body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum LoginPage {
    Form(FormPage),
    Authenticated(Transition),
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::MissingField { field } => {
            Error::invalid_request(err.to_string()).with_field(field)
        }
        // Same answer as an unknown voter.
        LoginValidationError::Malformed => Error::unauthorized(INVALID_CREDENTIALS),
    }
}

fn already_authenticated() -> Transition {
    Transition::new("You are already logged in", VOTE_PATH)
}

fn login_required() -> Error {
    Error::unauthorized("Please login first").with_redirect(LOGIN_PATH)
}

/// Describe the login form, or send an authenticated voter to the ballot.
#[utoipa::path(
    get,
    path = "/login/",
    responses(
        (status = 200, description = "Login form or ballot redirect", body = LoginPage),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login/")]
pub async fn login_form(session: SessionContext) -> ApiResult<web::Json<LoginPage>> {
    let page = if session.user_id()?.is_some() {
        LoginPage::Authenticated(already_authenticated())
    } else {
        LoginPage::Form(LOGIN_FORM)
    };
    Ok(web::Json(page))
}

/// Match voter credentials and issue a passcode.
#[utoipa::path(
    post,
    path = "/login/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Passcode issued", body = Transition),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Unknown voter", body = Error),
        (status = 503, description = "Backing service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<web::Json<Transition>> {
    if session.user_id()?.is_some() {
        return Ok(web::Json(already_authenticated()));
    }
    let credentials =
        LoginCredentials::try_from(&form.into_inner()).map_err(map_login_validation_error)?;
    let pending = state.login.begin_login(&credentials).await?;
    session.store_pending(&pending)?;
    Ok(web::Json(Transition::new(
        "OTP sent to your registered phone number",
        OTP_VERIFY_PATH,
    )))
}

/// Describe the passcode form while a login is pending.
#[utoipa::path(
    get,
    path = "/otp-verify/",
    responses(
        (status = 200, description = "Passcode form", body = FormPage),
        (status = 401, description = "No pending login", body = Error)
    ),
    tags = ["auth"],
    operation_id = "otpForm",
    security([])
)]
#[get("/otp-verify/")]
pub async fn otp_form(session: SessionContext) -> ApiResult<web::Json<FormPage>> {
    session.pending()?.ok_or_else(login_required)?;
    Ok(web::Json(OTP_FORM))
}

/// Confirm the passcode and authenticate the session.
#[utoipa::path(
    post,
    path = "/otp-verify/",
    request_body(content = OtpForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Voter verified", body = Transition, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed passcode", body = Error),
        (status = 401, description = "No pending login or wrong passcode", body = Error),
        (status = 404, description = "Voter not found", body = Error)
    ),
    tags = ["auth"],
    operation_id = "verifyOtp",
    security([])
)]
#[post("/otp-verify/")]
pub async fn verify_otp(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<OtpForm>,
) -> ApiResult<web::Json<Transition>> {
    let pending = session.pending()?.ok_or_else(login_required)?;
    let submitted = OtpCode::parse(&form.otp)
        .map_err(|err| Error::invalid_request(err.to_string()).with_field("otp"))?;
    let user_id = state.login.confirm_otp(&pending, &submitted).await?;
    session.clear_pending();
    session.persist_user(&user_id)?;
    Ok(web::Json(Transition::new("OTP verified successfully!", VOTE_PATH)))
}

/// Drop the whole session.
#[utoipa::path(
    post,
    path = "/logout/",
    responses((status = 200, description = "Logged out", body = Transition)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout/")]
pub async fn logout(session: SessionContext) -> web::Json<Transition> {
    logout_session(&session)
}

/// `GET /logout/` behaves like the POST.
#[get("/logout/")]
pub async fn logout_get(session: SessionContext) -> web::Json<Transition> {
    logout_session(&session)
}

fn logout_session(session: &SessionContext) -> web::Json<Transition> {
    session.purge();
    web::Json(Transition::new(
        "You have been logged out successfully.",
        HOME_PATH,
    ))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
