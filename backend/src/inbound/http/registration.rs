//! Voter registration handlers.
//!
//! ```text
//! POST /register/ voter_id=..&aadhar_number=..&phone_number=..&password1=..&password2=..
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;

use crate::domain::{Error, RegistrationInput, RegistrationValidationError, VoterRegistration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::transition::{FormPage, Transition};

const REGISTER_FORM: FormPage = FormPage {
    action: "/register/",
    fields: &[
        "voter_id",
        "aadhar_number",
        "phone_number",
        "password1",
        "password2",
    ],
};

/// Registration form body.
#[derive(Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegistrationForm {
    pub voter_id: String,
    pub aadhar_number: String,
    pub phone_number: String,
    pub password1: String,
    pub password2: String,
}

impl RegistrationForm {
    fn input(&self) -> RegistrationInput<'_> {
        RegistrationInput {
            voter_id: &self.voter_id,
            aadhar_number: &self.aadhar_number,
            phone_number: &self.phone_number,
            password: &self.password1,
            password_confirmation: &self.password2,
        }
    }
}

fn map_registration_error(err: &RegistrationValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_field(err.field())
}

/// Describe the registration form.
#[utoipa::path(
    get,
    path = "/register/",
    responses((status = 200, description = "Registration form", body = FormPage)),
    tags = ["registration"],
    operation_id = "registrationForm",
    security([])
)]
#[get("/register/")]
pub async fn registration_form() -> web::Json<FormPage> {
    web::Json(REGISTER_FORM)
}

/// Create an account and voter record.
#[utoipa::path(
    post,
    path = "/register/",
    request_body(content = RegistrationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Voter registered", body = Transition),
        (status = 400, description = "Field validation failed", body = Error),
        (status = 409, description = "Voter ID or Aadhar number already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["registration"],
    operation_id = "register",
    security([])
)]
#[post("/register/")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegistrationForm>,
) -> ApiResult<web::Json<Transition>> {
    let registration = VoterRegistration::try_from_input(form.input())
        .map_err(|err| map_registration_error(&err))?;
    state.registration.register(registration).await?;
    Ok(web::Json(Transition::new(
        "Registration successful! Please login.",
        "/login/",
    )))
}
