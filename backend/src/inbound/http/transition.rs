//! Response bodies shared by the form endpoints.
//!
//! A successful POST answers with a [`Transition`]: the flash message and the
//! page the client should move to. A GET on a form page answers with a
//! [`FormPage`] naming the fields the matching POST expects.

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of a successful state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Transition {
    /// Flash message for the voter.
    #[schema(example = "Your vote has been recorded!")]
    pub message: String,
    /// Path the client should visit next.
    #[schema(example = "/results/")]
    pub next: String,
}

impl Transition {
    pub fn new(message: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            next: next.into(),
        }
    }
}

/// Description of a form accepted by a POST endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormPage {
    /// Path the form posts to.
    #[schema(value_type = String, example = "/login/")]
    pub action: &'static str,
    /// Expected `application/x-www-form-urlencoded` field names.
    #[schema(value_type = Vec<String>)]
    pub fields: &'static [&'static str],
}
