//! HTTP inbound adapter exposing the voting pages as JSON endpoints.

pub mod auth;
pub mod ballot;
pub mod error;
pub mod health;
pub mod home;
pub mod profile;
pub mod registration;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transition;

use actix_web::web;

pub use error::ApiResult;

/// Register every voting route.
///
/// Health probes are mounted separately because they need
/// [`health::HealthState`] rather than [`state::HttpState`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home)
        .service(registration::registration_form)
        .service(registration::register)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::otp_form)
        .service(auth::verify_otp)
        .service(auth::logout)
        .service(auth::logout_get)
        .service(ballot::ballot)
        .service(ballot::cast_vote)
        .service(ballot::results)
        .service(profile::profile);
}
