//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every voting page and the health probes, together with
//! the session cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued once POST /otp-verify/ succeeds.",
            ))),
        );
    }
}

/// OpenAPI document for the voting API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Voting backend API",
        description = "Voter registration, passcode login, ballots and results."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::registration::registration_form,
        crate::inbound::http::registration::register,
        crate::inbound::http::auth::login_form,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::otp_form,
        crate::inbound::http::auth::verify_otp,
        crate::inbound::http::auth::logout,
        crate::inbound::http::ballot::ballot,
        crate::inbound::http::ballot::cast_vote,
        crate::inbound::http::ballot::results,
        crate::inbound::http::profile::profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "home", description = "Landing page"),
        (name = "registration", description = "Voter sign-up"),
        (name = "auth", description = "Passcode login and logout"),
        (name = "ballot", description = "Casting votes and reading results"),
        (name = "profile", description = "Voter details and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/")]
    #[case("/register/")]
    #[case("/login/")]
    #[case("/otp-verify/")]
    #[case("/logout/")]
    #[case("/vote/")]
    #[case("/results/")]
    #[case("/profile/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths.paths.contains_key(path),
            "missing path {path}"
        );
    }

    #[rstest]
    fn registers_session_cookie_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
        assert!(components.schemas.contains_key("Error"));
    }
}
