//! Voter profile handler.

use actix_web::{get, web};

use crate::domain::Error;
use crate::domain::ports::VoterProfile;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Voter details and voting history, newest first.
#[utoipa::path(
    get,
    path = "/profile/",
    responses(
        (status = 200, description = "Voter profile", body = VoterProfile),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No voter profile", body = Error)
    ),
    tags = ["profile"],
    operation_id = "profile",
    security(("SessionCookie" = []))
)]
#[get("/profile/")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<VoterProfile>> {
    let user_id = session.require_user_id()?;
    let profile = state.profile.profile(&user_id).await?;
    Ok(web::Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, cookie_for, fixture_user, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn returns_profile_for_session_user() {
        let mut ports = MockPorts::default();
        ports
            .profile
            .expect_profile()
            .withf(|user| *user == fixture_user())
            .times(1)
            .returning(|_| {
                Ok(VoterProfile {
                    voter_id: "ABC1234567".to_owned(),
                    aadhar_number: "123412341234".to_owned(),
                    phone_number: "9876543210".to_owned(),
                    is_verified: true,
                    has_voted: false,
                    voting_history: Vec::new(),
                })
            });
        let app = test::init_service(test_app(ports.into_state())).await;
        let cookie = cookie_for(&app, "/test/sign-in").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["voterId"], "ABC1234567");
        assert_eq!(body["isVerified"], true);
        assert_eq!(body["votingHistory"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn missing_voter_sends_home() {
        let mut ports = MockPorts::default();
        ports
            .profile
            .expect_profile()
            .returning(|_| Err(Error::not_found("Voter profile not found").with_redirect("/")));
        let app = test::init_service(test_app(ports.into_state())).await;
        let cookie = cookie_for(&app, "/test/sign-in").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Voter profile not found");
        assert_eq!(body["details"]["redirect"], "/");
    }

    #[actix_web::test]
    async fn anonymous_caller_is_unauthorised() {
        let app = test::init_service(test_app(MockPorts::default().into_state())).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/profile/").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
